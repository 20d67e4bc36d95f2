use crate::model::Column;

pub const COLUMN_WIDTH: usize = 20;

// Print a header plus data rows, every field left justified in a fixed
// width cell. Fields wider than the cell are not truncated.
pub fn render_table(columns: &[Column], rows: &[&Vec<String>]) {
    let header: String = columns.iter().map(|c| format_cell(&c.name)).collect();
    println!("{header}");

    for row in rows {
        println!("{}", format_row(row));
    }
}

fn format_row(fields: &[String]) -> String {
    fields.iter().map(|f| format_cell(f)).collect()
}

fn format_cell(field: &str) -> String {
    format!("{field:<width$}", width = COLUMN_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_left_justified_to_the_column_width() {
        let row = vec!["a".to_string(), "bb".to_string()];
        let line = format_row(&row);
        assert_eq!(line.len(), 2 * COLUMN_WIDTH);
        assert!(line.starts_with("a "));
        assert_eq!(&line[COLUMN_WIDTH..COLUMN_WIDTH + 2], "bb");
    }

    #[test]
    fn wide_fields_are_not_truncated() {
        let row = vec!["x".repeat(COLUMN_WIDTH + 5)];
        assert_eq!(format_row(&row).len(), COLUMN_WIDTH + 5);
    }
}
