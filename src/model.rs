use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, trace};

use crate::domain::{Message, PTVConfig, PTVError};
use crate::ui;

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    EXITING,
}

// Inferred per column when the file is loaded. INTEGER columns sort
// numerically, everything else byte-wise as text.
#[derive(Debug, PartialEq)]
pub enum ColumnKind {
    TEXT,
    INTEGER,
}

#[derive(Debug)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

// The in-memory table plus every operation over it. Rows are row-major,
// each row holds exactly one field per column.
#[derive(Debug)]
pub struct Model {
    pub status: Status,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Model {
    pub fn load(path: PathBuf, config: &PTVConfig) -> Result<Self, PTVError> {
        Self::check_file(&path)?;
        let text = fs::read_to_string(&path)?;
        let model = Self::from_text(&text, config);
        info!(
            "Loaded {} columns and {} rows from {}",
            model.columns.len(),
            model.rows.len(),
            path.display()
        );
        Ok(model)
    }

    fn check_file(path: &Path) -> Result<(), PTVError> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PTVError::FileNotFound,
            ErrorKind::PermissionDenied => PTVError::PermissionDenied,
            _ => PTVError::IoError(e),
        })?;
        if !metadata.is_file() {
            return Err(PTVError::LoadingFailed("Not a file!".into()));
        }
        Ok(())
    }

    // Plain comma splitting, no quoting support. A field containing a
    // literal comma is mis-split; that limitation is part of the format.
    // Short lines pad with empty fields, long lines drop the excess.
    pub fn from_text(text: &str, config: &PTVConfig) -> Self {
        let mut lines = text.lines();

        let mut names: Vec<String> = match lines.next() {
            Some(header) if !header.trim().is_empty() => header
                .split(',')
                .map(|token| token.trim().to_string())
                .collect(),
            _ => Vec::new(),
        };
        if let Some(max) = config.max_columns {
            names.truncate(max);
        }

        let mut rows = Vec::new();
        for line in lines {
            if let Some(max) = config.max_rows
                && rows.len() >= max
            {
                debug!("Row cap of {max} reached, rest of the file is ignored");
                break;
            }
            let mut fields: Vec<String> = line
                .split(',')
                .map(|token| token.trim().to_string())
                .collect();
            fields.resize(names.len(), String::new());
            rows.push(fields);
        }

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                kind: Self::infer_kind(idx, &rows),
                name,
            })
            .collect();

        Self {
            status: Status::READY,
            columns,
            rows,
        }
    }

    // A column is INTEGER when every non-empty field parses fully as i64.
    fn infer_kind(idx: usize, rows: &[Vec<String>]) -> ColumnKind {
        let mut nonempty = 0;
        for row in rows {
            let field = &row[idx];
            if field.is_empty() {
                continue;
            }
            if field.parse::<i64>().is_err() {
                return ColumnKind::TEXT;
            }
            nonempty += 1;
        }
        if nonempty > 0 {
            ColumnKind::INTEGER
        } else {
            ColumnKind::TEXT
        }
    }

    pub fn update(&mut self, message: Message) -> Result<(), PTVError> {
        trace!("Update: {message:?}");
        match message {
            Message::Display(nrows) => self.display(nrows),
            Message::Search { column, query } => self.search(&column, &query),
            Message::Sort { column, order } => self.sort(&column, &order),
            Message::Export(base) => self.export(&base),
            Message::Quit => self.quit(),
        }
        Ok(())
    }

    // First match wins, compared ASCII case-insensitively.
    pub fn resolve_column(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    fn display(&self, nrows: usize) {
        let nrows = std::cmp::min(nrows, self.rows.len());
        let rows: Vec<&Vec<String>> = self.rows.iter().take(nrows).collect();
        ui::render_table(&self.columns, &rows);
    }

    fn search(&self, column: &str, query: &str) {
        let Some(idx) = self.resolve_column(column) else {
            println!("Column not found!");
            return;
        };

        let matches = self.matching_rows(idx, query);
        debug!(
            "Search for \"{query}\" in column {idx} matched {} rows",
            matches.len()
        );
        ui::render_table(&self.columns, &matches);
        if matches.is_empty() {
            println!("Data not found!");
        }
    }

    // Exact whole-field match, ASCII case-insensitive, original row order.
    fn matching_rows(&self, idx: usize, query: &str) -> Vec<&Vec<String>> {
        self.rows
            .iter()
            .filter(|row| row[idx].eq_ignore_ascii_case(query))
            .collect()
    }

    // In-place stable sort; equal keys keep their relative order in both
    // directions. Any order token other than the asc/desc literals leaves
    // the rows untouched, but the preview is printed either way.
    fn sort(&mut self, column: &str, order: &str) {
        let Some(idx) = self.resolve_column(column) else {
            println!("Column not found!");
            return;
        };

        let kind = &self.columns[idx].kind;
        match order {
            "asc" => self
                .rows
                .sort_by(|a, b| Self::compare_fields(&a[idx], &b[idx], kind)),
            "desc" => self
                .rows
                .sort_by(|a, b| Self::compare_fields(&b[idx], &a[idx], kind)),
            _ => debug!("Unknown sort order \"{order}\", leaving rows as they are"),
        }

        println!("Sorted Data (first 10 rows):");
        let preview: Vec<&Vec<String>> = self.rows.iter().take(10).collect();
        ui::render_table(&self.columns, &preview);
    }

    fn compare_fields(a: &str, b: &str, kind: &ColumnKind) -> Ordering {
        match kind {
            ColumnKind::INTEGER => integer_prefix(a).cmp(&integer_prefix(b)),
            ColumnKind::TEXT => a.as_bytes().cmp(b.as_bytes()),
        }
    }

    fn export(&self, base: &str) {
        let filename = match shellexpand::full(base) {
            Ok(expanded) => format!("{expanded}.csv"),
            Err(e) => {
                error!("Cannot expand export base name \"{base}\": {e}");
                println!("Failed to create file {base}.csv");
                return;
            }
        };

        match self.write_csv(Path::new(&filename)) {
            Ok(()) => println!("Data successfully written to file {filename}"),
            Err(e) => {
                error!("Export to {filename} failed: {e:?}");
                println!("Failed to create file {filename}");
            }
        }
    }

    // Same flat format the loader reads: comma-joined, newline-terminated,
    // header first. Overwrites an existing file.
    fn write_csv(&self, path: &Path) -> Result<(), std::io::Error> {
        let mut file = BufWriter::new(File::create(path)?);
        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        writeln!(file, "{}", names.join(","))?;
        for row in &self.rows {
            writeln!(file, "{}", row.join(","))?;
        }
        file.flush()
    }

    pub fn quit(&mut self) {
        self.status = Status::EXITING;
    }
}

// atoi style integer prefix: leading whitespace skipped, optional sign,
// digits until the first non-digit, 0 when there are none.
fn integer_prefix(field: &str) -> i64 {
    let mut chars = field.trim_start().chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    while let Some(c) = chars.peek() {
        let Some(digit) = c.to_digit(10) else { break };
        value = value.saturating_mul(10).saturating_add(digit as i64);
        chars.next();
    }
    if negative { -value } else { value }
}
