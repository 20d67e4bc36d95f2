use std::io::Error;

use derive_setters::Setters;

// Fatal errors only. Recoverable conditions (unknown column, failed
// export, invalid menu choice) are reported to the user directly and
// never become a PTVError.
#[derive(Debug)]
pub enum PTVError {
    IoError(Error),
    FileNotFound,
    PermissionDenied,
    LoadingFailed(String),
}

impl From<Error> for PTVError {
    fn from(err: Error) -> Self {
        PTVError::IoError(err)
    }
}

// Soft caps for the loader. Both are off by default, the table grows to
// whatever the input file holds.
#[derive(Debug, Clone, Default, Setters)]
pub struct PTVConfig {
    pub max_rows: Option<usize>,
    pub max_columns: Option<usize>,
}

// One user command, produced by the Controller and consumed by the Model.
#[derive(Debug)]
pub enum Message {
    Display(usize),
    Search { column: String, query: String },
    Sort { column: String, order: String },
    Export(String),
    Quit,
}

pub const MENU_TEXT: &str = "\nWhat do you want to do?
1. Display Data
2. Search Data
3. Sort Data
4. Export Data
5. Exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_setters_build_soft_caps() {
        let cfg = PTVConfig::default().max_rows(Some(5)).max_columns(Some(2));
        assert_eq!(cfg.max_rows, Some(5));
        assert_eq!(cfg.max_columns, Some(2));
    }
}
