use std::path::PathBuf;

/// Catalog file read by the "load" menu entry, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "CS 300 ABCU_Advising_Program_Input.csv";

/// Filter directive for the log subscriber when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn init() -> Self {
        Config {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_filter: String::from(DEFAULT_LOG_FILTER),
        }
    }

    pub fn with_data_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_file = path.into();
        self
    }
}
