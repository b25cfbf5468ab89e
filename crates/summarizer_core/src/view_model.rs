use std::path::PathBuf;

use crate::Tab;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub tab: Tab,
    pub input: String,
    pub input_words: usize,
    pub clear_visible: bool,
    pub csv_row_count: Option<usize>,
    pub upload_file: Option<PathBuf>,
    pub output: String,
    pub output_words: usize,
    /// Rows in the CSV batch that produced the current output.
    pub output_rows: Option<usize>,
    pub output_failed: bool,
    pub loading: bool,
    pub status: Option<String>,
    pub api_online: Option<bool>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn input_counter(&self) -> String {
        format!("Слова: {}", self.input_words)
    }

    pub fn output_counter(&self) -> String {
        match self.output_rows {
            Some(rows) => format!("Слова: {} | Строк: {}", self.output_words, rows),
            None => format!("Слова: {}", self.output_words),
        }
    }
}
