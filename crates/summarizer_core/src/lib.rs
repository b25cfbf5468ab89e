//! Summarizer core: pure controller state machine and view-model helpers.
mod config;
mod effect;
mod input;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use config::{ApiConfig, ConfigError, DEFAULT_BASE_URL};
pub use effect::{Effect, UploadOptions, SUMMARY_FILE_NAME};
pub use input::{
    has_csv_extension, join_rows, normalize_input, word_count, CsvRow, InputError,
    UPLOAD_EXTENSIONS,
};
pub use msg::Msg;
pub use outcome::{Failure, FailureKind, SummaryOutcome, ERROR_PREFIX};
pub use state::{AppState, RequestId, Tab};
pub use update::{alerts, update};
pub use view_model::AppViewModel;
