//! Summarizer engine: API client, file IO and effect execution.
mod client;
mod clipboard;
mod csv_load;
mod decode;
mod engine;
mod persist;
mod types;
mod wire;

pub use client::{ClientSettings, ReqwestApi, SummaryApi};
pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use csv_load::{load_csv, parse_csv, CsvError, CsvSettings, TEXT_COLUMN_ALIASES};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use engine::{EngineError, EngineHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{ApiError, EngineEvent, FailureKind, FileSummary};
pub use wire::{decode_file_summary, decode_health, decode_summary, error_message, FileStats};
