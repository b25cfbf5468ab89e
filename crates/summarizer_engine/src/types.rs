use std::fmt;
use std::path::PathBuf;

use summarizer_core::{CsvRow, RequestId};

use crate::wire::FileStats;
use crate::CsvError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    HealthChecked {
        online: bool,
    },
    SummaryCompleted {
        request_id: RequestId,
        result: Result<String, ApiError>,
    },
    FileSummaryCompleted {
        request_id: RequestId,
        result: Result<FileSummary, ApiError>,
    },
    CsvLoaded {
        result: Result<Vec<CsvRow>, CsvError>,
    },
    Copied {
        result: Result<(), String>,
    },
    Saved {
        result: Result<PathBuf, String>,
    },
}

/// Summary produced by the server-side file endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub text: String,
    pub stats: Option<FileStats>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    /// Message suitable for showing to the user.
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidResponse,
    EmptySummary,
    UnsupportedFile,
    Io,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "payload too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::EmptySummary => write!(f, "empty summary"),
            FailureKind::UnsupportedFile => write!(f, "unsupported file"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
