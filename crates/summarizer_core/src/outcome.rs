use std::fmt;

/// Prefix written in front of error messages shown in the output field.
pub const ERROR_PREFIX: &str = "Ошибка: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Timeout,
    HttpStatus(u16),
    InvalidResponse,
    EmptySummary,
    File,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::EmptySummary => write!(f, "empty summary"),
            FailureKind::File => write!(f, "file error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text shown in the output field for this failure.
    pub fn output_text(&self) -> String {
        format!("{ERROR_PREFIX}{}", self.message)
    }
}

/// Result of one summarization request: the summary, or why there is none.
pub type SummaryOutcome = Result<String, Failure>;
