use std::path::PathBuf;

use crate::RequestId;

/// File name used when the output is saved.
pub const SUMMARY_FILE_NAME: &str = "summary.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    /// Merge all reviews into a single summary.
    pub combine: bool,
    /// Ask for the detailed rather than the short summary.
    pub detail: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            combine: true,
            detail: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a blocking message to the user.
    Alert { message: String },
    LoadCsv { path: PathBuf },
    Summarize { request_id: RequestId, text: String },
    SummarizeFile {
        request_id: RequestId,
        path: PathBuf,
        options: UploadOptions,
    },
    CopyToClipboard { text: String },
    SaveOutput { file_name: String, content: String },
    CheckHealth,
}
