use std::path::PathBuf;

use crate::{CsvRow, RequestId, SummaryOutcome, Tab, UploadOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the input text.
    InputChanged(String),
    /// User cleared the input text.
    ClearClicked,
    /// User switched between the text and file tabs.
    TabSelected(Tab),
    /// User picked a CSV file to be parsed locally.
    CsvFileSelected(PathBuf),
    /// Engine finished parsing the selected CSV file.
    CsvLoaded(Result<Vec<CsvRow>, String>),
    /// User picked a file to be summarized by the server.
    UploadFileSelected(PathBuf),
    /// User asked for the current input to be summarized.
    SubmitClicked,
    /// User asked for the selected upload file to be summarized.
    SubmitFileClicked(UploadOptions),
    /// Engine completion for a summarization request.
    SummaryReceived {
        request_id: RequestId,
        outcome: SummaryOutcome,
        /// Row count reported by the server, if any.
        rows: Option<usize>,
    },
    CopyClicked,
    CopyFinished(Result<(), String>),
    DownloadClicked,
    DownloadFinished(Result<PathBuf, String>),
    HealthCheckRequested,
    HealthChecked { online: bool },
}
