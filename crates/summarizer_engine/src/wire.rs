//! JSON shapes exchanged with the summarization API.
//!
//! Responses are decoded into tagged results here so callers never poke at
//! optional fields of a loosely shaped body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ApiError, FailureKind, FileSummary};

const INVALID_RESPONSE: &str = "некорректный ответ API";
const EMPTY_SUMMARY: &str = "API вернул пустую сводку";

#[derive(Debug, Serialize)]
pub(crate) struct SummarizeRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FileStats {
    pub total_rows: usize,
    pub extracted_texts: usize,
    pub summarized: usize,
    #[serde(default)]
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct SummaryItem {
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummarizeResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    summaries: Option<Vec<SummaryItem>>,
    #[serde(default)]
    stats: Option<FileStats>,
    #[serde(default)]
    filename: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<ErrorDetail>,
    #[serde(default)]
    detail: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

fn parse_success(body: &[u8]) -> Result<(Vec<String>, SummarizeResponse), ApiError> {
    let mut response: SummarizeResponse = serde_json::from_slice(body).map_err(|err| {
        ApiError::new(FailureKind::InvalidResponse, format!("{INVALID_RESPONSE}: {err}"))
    })?;
    if response.success != Some(true) {
        return Err(match body_message(body) {
            Some(message) => ApiError::new(FailureKind::InvalidResponse, message),
            None => ApiError::new(FailureKind::EmptySummary, EMPTY_SUMMARY),
        });
    }
    let summaries = response
        .summaries
        .take()
        .unwrap_or_default()
        .into_iter()
        .map(|item| item.summary.unwrap_or_default())
        .collect();
    Ok((summaries, response))
}

/// Decode a `/summarize` body into the first summary.
pub fn decode_summary(body: &[u8]) -> Result<String, ApiError> {
    let (summaries, _) = parse_success(body)?;
    summaries
        .into_iter()
        .next()
        .filter(|summary| !summary.trim().is_empty())
        .ok_or_else(|| ApiError::new(FailureKind::EmptySummary, EMPTY_SUMMARY))
}

/// Decode a `/summarize-file` body; separate summaries are joined by blank lines.
pub fn decode_file_summary(body: &[u8]) -> Result<FileSummary, ApiError> {
    let (summaries, response) = parse_success(body)?;
    let parts: Vec<_> = summaries
        .iter()
        .map(|summary| summary.trim())
        .filter(|summary| !summary.is_empty())
        .collect();
    if parts.is_empty() {
        return Err(ApiError::new(FailureKind::EmptySummary, EMPTY_SUMMARY));
    }
    Ok(FileSummary {
        text: parts.join("\n\n"),
        stats: response.stats,
        filename: response.filename,
    })
}

/// Pick the user-facing message out of an error body, or a generic one.
pub fn error_message(status: u16, body: &[u8]) -> String {
    body_message(body).unwrap_or_else(|| format!("Ошибка API: HTTP {status}"))
}

/// `error.message`, else a string `detail`, else `detail.message`.
fn body_message(body: &[u8]) -> Option<String> {
    let response: ErrorResponse = serde_json::from_slice(body).ok()?;
    let structured = response
        .error
        .and_then(|error| error.message)
        .filter(|message| !message.trim().is_empty());
    structured.or_else(|| match response.detail {
        Some(Value::String(message)) if !message.trim().is_empty() => Some(message),
        Some(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned),
        _ => None,
    })
}

/// The service is up iff the health body reports `status: "ok"`.
pub fn decode_health(body: &[u8]) -> bool {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("status").and_then(Value::as_str).map(|s| s == "ok"))
        .unwrap_or(false)
}
