use std::time::Duration;

use summarizer_core::{Effect, Failure, FailureKind, Msg};
use summarizer_engine::{ApiError, EngineEvent, EngineHandle};
use summarizer_logging::{app_info, app_warn};

/// Executes controller effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    pending: usize,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine, pending: 0 }
    }

    /// Number of commands still waiting for their event.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Run effects, returning the alert texts for the caller to show.
    pub fn enqueue(&mut self, effects: Vec<Effect>) -> Vec<String> {
        let mut alerts = Vec::new();
        for effect in effects {
            match effect {
                Effect::Alert { message } => alerts.push(message),
                Effect::LoadCsv { path } => {
                    app_info!("LoadCsv path={:?}", path);
                    self.engine.load_csv(path);
                    self.pending += 1;
                }
                Effect::Summarize { request_id, text } => {
                    app_info!("Summarize request_id={} text_len={}", request_id, text.len());
                    self.engine.summarize(request_id, text);
                    self.pending += 1;
                }
                Effect::SummarizeFile {
                    request_id,
                    path,
                    options,
                } => {
                    app_info!(
                        "SummarizeFile request_id={} path={:?} combine={} detail={}",
                        request_id,
                        path,
                        options.combine,
                        options.detail
                    );
                    self.engine.summarize_file(request_id, path, options);
                    self.pending += 1;
                }
                Effect::CopyToClipboard { text } => {
                    self.engine.copy(text);
                    self.pending += 1;
                }
                Effect::SaveOutput { file_name, content } => {
                    self.engine.save(file_name, content);
                    self.pending += 1;
                }
                Effect::CheckHealth => {
                    self.engine.check_health();
                    self.pending += 1;
                }
            }
        }
        alerts
    }

    /// Wait up to `timeout` for the next engine event.
    pub fn next_msg(&mut self, timeout: Duration) -> Option<Msg> {
        let event = self.engine.recv_timeout(timeout)?;
        self.pending = self.pending.saturating_sub(1);
        Some(map_event(event))
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::HealthChecked { online } => Msg::HealthChecked { online },
        EngineEvent::SummaryCompleted { request_id, result } => Msg::SummaryReceived {
            request_id,
            outcome: result.map_err(to_failure),
            rows: None,
        },
        EngineEvent::FileSummaryCompleted { request_id, result } => {
            let (outcome, rows) = match result {
                Ok(summary) => (Ok(summary.text), summary.stats.map(|s| s.total_rows)),
                Err(err) => (Err(to_failure(err)), None),
            };
            Msg::SummaryReceived {
                request_id,
                outcome,
                rows,
            }
        }
        EngineEvent::CsvLoaded { result } => Msg::CsvLoaded(result.map_err(|err| {
            app_warn!("CSV load failed: {}", err);
            err.to_string()
        })),
        EngineEvent::Copied { result } => Msg::CopyFinished(result),
        EngineEvent::Saved { result } => Msg::DownloadFinished(result),
    }
}

fn to_failure(err: ApiError) -> Failure {
    app_warn!("Request failed: {}", err);
    let kind = match err.kind {
        summarizer_engine::FailureKind::InvalidUrl | summarizer_engine::FailureKind::Network => {
            FailureKind::Network
        }
        summarizer_engine::FailureKind::Timeout => FailureKind::Timeout,
        summarizer_engine::FailureKind::HttpStatus(code) => FailureKind::HttpStatus(code),
        summarizer_engine::FailureKind::TooLarge { .. }
        | summarizer_engine::FailureKind::InvalidResponse => FailureKind::InvalidResponse,
        summarizer_engine::FailureKind::EmptySummary => FailureKind::EmptySummary,
        summarizer_engine::FailureKind::UnsupportedFile | summarizer_engine::FailureKind::Io => {
            FailureKind::File
        }
    };
    Failure::new(kind, err.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use summarizer_engine::{FileStats, FileSummary};

    #[test]
    fn api_error_keeps_message_and_maps_kind() {
        let event = EngineEvent::SummaryCompleted {
            request_id: 3,
            result: Err(ApiError {
                kind: summarizer_engine::FailureKind::HttpStatus(422),
                message: "M".to_string(),
            }),
        };

        assert_eq!(
            map_event(event),
            Msg::SummaryReceived {
                request_id: 3,
                outcome: Err(Failure::new(FailureKind::HttpStatus(422), "M")),
                rows: None,
            }
        );
    }

    #[test]
    fn file_stats_become_row_count() {
        let event = EngineEvent::FileSummaryCompleted {
            request_id: 1,
            result: Ok(FileSummary {
                text: "sum".to_string(),
                stats: Some(FileStats {
                    total_rows: 12,
                    extracted_texts: 12,
                    summarized: 1,
                    skipped: 0,
                }),
                filename: None,
            }),
        };

        assert_eq!(
            map_event(event),
            Msg::SummaryReceived {
                request_id: 1,
                outcome: Ok("sum".to_string()),
                rows: Some(12),
            }
        );
    }
}
