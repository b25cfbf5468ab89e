use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use summarizer_core::{RequestId, UploadOptions};
use summarizer_logging::{app_debug, app_warn};

use crate::clipboard::Clipboard;
use crate::client::SummaryApi;
use crate::csv_load::{load_csv, CsvError, CsvSettings};
use crate::persist::AtomicFileWriter;
use crate::EngineEvent;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(std::io::Error),
}

enum EngineCommand {
    CheckHealth,
    Summarize {
        request_id: RequestId,
        text: String,
    },
    SummarizeFile {
        request_id: RequestId,
        path: PathBuf,
        options: UploadOptions,
    },
    LoadCsv {
        path: PathBuf,
    },
    Copy {
        text: String,
    },
    Save {
        file_name: String,
        content: String,
    },
}

struct Services {
    api: Arc<dyn SummaryApi>,
    clipboard: Arc<dyn Clipboard>,
    csv: CsvSettings,
    output_dir: PathBuf,
}

/// Runs effects on a background thread. Every command yields exactly one event.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        api: Arc<dyn SummaryApi>,
        clipboard: Arc<dyn Clipboard>,
        csv: CsvSettings,
        output_dir: PathBuf,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new().map_err(EngineError::Runtime)?;
        let services = Arc::new(Services {
            api,
            clipboard,
            csv,
            output_dir,
        });

        thread::Builder::new()
            .name("summarizer-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let services = services.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(&services, command).await;
                        let _ = event_tx.send(event);
                    });
                }
            })
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn check_health(&self) {
        self.send(EngineCommand::CheckHealth);
    }

    pub fn summarize(&self, request_id: RequestId, text: impl Into<String>) {
        self.send(EngineCommand::Summarize {
            request_id,
            text: text.into(),
        });
    }

    pub fn summarize_file(&self, request_id: RequestId, path: PathBuf, options: UploadOptions) {
        self.send(EngineCommand::SummarizeFile {
            request_id,
            path,
            options,
        });
    }

    pub fn load_csv(&self, path: PathBuf) {
        self.send(EngineCommand::LoadCsv { path });
    }

    pub fn copy(&self, text: impl Into<String>) {
        self.send(EngineCommand::Copy { text: text.into() });
    }

    pub fn save(&self, file_name: impl Into<String>, content: impl Into<String>) {
        self.send(EngineCommand::Save {
            file_name: file_name.into(),
            content: content.into(),
        });
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            app_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(services: &Services, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::CheckHealth => {
            let online = match services.api.health().await {
                Ok(online) => online,
                Err(err) => {
                    app_warn!("Health check failed: {}", err);
                    false
                }
            };
            EngineEvent::HealthChecked { online }
        }
        EngineCommand::Summarize { request_id, text } => {
            let result = services.api.summarize(&text).await;
            EngineEvent::SummaryCompleted { request_id, result }
        }
        EngineCommand::SummarizeFile {
            request_id,
            path,
            options,
        } => {
            let result = services.api.summarize_file(&path, options).await;
            EngineEvent::FileSummaryCompleted { request_id, result }
        }
        EngineCommand::LoadCsv { path } => {
            let settings = services.csv.clone();
            let result = tokio::task::spawn_blocking(move || load_csv(&path, &settings))
                .await
                .unwrap_or_else(|err| Err(CsvError::Io(err.to_string())));
            EngineEvent::CsvLoaded { result }
        }
        EngineCommand::Copy { text } => {
            let clipboard = services.clipboard.clone();
            let result = tokio::task::spawn_blocking(move || clipboard.copy(&text))
                .await
                .map_err(|err| err.to_string())
                .and_then(|copied| copied.map_err(|err| err.to_string()));
            EngineEvent::Copied { result }
        }
        EngineCommand::Save { file_name, content } => {
            let writer = AtomicFileWriter::new(services.output_dir.clone());
            let result = tokio::task::spawn_blocking(move || writer.write(&file_name, &content))
                .await
                .map_err(|err| err.to_string())
                .and_then(|saved| saved.map_err(|err| err.to_string()));
            if let Ok(path) = &result {
                app_debug!("Saved output to {:?}", path);
            }
            EngineEvent::Saved { result }
        }
    }
}
