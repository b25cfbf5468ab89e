use std::io::Write;
use std::time::{Duration, Instant};

use summarizer_core::{update, AppState, AppViewModel, Msg};
use summarizer_logging::{app_debug, app_error};

use super::effects::EffectRunner;
use super::render::{render, Line};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How a scripted session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    /// An alert was shown, the summary failed, or the API is offline.
    Failed,
}

/// Drives the controller with a scripted sequence of user actions.
pub struct Session {
    state: AppState,
    last_view: AppViewModel,
    runner: EffectRunner,
    wait_limit: Duration,
    failed: bool,
}

impl Session {
    /// `wait_limit` bounds how long one action may wait for the engine.
    pub fn new(runner: EffectRunner, wait_limit: Duration) -> Self {
        let state = AppState::new();
        let last_view = state.view();
        Self {
            state,
            last_view,
            runner,
            wait_limit,
            failed: false,
        }
    }

    pub fn run(mut self, script: Vec<Msg>) -> SessionOutcome {
        for msg in script {
            self.dispatch_msg(msg);
            self.drain_engine();
            // Copy/download steps are skipped once a step has failed.
            if self.failed || self.last_view.output_failed {
                break;
            }
        }

        let view = self.state.view();
        if view.output_failed || view.api_online == Some(false) {
            self.failed = true;
        }
        if self.failed {
            SessionOutcome::Failed
        } else {
            SessionOutcome::Completed
        }
    }

    fn drain_engine(&mut self) {
        let deadline = Instant::now() + self.wait_limit;
        while self.runner.pending() > 0 {
            match self.runner.next_msg(POLL_INTERVAL) {
                Some(msg) => self.dispatch_msg(msg),
                None if Instant::now() >= deadline => {
                    app_error!(
                        "Gave up waiting for {} engine result(s)",
                        self.runner.pending()
                    );
                    self.failed = true;
                    return;
                }
                None => {}
            }
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        app_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let view = state.view();
            emit(render(&self.last_view, &view));
            self.last_view = view;
        }
        self.state = state;

        for alert in self.runner.enqueue(effects) {
            self.failed = true;
            emit(vec![Line::Stderr(format!("! {alert}"))]);
        }
    }
}

fn emit(lines: Vec<Line>) {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    for line in lines {
        let _ = match line {
            Line::Stdout(text) => writeln!(stdout.lock(), "{text}"),
            Line::Stderr(text) => writeln!(stderr.lock(), "{text}"),
        };
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use summarizer_core::UploadOptions;
    use summarizer_engine::{
        ApiError, Clipboard, ClipboardError, CsvSettings, EngineHandle, FailureKind, FileSummary,
        SummaryApi,
    };
    use tempfile::TempDir;

    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    struct ScriptedApi {
        online: bool,
        summary: Result<String, ApiError>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn answering(summary: Result<String, ApiError>) -> Self {
            Self {
                online: true,
                summary,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl SummaryApi for ScriptedApi {
        async fn health(&self) -> Result<bool, ApiError> {
            Ok(self.online)
        }

        async fn summarize(&self, _text: &str) -> Result<String, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.summary.clone()
        }

        async fn summarize_file(
            &self,
            _path: &Path,
            _options: UploadOptions,
        ) -> Result<FileSummary, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.summary.clone().map(|text| FileSummary {
                text,
                stats: None,
                filename: None,
            })
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Mutex<Vec<String>>,
    }

    impl Clipboard for RecordingClipboard {
        fn copy(&self, text: &str) -> Result<(), ClipboardError> {
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn session(
        api: Arc<ScriptedApi>,
        clipboard: Arc<RecordingClipboard>,
        output_dir: &Path,
        wait_limit: Duration,
    ) -> Session {
        summarizer_logging::initialize_for_tests();
        let engine = EngineHandle::new(
            api,
            clipboard,
            CsvSettings::default(),
            output_dir.to_path_buf(),
        )
        .expect("engine");
        Session::new(EffectRunner::new(engine), wait_limit)
    }

    fn copy_script(text: &str) -> Vec<Msg> {
        vec![
            Msg::InputChanged(text.to_string()),
            Msg::SubmitClicked,
            Msg::CopyClicked,
        ]
    }

    #[test]
    fn successful_summary_is_copied() {
        let temp = TempDir::new().unwrap();
        let api = Arc::new(ScriptedApi::answering(Ok("X".to_string())));
        let clipboard = Arc::new(RecordingClipboard::default());

        let outcome = session(api.clone(), clipboard.clone(), temp.path(), WAIT)
            .run(copy_script("great tea"));

        assert_eq!(outcome, SessionOutcome::Completed);
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*clipboard.copied.lock().unwrap(), vec!["X".to_string()]);
    }

    #[test]
    fn failed_summary_skips_copy_and_fails() {
        let temp = TempDir::new().unwrap();
        let api = Arc::new(ScriptedApi::answering(Err(ApiError {
            kind: FailureKind::HttpStatus(500),
            message: "M".to_string(),
        })));
        let clipboard = Arc::new(RecordingClipboard::default());

        let outcome = session(api.clone(), clipboard.clone(), temp.path(), WAIT)
            .run(copy_script("great tea"));

        assert_eq!(outcome, SessionOutcome::Failed);
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert!(clipboard.copied.lock().unwrap().is_empty());
    }

    #[test]
    fn blank_input_alerts_without_calling_api() {
        let temp = TempDir::new().unwrap();
        let api = Arc::new(ScriptedApi::answering(Ok("X".to_string())));
        let clipboard = Arc::new(RecordingClipboard::default());

        let outcome = session(api.clone(), clipboard.clone(), temp.path(), WAIT)
            .run(copy_script("  \n\t "));

        assert_eq!(outcome, SessionOutcome::Failed);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(clipboard.copied.lock().unwrap().is_empty());
    }

    #[test]
    fn offline_api_fails_health_session() {
        let temp = TempDir::new().unwrap();
        let api = Arc::new(ScriptedApi {
            online: false,
            ..ScriptedApi::answering(Ok("X".to_string()))
        });

        let outcome = session(api, Arc::default(), temp.path(), WAIT)
            .run(vec![Msg::HealthCheckRequested]);

        assert_eq!(outcome, SessionOutcome::Failed);
    }

    #[test]
    fn online_api_completes_health_session() {
        let temp = TempDir::new().unwrap();
        let api = Arc::new(ScriptedApi::answering(Ok("X".to_string())));

        let outcome = session(api, Arc::default(), temp.path(), WAIT)
            .run(vec![Msg::HealthCheckRequested]);

        assert_eq!(outcome, SessionOutcome::Completed);
    }

    #[test]
    fn engine_silence_past_wait_limit_fails() {
        let temp = TempDir::new().unwrap();
        let api = Arc::new(ScriptedApi {
            delay: Duration::from_secs(3),
            ..ScriptedApi::answering(Ok("X".to_string()))
        });
        let clipboard = Arc::new(RecordingClipboard::default());

        let outcome = session(api, clipboard.clone(), temp.path(), Duration::from_millis(300))
            .run(copy_script("great tea"));

        assert_eq!(outcome, SessionOutcome::Failed);
        assert!(clipboard.copied.lock().unwrap().is_empty());
    }
}
