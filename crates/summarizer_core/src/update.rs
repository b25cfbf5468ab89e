use crate::input::has_extension;
use crate::{
    has_csv_extension, join_rows, normalize_input, AppState, Effect, Msg, SUMMARY_FILE_NAME,
    UPLOAD_EXTENSIONS,
};

/// User-facing alert texts.
pub mod alerts {
    pub const EMPTY_INPUT: &str = "Введите текст или загрузите CSV файл.";
    pub const NOT_CSV: &str = "Пожалуйста, выберите CSV файл.";
    pub const UNSUPPORTED_UPLOAD: &str = "Поддерживаются только файлы .csv, .json или .jsonl.";
    pub const NO_UPLOAD: &str = "Сначала выберите файл.";
    pub const NO_ROWS: &str = "В файле нет текста для суммаризации.";
    pub const CSV_READ_FAILED: &str = "Ошибка чтения CSV: ";
    pub const COPY_FAILED: &str = "Не удалось скопировать: ";
    pub const SAVE_FAILED: &str = "Не удалось сохранить файл: ";

    pub const STATUS_COPIED: &str = "Скопировано!";
    pub const STATUS_SAVED: &str = "Сохранено: ";
    pub const STATUS_API_ONLINE: &str = "API доступен";
    pub const STATUS_API_OFFLINE: &str = "API недоступен";
}

fn alert(message: impl Into<String>) -> Vec<Effect> {
    vec![Effect::Alert {
        message: message.into(),
    }]
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::ClearClicked => {
            state.set_input(String::new());
            Vec::new()
        }
        Msg::TabSelected(tab) => {
            state.select_tab(tab);
            Vec::new()
        }
        Msg::CsvFileSelected(path) => {
            if !has_csv_extension(&path) {
                return (state, alert(alerts::NOT_CSV));
            }
            state.set_parsing(true);
            vec![Effect::LoadCsv { path }]
        }
        Msg::CsvLoaded(result) => {
            state.set_parsing(false);
            match result {
                Ok(rows) if rows.is_empty() => alert(alerts::NO_ROWS),
                Ok(rows) => {
                    let text = join_rows(&rows);
                    state.set_csv_rows(text, rows);
                    Vec::new()
                }
                Err(message) => alert(format!("{}{message}", alerts::CSV_READ_FAILED)),
            }
        }
        Msg::UploadFileSelected(path) => {
            if !has_extension(&path, UPLOAD_EXTENSIONS) {
                return (state, alert(alerts::UNSUPPORTED_UPLOAD));
            }
            state.set_upload(path);
            state.select_tab(crate::Tab::File);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.has_request_in_flight() {
                return (state, Vec::new());
            }
            let text = match normalize_input(state.input(), state.csv_rows()) {
                Ok(text) => text,
                Err(_) => return (state, alert(alerts::EMPTY_INPUT)),
            };
            let csv_rows = state.csv_rows().map(<[_]>::len).filter(|n| *n > 0);
            let request_id = state.begin_request(csv_rows);
            vec![Effect::Summarize { request_id, text }]
        }
        Msg::SubmitFileClicked(options) => {
            if state.has_request_in_flight() {
                return (state, Vec::new());
            }
            let Some(path) = state.upload().map(ToOwned::to_owned) else {
                return (state, alert(alerts::NO_UPLOAD));
            };
            let request_id = state.begin_request(None);
            vec![Effect::SummarizeFile {
                request_id,
                path,
                options,
            }]
        }
        Msg::SummaryReceived {
            request_id,
            outcome,
            rows,
        } => {
            // Responses for anything but the current request are dropped.
            let Some(csv_rows) = state.finish_request(request_id) else {
                return (state, Vec::new());
            };
            match outcome {
                Ok(summary) => state.set_output(summary, rows.or(csv_rows), false),
                Err(failure) => state.set_output(failure.output_text(), None, true),
            }
            Vec::new()
        }
        Msg::CopyClicked => {
            if state.output().is_empty() {
                return (state, Vec::new());
            }
            vec![Effect::CopyToClipboard {
                text: state.output().to_string(),
            }]
        }
        Msg::CopyFinished(result) => match result {
            Ok(()) => {
                state.set_status(alerts::STATUS_COPIED);
                Vec::new()
            }
            Err(message) => alert(format!("{}{message}", alerts::COPY_FAILED)),
        },
        Msg::DownloadClicked => {
            if state.output().is_empty() {
                return (state, Vec::new());
            }
            vec![Effect::SaveOutput {
                file_name: SUMMARY_FILE_NAME.to_string(),
                content: state.output().to_string(),
            }]
        }
        Msg::DownloadFinished(result) => match result {
            Ok(path) => {
                state.set_status(format!("{}{}", alerts::STATUS_SAVED, path.display()));
                Vec::new()
            }
            Err(message) => alert(format!("{}{message}", alerts::SAVE_FAILED)),
        },
        Msg::HealthCheckRequested => vec![Effect::CheckHealth],
        Msg::HealthChecked { online } => {
            state.set_api_online(online);
            state.set_status(if online {
                alerts::STATUS_API_ONLINE
            } else {
                alerts::STATUS_API_OFFLINE
            });
            Vec::new()
        }
    };

    (state, effects)
}
