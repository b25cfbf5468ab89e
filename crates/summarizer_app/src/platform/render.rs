use summarizer_core::AppViewModel;

const LOADING_TEXT: &str = "Обработка...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// The summary itself, so it can be piped.
    Stdout(String),
    /// Counters, progress and status messages.
    Stderr(String),
}

/// Turn the difference between two view models into terminal output.
pub fn render(previous: &AppViewModel, view: &AppViewModel) -> Vec<Line> {
    let mut lines = Vec::new();

    if view.loading && !previous.loading {
        lines.push(Line::Stderr(LOADING_TEXT.to_string()));
    }

    if view.input != previous.input {
        if let Some(rows) = view.csv_row_count {
            lines.push(Line::Stderr(format!(
                "CSV: {} строк | {}",
                rows,
                view.input_counter()
            )));
        }
    }

    if view.upload_file != previous.upload_file {
        if let Some(path) = &view.upload_file {
            lines.push(Line::Stderr(format!("Файл: {}", path.display())));
        }
    }

    if view.output != previous.output && !view.output.is_empty() {
        if view.output_failed {
            lines.push(Line::Stderr(view.output.clone()));
        } else {
            lines.push(Line::Stdout(view.output.clone()));
            lines.push(Line::Stderr(view.output_counter()));
        }
    }

    if view.status != previous.status {
        if let Some(status) = &view.status {
            lines.push(Line::Stderr(status.clone()));
        }
    }

    lines
}
