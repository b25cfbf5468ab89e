use std::io::{self, Write};
use std::process::{Command, Stdio};

use summarizer_logging::app_debug;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("буфер обмена недоступен: не найдена ни одна из программ {0}")]
    Unavailable(String),
    #[error("{program} завершилась с ошибкой: {message}")]
    Failed { program: String, message: String },
}

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies through the platform's clipboard command line tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CANDIDATES: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        for (program, args) in CANDIDATES {
            match pipe_to(program, args, text) {
                Ok(()) => {
                    app_debug!("Copied {} bytes via {}", text.len(), program);
                    return Ok(());
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => {
                    return Err(ClipboardError::Failed {
                        program: program.to_string(),
                        message: err.to_string(),
                    })
                }
            }
        }
        let names: Vec<_> = CANDIDATES.iter().map(|(program, _)| *program).collect();
        Err(ClipboardError::Unavailable(names.join(", ")))
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("exit status {status}")))
    }
}
