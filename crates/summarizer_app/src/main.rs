mod cli;
mod platform;
mod settings;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use summarizer_core::{Msg, UploadOptions};
use summarizer_engine::{decode_text, EngineHandle, ReqwestApi, SystemClipboard};
use summarizer_logging::{app_debug, app_info};

use cli::{Cli, Command, OutputArgs};
use platform::{EffectRunner, Session, SessionOutcome};
use settings::{load_file_settings, Settings};

const LOG_FILE: &str = "./summarizer.log";

fn main() -> ExitCode {
    match run() {
        Ok(SessionOutcome::Completed) => ExitCode::SUCCESS,
        Ok(SessionOutcome::Failed) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<SessionOutcome> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    summarizer_logging::initialize(cli.log.into(), level, PathBuf::from(LOG_FILE).as_path());

    let file_settings = load_file_settings(cli.config.as_deref())?;
    let settings = Settings::resolve(cli.base_url.as_deref(), file_settings)?;
    app_info!("Using API at {}", settings.api.base_url());

    let output_dir = download_dir(cli.command.output(), &settings);
    let script = build_script(&cli.command)?;

    let api = ReqwestApi::new(settings.api.clone(), settings.client.clone())
        .context("failed to build HTTP client")?;
    let engine = EngineHandle::new(
        Arc::new(api),
        Arc::new(SystemClipboard),
        settings.csv.clone(),
        output_dir,
    )?;

    // Must exceed the HTTP timeouts so the client's timeout error arrives first.
    let wait_limit = settings.client.connect_timeout
        + settings.client.request_timeout
        + Duration::from_secs(5);
    let session = Session::new(EffectRunner::new(engine), wait_limit);
    Ok(session.run(script))
}

fn download_dir(output: Option<&OutputArgs>, settings: &Settings) -> PathBuf {
    match output.and_then(|o| o.download.as_ref()) {
        Some(Some(dir)) => dir.clone(),
        _ => settings.output_dir.clone(),
    }
}

/// Read a text file in whatever encoding it was saved with.
fn read_text_file(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let decoded =
        decode_text(&bytes).with_context(|| format!("failed to decode {}", path.display()))?;
    app_debug!("Read {:?} as {}", path, decoded.encoding_label);
    Ok(decoded.text)
}

/// Translate the command line into the user actions a session replays.
fn build_script(command: &Command) -> Result<Vec<Msg>> {
    let mut script = match command {
        Command::Text(args) => {
            let text = match (&args.text, &args.file) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => read_text_file(path)?,
                (None, None) => {
                    let mut text = String::new();
                    std::io::stdin()
                        .read_to_string(&mut text)
                        .context("failed to read stdin")?;
                    text
                }
            };
            vec![Msg::InputChanged(text), Msg::SubmitClicked]
        }
        Command::Csv(args) => vec![
            Msg::CsvFileSelected(args.path.clone()),
            Msg::SubmitClicked,
        ],
        Command::Upload(args) => vec![
            Msg::UploadFileSelected(args.path.clone()),
            Msg::SubmitFileClicked(UploadOptions {
                combine: !args.separate,
                detail: !args.short,
            }),
        ],
        Command::Health => vec![Msg::HealthCheckRequested],
    };

    if let Some(output) = command.output() {
        if output.copy {
            script.push(Msg::CopyClicked);
        }
        if output.download.is_some() {
            script.push(Msg::DownloadClicked);
        }
    }
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cli::{CsvArgs, UploadArgs};

    #[test]
    fn csv_command_selects_file_then_submits() {
        let command = Command::Csv(CsvArgs {
            path: PathBuf::from("reviews.csv"),
            output: OutputArgs {
                copy: true,
                download: Some(None),
            },
        });

        let script = build_script(&command).unwrap();

        assert_eq!(
            script,
            vec![
                Msg::CsvFileSelected(PathBuf::from("reviews.csv")),
                Msg::SubmitClicked,
                Msg::CopyClicked,
                Msg::DownloadClicked,
            ]
        );
    }

    #[test]
    fn upload_flags_invert_into_options() {
        let command = Command::Upload(UploadArgs {
            path: PathBuf::from("r.json"),
            separate: true,
            short: false,
            output: OutputArgs::default(),
        });

        let script = build_script(&command).unwrap();

        assert_eq!(
            script[1],
            Msg::SubmitFileClicked(UploadOptions {
                combine: false,
                detail: true,
            })
        );
    }

    #[test]
    fn bare_download_flag_uses_configured_dir() {
        let settings = Settings::resolve(None, Default::default()).unwrap();
        let output = OutputArgs {
            copy: false,
            download: Some(None),
        };
        assert_eq!(download_dir(Some(&output), &settings), PathBuf::from("."));

        let output = OutputArgs {
            copy: false,
            download: Some(Some(PathBuf::from("exports"))),
        };
        assert_eq!(
            download_dir(Some(&output), &settings),
            PathBuf::from("exports")
        );
    }

    #[test]
    fn text_file_in_windows_1251_is_decoded() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("review.txt");
        let review = "Отличный чай, быстрая доставка и приятная упаковка. \
                      Вкус мягкий, аромат сильный, заварка держит три пролива.";
        let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(review);
        std::fs::write(&path, &bytes).unwrap();

        let command = Command::Text(cli::TextArgs {
            text: None,
            file: Some(path),
            output: OutputArgs::default(),
        });
        let script = build_script(&command).unwrap();

        assert_eq!(script[0], Msg::InputChanged(review.to_string()));
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "summarize",
            "text",
            "hello",
            "--base-url",
            "http://example.com",
            "--download",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://example.com"));
        match cli.command {
            Command::Text(args) => {
                assert_eq!(args.text.as_deref(), Some("hello"));
                assert_eq!(args.output.download, Some(None));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
