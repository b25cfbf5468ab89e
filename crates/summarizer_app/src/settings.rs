//! Settings resolution: CLI flag > `API_BASE_URL` > RON settings file > defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use summarizer_core::{ApiConfig, ConfigError};
use summarizer_engine::{ClientSettings, CsvSettings};
use summarizer_logging::app_info;

const DEFAULT_SETTINGS_FILE: &str = "summarizer.ron";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Optional overrides read from the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: Option<u64>,
    pub max_upload_bytes: Option<u64>,
    pub max_csv_rows: Option<usize>,
    pub max_csv_bytes: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub client: ClientSettings,
    pub csv: CsvSettings,
    pub output_dir: PathBuf,
}

/// Load the settings file. An explicit path must exist; the default one may not.
pub fn load_file_settings(explicit: Option<&Path>) -> Result<FileSettings, SettingsError> {
    let path = explicit.unwrap_or(Path::new(DEFAULT_SETTINGS_FILE));
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
            return Ok(FileSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let settings = ron::from_str(&content).map_err(|err| SettingsError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    app_info!("Loaded settings from {:?}", path);
    Ok(settings)
}

impl Settings {
    pub fn resolve(base_url: Option<&str>, file: FileSettings) -> Result<Self, SettingsError> {
        let api = ApiConfig::resolve(base_url.or(file.base_url.as_deref()))?;

        let mut client = ClientSettings::default();
        if let Some(secs) = file.connect_timeout_secs {
            client.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.request_timeout_secs {
            client.request_timeout = Duration::from_secs(secs);
        }
        if let Some(bytes) = file.max_response_bytes {
            client.max_response_bytes = bytes;
        }
        if let Some(bytes) = file.max_upload_bytes {
            client.max_upload_bytes = bytes;
        }

        let mut csv = CsvSettings::default();
        if let Some(rows) = file.max_csv_rows {
            csv.max_rows = rows;
        }
        if let Some(bytes) = file.max_csv_bytes {
            csv.max_bytes = bytes;
        }

        Ok(Self {
            api,
            client,
            csv,
            output_dir: file.output_dir.unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}
