use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use summarizer_core::{ApiConfig, UploadOptions, UPLOAD_EXTENSIONS};
use summarizer_logging::{app_debug, app_info, app_warn};

use crate::wire::{self, SummarizeRequest};
use crate::{ApiError, FailureKind, FileSummary};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Upper bound for any response body.
    pub max_response_bytes: u64,
    /// Upper bound for files sent to the file endpoint.
    pub max_upload_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_response_bytes: 5 * 1024 * 1024,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait SummaryApi: Send + Sync {
    /// True when the service answers its health check with `status: "ok"`.
    async fn health(&self) -> Result<bool, ApiError>;

    async fn summarize(&self, text: &str) -> Result<String, ApiError>;

    async fn summarize_file(
        &self,
        path: &Path,
        options: UploadOptions,
    ) -> Result<FileSummary, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    config: ApiConfig,
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(config: ApiConfig, settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            config,
            settings,
            client,
        })
    }

    /// Read the body under the size cap and turn non-2xx statuses into errors.
    async fn read_checked(&self, response: Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        let bytes = self.read_body(response).await?;
        if !status.is_success() {
            let message = wire::error_message(status.as_u16(), &bytes);
            app_warn!("API answered {}: {}", status, message);
            return Err(ApiError::new(FailureKind::HttpStatus(status.as_u16()), message));
        }
        Ok(bytes)
    }

    async fn read_body(&self, response: Response) -> Result<Vec<u8>, ApiError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl SummaryApi for ReqwestApi {
    async fn health(&self) -> Result<bool, ApiError> {
        let url = parse_url(&self.config.health_url())?;
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            app_warn!("Health check answered {}", response.status());
            return Ok(false);
        }
        let body = self.read_body(response).await?;
        Ok(wire::decode_health(&body))
    }

    async fn summarize(&self, text: &str) -> Result<String, ApiError> {
        let url = parse_url(&self.config.summarize_url())?;
        let body = serde_json::to_vec(&SummarizeRequest { text })
            .map_err(|err| ApiError::new(FailureKind::InvalidResponse, err.to_string()))?;
        app_info!("POST {} text_len={}", url, text.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let bytes = self.read_checked(response).await?;
        let summary = wire::decode_summary(&bytes)?;
        app_debug!("Summary received, {} chars", summary.chars().count());
        Ok(summary)
    }

    async fn summarize_file(
        &self,
        path: &Path,
        options: UploadOptions,
    ) -> Result<FileSummary, ApiError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|ext| UPLOAD_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| {
                ApiError::new(
                    FailureKind::UnsupportedFile,
                    "поддерживаются только файлы .csv, .json или .jsonl",
                )
            })?;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|err| ApiError::new(FailureKind::Io, err.to_string()))?;
        if metadata.len() > self.settings.max_upload_bytes {
            return Err(too_large(self.settings.max_upload_bytes, Some(metadata.len())));
        }
        let content = tokio::fs::read(path)
            .await
            .map_err(|err| ApiError::new(FailureKind::Io, err.to_string()))?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let part = Part::bytes(content)
            .file_name(file_name.clone())
            .mime_str(mime_for(&extension))
            .map_err(|err| ApiError::new(FailureKind::UnsupportedFile, err.to_string()))?;
        let form = Form::new().part("file", part);

        let mut url = parse_url(&self.config.summarize_file_url())?;
        url.query_pairs_mut()
            .append_pair("combine", bool_str(options.combine))
            .append_pair("detail", bool_str(options.detail));
        app_info!("POST {} file={} bytes={}", url, file_name, metadata.len());

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let bytes = self.read_checked(response).await?;
        wire::decode_file_summary(&bytes)
    }
}

fn parse_url(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw).map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn mime_for(extension: &str) -> &'static str {
    match extension {
        "csv" => "text/csv",
        "jsonl" => "application/x-ndjson",
        _ => "application/json",
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> ApiError {
    ApiError::new(
        FailureKind::TooLarge { max_bytes, actual },
        format!("слишком большой объём данных (макс. {max_bytes} байт)"),
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, "превышено время ожидания ответа API");
    }
    ApiError::new(FailureKind::Network, format!("не удалось связаться с API ({err})"))
}
