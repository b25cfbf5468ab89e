use url::Url;

/// Endpoint root used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoints {
    health: String,
    summarize: String,
    summarize_file: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            health: "/health".to_string(),
            summarize: "/summarize".to_string(),
            summarize_file: "/summarize-file".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API base url {value:?}: {message}")]
    InvalidBaseUrl { value: String, message: String },
    #[error("unsupported scheme {scheme:?} in API base url {value:?}")]
    UnsupportedScheme { value: String, scheme: String },
    #[error("API base url {value:?} must not carry a query or fragment")]
    QueryOrFragment { value: String },
}

/// API location, resolved once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    endpoints: Endpoints,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

impl ApiConfig {
    /// Resolve the configuration from an optional base url override.
    ///
    /// A missing or blank override yields the default root. Anything else must
    /// parse as an absolute http(s) url without a query or fragment, since
    /// endpoint paths are appended to it.
    pub fn resolve(override_url: Option<&str>) -> Result<Self, ConfigError> {
        let raw = match override_url.map(str::trim) {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(Self::default()),
        };

        let parsed = Url::parse(raw).map_err(|err| ConfigError::InvalidBaseUrl {
            value: raw.to_string(),
            message: err.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::UnsupportedScheme {
                    value: raw.to_string(),
                    scheme: other.to_string(),
                })
            }
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::QueryOrFragment {
                value: raw.to_string(),
            });
        }

        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
            endpoints: Endpoints::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn health_url(&self) -> String {
        self.join(&self.endpoints.health)
    }

    pub fn summarize_url(&self) -> String {
        self.join(&self.endpoints.summarize)
    }

    pub fn summarize_file_url(&self) -> String {
        self.join(&self.endpoints.summarize_file)
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
