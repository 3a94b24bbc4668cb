use crate::evaluation::PromptLanguage;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-15-preview";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub backend: BackendConfig,
    pub evaluation: EvaluationSettings,
    pub sources_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            backend: BackendConfig::from_env()?,
            evaluation: EvaluationSettings::from_env()?,
            sources_dir: non_empty_var("EVAL_SOURCES_DIR").map(PathBuf::from),
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Azure,
    Stub,
}

impl BackendKind {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "azure" | "openai" | "azure_openai" => Ok(Self::Azure),
            "stub" | "offline" | "deterministic" => Ok(Self::Stub),
            _ => Err(ConfigError::InvalidBackend {
                value: value.to_string(),
            }),
        }
    }
}

/// Connection settings for an Azure OpenAI chat deployment.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AzureCredentials {
    #[serde(rename = "azure_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    #[serde(rename = "deployment_name")]
    pub deployment: String,
}

impl fmt::Debug for AzureCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureCredentials")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .finish()
    }
}

const CREDENTIAL_FILE_KEYS: [&str; 4] = ["azure_endpoint", "api_key", "api_version", "deployment_name"];

impl AzureCredentials {
    /// Reads a JSON credential file; all four keys must be present.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::CredentialsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|source| ConfigError::CredentialsJson {
                path: path.to_path_buf(),
                source,
            })?;

        let missing: Vec<String> = CREDENTIAL_FILE_KEYS
            .iter()
            .filter(|key| value.get(**key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys {
                path: path.to_path_buf(),
                keys: missing,
            });
        }

        serde_json::from_value(value).map_err(|source| ConfigError::CredentialsJson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns `None` unless endpoint, key and deployment are all set.
    fn from_env() -> Option<Self> {
        Some(Self {
            endpoint: non_empty_var("AZURE_OPENAI_ENDPOINT")?,
            api_key: non_empty_var("AZURE_OPENAI_API_KEY")?,
            api_version: non_empty_var("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string()),
            deployment: non_empty_var("AZURE_OPENAI_DEPLOYMENT")?,
        })
    }
}

/// Which completion backend to build, and with what credentials.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub azure: Option<AzureCredentials>,
}

impl BackendConfig {
    pub fn stub() -> Self {
        Self {
            kind: BackendKind::Stub,
            azure: None,
        }
    }

    pub fn azure(credentials: AzureCredentials) -> Self {
        Self {
            kind: BackendKind::Azure,
            azure: Some(credentials),
        }
    }

    /// An unusable credential file leaves `azure` unset rather than failing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let kind = match non_empty_var("EVAL_BACKEND") {
            Some(value) => BackendKind::parse(&value)?,
            None => BackendKind::Azure,
        };

        let azure = match kind {
            BackendKind::Stub => None,
            BackendKind::Azure => match non_empty_var("EVAL_BACKEND_CONFIG") {
                Some(path) => match AzureCredentials::from_file(&path) {
                    Ok(credentials) => Some(credentials),
                    Err(err) => {
                        warn!(error = %err, "backend credentials unavailable, using deterministic backend");
                        None
                    }
                },
                None => AzureCredentials::from_env(),
            },
        };

        Ok(Self { kind, azure })
    }
}

/// Engine knobs shared by the service and the command-line driver.
#[derive(Debug, Clone)]
pub struct EvaluationSettings {
    pub language: PromptLanguage,
    pub backend_timeout: Duration,
    pub log_prompts: bool,
    pub log_judgments: bool,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            language: PromptLanguage::default(),
            backend_timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
            log_prompts: false,
            log_judgments: false,
        }
    }
}

impl EvaluationSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let language = match non_empty_var("EVAL_PROMPT_LANGUAGE") {
            Some(value) => {
                PromptLanguage::parse(&value).ok_or(ConfigError::InvalidLanguage { value })?
            }
            None => PromptLanguage::default(),
        };

        let backend_timeout = match non_empty_var("EVAL_BACKEND_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout { value }),
            },
            None => Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
        };

        Ok(Self {
            language,
            backend_timeout,
            log_prompts: flag_var("LOG_PROMPTS"),
            log_judgments: flag_var("LOG_LLM"),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn flag_var(name: &str) -> bool {
    non_empty_var(name)
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout { value: String },
    InvalidBackend { value: String },
    InvalidLanguage { value: String },
    CredentialsIo { path: PathBuf, source: std::io::Error },
    CredentialsJson { path: PathBuf, source: serde_json::Error },
    MissingKeys { path: PathBuf, keys: Vec<String> },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout { value } => write!(
                f,
                "EVAL_BACKEND_TIMEOUT_SECS must be a positive integer, got '{}'",
                value
            ),
            ConfigError::InvalidBackend { value } => {
                write!(f, "EVAL_BACKEND must be 'azure' or 'stub', got '{}'", value)
            }
            ConfigError::InvalidLanguage { value } => {
                write!(f, "EVAL_PROMPT_LANGUAGE must be 'en' or 'tr', got '{}'", value)
            }
            ConfigError::CredentialsIo { path, .. } => {
                write!(f, "unable to read backend config {}", path.display())
            }
            ConfigError::CredentialsJson { path, .. } => {
                write!(f, "backend config {} is not valid JSON", path.display())
            }
            ConfigError::MissingKeys { path, keys } => write!(
                f,
                "backend config {} is missing required keys: {}",
                path.display(),
                keys.join(", ")
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::CredentialsIo { source, .. } => Some(source),
            ConfigError::CredentialsJson { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout { .. }
            | ConfigError::InvalidBackend { .. }
            | ConfigError::InvalidLanguage { .. }
            | ConfigError::MissingKeys { .. } => None,
        }
    }
}

/// Serializes tests that touch process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}
