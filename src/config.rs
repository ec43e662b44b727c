//! Configuration loading and constants.
//!
//! Configuration is resolved once at startup: an optional TOML file supplies the
//! HTTP and logging sections, then environment variables supply the deployment
//! environment, the expected API key and the region label. `AppConfig` is the
//! resulting immutable value handed to the router.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

// =============================================================================
// HTTP
// =============================================================================

/// Header carrying the client-supplied API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// API responses are per-request and must not be cached by intermediaries
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Default bind host (all interfaces, the container runtime forwards the port)
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Seconds to wait for in-flight connections on shutdown
pub const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 30;

// =============================================================================
// Environment Defaults
// =============================================================================

/// API key used in the LOCAL environment when `API_KEY` is not set
pub const DEFAULT_LOCAL_API_KEY: &str = "bijonguha";

/// Region label reported when `AWS_REGION` is not set
pub const DEFAULT_AWS_REGION: &str = "ap-south-1";

/// Prefix of the service title reported by `/info`
pub const SERVICE_TITLE: &str = "Greeter";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default dotenv file path
pub const DEFAULT_DOTENV_PATH: &str = ".env";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "greeter=info";

/// Number of leading key characters kept when logging a rejected key
pub const API_KEY_LOG_PREFIX_CHARS: usize = 4;

/// Environment variable names read by [`AppConfig::resolve`]
pub mod env_vars {
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    pub const API_KEY: &str = "API_KEY";
    pub const AWS_REGION: &str = "AWS_REGION";
    pub const PORT: &str = "PORT";
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}

/// Deployment environment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    CloudDev,
    CloudProd,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "LOCAL",
            Environment::CloudDev => "CLOUD-DEV",
            Environment::CloudProd => "CLOUD-PROD",
        }
    }

    /// Cloud environments get their key injected by the platform and have no default.
    pub fn is_cloud(&self) -> bool {
        matches!(self, Environment::CloudDev | Environment::CloudProd)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOCAL" => Ok(Environment::Local),
            "CLOUD-DEV" => Ok(Environment::CloudDev),
            "CLOUD-PROD" => Ok(Environment::CloudProd),
            other => Err(ConfigError::Validation(format!(
                "Unsupported environment: {}",
                other
            ))),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Text,
    /// Structured, one JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Validation(format!(
                "Unsupported log format: {} (expected \"text\" or \"json\")",
                other
            ))),
        }
    }
}

/// Settings read from the optional TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub http: HttpServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default)]
    pub format: LogFormat,
}

/// Root configuration, immutable for the lifetime of the process.
#[derive(Clone)]
pub struct AppConfig {
    pub http: HttpServerConfig,
    pub logging: LoggingConfig,
    pub environment: Environment,
    /// Expected value of the `X-API-Key` header
    pub api_key: String,
    pub aws_region: String,
}

// Hand-written so the key never ends up in logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("http", &self.http)
            .field("logging", &self.logging)
            .field("environment", &self.environment)
            .field("api_key", &"<redacted>")
            .field("aws_region", &self.aws_region)
            .finish()
    }
}

impl AppConfig {
    /// Load from an optional TOML file plus the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Apply environment variables, looked up through `env`, on top of `file`.
    pub fn resolve<F>(file: FileConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let FileConfig { mut http, mut logging } = file;

        let environment = match env(env_vars::ENVIRONMENT) {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let api_key = match env(env_vars::API_KEY) {
            Some(key) if key.is_empty() => {
                return Err(ConfigError::Validation(format!(
                    "{} is set but empty",
                    env_vars::API_KEY
                )));
            }
            Some(key) => key,
            None if environment.is_cloud() => {
                return Err(ConfigError::Validation(format!(
                    "{} must be provided in the {} environment",
                    env_vars::API_KEY,
                    environment
                )));
            }
            None => DEFAULT_LOCAL_API_KEY.to_string(),
        };

        let aws_region = env(env_vars::AWS_REGION)
            .filter(|region| !region.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AWS_REGION.to_string());

        if let Some(port) = env(env_vars::PORT) {
            http.port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("Invalid {}: {}", env_vars::PORT, port))
            })?;
        }

        if let Some(format) = env(env_vars::LOG_FORMAT) {
            logging.format = format.parse()?;
        }

        Ok(Self {
            http,
            logging,
            environment,
            api_key,
            aws_region,
        })
    }

    /// Title reported by the info endpoint, e.g. "Greeter - LOCAL".
    pub fn title(&self) -> String {
        format!("{} - {}", SERVICE_TITLE, self.environment)
    }
}

/// Load `path` into the process environment if it exists.
///
/// Variables already set in the environment are not overridden. Returns whether
/// a file was loaded.
pub fn load_dotenv<P: AsRef<Path>>(path: P) -> Result<bool, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(false);
    }
    dotenvy::from_path(path)?;
    Ok(true)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to load environment file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
