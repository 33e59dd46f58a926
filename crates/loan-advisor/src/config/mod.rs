use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use url::Url;

use crate::evaluation::request::PayloadFormat;
use crate::evaluation::retry::RetryPolicy;

/// Endpoint used when `EVALUATION_ENDPOINT` is unset; matches a locally running evaluation service.
pub const DEFAULT_EVALUATION_ENDPOINT: &str = "http://localhost:5000/api/evaluate_case";

const DEFAULT_RETRY_BASE_MS: u64 = 200;

/// Distinguishes runtime behavior for different stages of the deployment.
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
    pub evaluation: EvaluationClientConfig,
    pub stub: StubServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let endpoint = parse_endpoint(
            &env::var("EVALUATION_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_EVALUATION_ENDPOINT.to_string()),
        )?;

        let timeout = match env::var("EVALUATION_TIMEOUT_SECS") {
            Ok(raw) => Some(timeout_from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout)?,
            )?),
            Err(_) => None,
        };

        let max_retries = env::var("EVALUATION_MAX_RETRIES")
            .unwrap_or_else(|_| "0".to_string())
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidRetries)?;

        let base_delay_ms = env::var("EVALUATION_RETRY_BASE_MS")
            .unwrap_or_else(|_| DEFAULT_RETRY_BASE_MS.to_string())
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidRetries)?;

        let payload = match env::var("EVALUATION_PAYLOAD") {
            Ok(raw) => PayloadFormat::from_label(&raw)
                .ok_or(ConfigError::InvalidPayloadFormat { value: raw })?,
            Err(_) => PayloadFormat::default(),
        };

        let host = env::var("STUB_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("STUB_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            evaluation: EvaluationClientConfig {
                endpoint,
                timeout,
                retry: RetryPolicy {
                    max_retries,
                    base_delay: Duration::from_millis(base_delay_ms),
                },
                payload,
            },
            stub: StubServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
        })
    }
}

/// Where and how submissions reach the evaluation service.
///
/// The defaults reproduce the plain form handler: one attempt, no timeout, canonical payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationClientConfig {
    pub endpoint: Url,
    pub timeout: Option<Duration>,
    pub retry: RetryPolicy,
    pub payload: PayloadFormat,
}

impl EvaluationClientConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: None,
            retry: RetryPolicy::default(),
            payload: PayloadFormat::default(),
        }
    }
}

/// Parses an evaluation endpoint, accepting only http and https URLs.
pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidEndpoint {
        value: raw.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

/// Request timeout in whole seconds. Zero would fail every submission before it is sent.
pub fn timeout_from_secs(secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout);
    }
    Ok(Duration::from_secs(secs))
}

/// Bind address for the demonstration stub service.
#[derive(Debug, Clone)]
pub struct StubServerConfig {
    pub host: String,
    pub port: u16,
}

impl StubServerConfig {
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
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidEndpoint {
        value: String,
        source: url::ParseError,
    },
    UnsupportedScheme {
        scheme: String,
    },
    InvalidTimeout,
    InvalidRetries,
    InvalidPayloadFormat {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "STUB_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "STUB_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidEndpoint { value, .. } => {
                write!(f, "EVALUATION_ENDPOINT '{value}' is not a valid URL")
            }
            ConfigError::UnsupportedScheme { scheme } => {
                write!(f, "EVALUATION_ENDPOINT must use http or https, got '{scheme}'")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "EVALUATION_TIMEOUT_SECS must be a positive whole number of seconds")
            }
            ConfigError::InvalidRetries => write!(
                f,
                "EVALUATION_MAX_RETRIES and EVALUATION_RETRY_BASE_MS must be non-negative integers"
            ),
            ConfigError::InvalidPayloadFormat { value } => write!(
                f,
                "EVALUATION_PAYLOAD must be 'canonical' or 'legacy', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidEndpoint { source, .. } => Some(source),
            _ => None,
        }
    }
}
