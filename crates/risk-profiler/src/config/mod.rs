use std::env;
use std::error::Error;
use std::fmt;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::num::ParseIntError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_OCR_CONFIDENCE_THRESHOLD: u8 = 60;
pub const DEFAULT_OCR_MAX_ATTEMPTS: u32 = 2;
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Deployment environment resolved from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

/// Process configuration assembled from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub ocr: OcrConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OcrConfig {
    /// Minimum acceptable raw engine confidence, in percent.
    pub confidence_threshold: u8,
    /// Recognition attempts allowed before the best capture so far wins.
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

impl AppConfig {
    /// Reads configuration from the process environment, falling back to
    /// development defaults for anything unset.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = env::var("APP_ENV")
            .map(|raw| AppEnvironment::parse(&raw))
            .unwrap_or(AppEnvironment::Development);

        let host = env::var("APP_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("APP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value: raw, source })?,
            Err(_) => DEFAULT_PORT,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        let confidence_threshold = match env::var("OCR_CONFIDENCE_THRESHOLD") {
            Ok(raw) => match raw.parse::<u8>() {
                Ok(value) if value <= 100 => value,
                _ => return Err(ConfigError::InvalidOcrThreshold { value: raw }),
            },
            Err(_) => DEFAULT_OCR_CONFIDENCE_THRESHOLD,
        };

        let max_attempts = match env::var("OCR_MAX_ATTEMPTS") {
            Ok(raw) => match raw.parse::<u32>() {
                Ok(value) if value >= 1 => value,
                _ => return Err(ConfigError::InvalidOcrAttempts { value: raw }),
            },
            Err(_) => DEFAULT_OCR_MAX_ATTEMPTS,
        };

        let max_bytes = match env::var("UPLOAD_MAX_BYTES") {
            Ok(raw) => raw
                .parse::<usize>()
                .map_err(|source| ConfigError::InvalidUploadLimit { value: raw, source })?,
            Err(_) => DEFAULT_UPLOAD_MAX_BYTES,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            ocr: OcrConfig {
                confidence_threshold,
                max_attempts,
            },
            upload: UploadConfig { max_bytes },
        })
    }
}

impl ServerConfig {
    /// Resolves the configured host and port into a bindable socket address.
    /// `localhost` is accepted as an alias for the IPv4 loopback address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::from(([127, 0, 0, 1], self.port)));
        }
        let ip: IpAddr = self.host.parse().map_err(|source| ConfigError::InvalidHost {
            value: self.host.clone(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort { value: String, source: ParseIntError },
    InvalidHost { value: String, source: AddrParseError },
    InvalidOcrThreshold { value: String },
    InvalidOcrAttempts { value: String },
    InvalidUploadLimit { value: String, source: ParseIntError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort { value, .. } => {
                write!(f, "APP_PORT must be a valid TCP port (got '{value}')")
            }
            ConfigError::InvalidHost { value, .. } => {
                write!(f, "APP_HOST must be an IP address or 'localhost' (got '{value}')")
            }
            ConfigError::InvalidOcrThreshold { value } => write!(
                f,
                "OCR_CONFIDENCE_THRESHOLD must be a percentage between 0 and 100 (got '{value}')"
            ),
            ConfigError::InvalidOcrAttempts { value } => {
                write!(f, "OCR_MAX_ATTEMPTS must be a positive integer (got '{value}')")
            }
            ConfigError::InvalidUploadLimit { value, .. } => {
                write!(f, "UPLOAD_MAX_BYTES must be a byte count (got '{value}')")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::InvalidPort { source, .. } => Some(source),
            ConfigError::InvalidHost { source, .. } => Some(source),
            ConfigError::InvalidUploadLimit { source, .. } => Some(source),
            ConfigError::InvalidOcrThreshold { .. } | ConfigError::InvalidOcrAttempts { .. } => {
                None
            }
        }
    }
}
