use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use url::Url;

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
    pub site: SiteConfig,
    pub data: DataConfig,
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

        let hostname = env::var("APP_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let path = env::var("APP_PATH").unwrap_or_else(|_| "/".to_string());
        let site = SiteConfig::new(hostname, path)?;

        let data = DataConfig {
            legislators_path: env::var("RECALL_LEGISLATORS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DataConfig::DEFAULT_LEGISLATORS_PATH)),
            divisions_path: env::var("ADMINISTRATIVE_DIVISIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DataConfig::DEFAULT_DIVISIONS_PATH)),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            site,
            data,
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

/// Locations of the two static documents loaded at startup.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub legislators_path: PathBuf,
    pub divisions_path: PathBuf,
}

impl DataConfig {
    pub const DEFAULT_LEGISLATORS_PATH: &'static str = "json-config/recall-legislators.json";
    pub const DEFAULT_DIVISIONS_PATH: &'static str = "json-config/administrative-divisions.json";
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            legislators_path: PathBuf::from(Self::DEFAULT_LEGISLATORS_PATH),
            divisions_path: PathBuf::from(Self::DEFAULT_DIVISIONS_PATH),
        }
    }
}

/// Public address of the site, used to build canonical links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    hostname: String,
    path: String,
    base: Url,
    base_url: String,
}

impl SiteConfig {
    pub fn new(hostname: impl Into<String>, path: impl Into<String>) -> Result<Self, ConfigError> {
        let hostname = hostname.into().trim().to_string();
        if hostname.is_empty()
            || hostname.contains('/')
            || hostname.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::InvalidHostname { value: hostname });
        }

        let mut path = path.into().trim().to_string();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }

        let scheme = if hostname == "localhost" {
            "http"
        } else {
            "https"
        };

        let mut base = Url::parse(&format!("{scheme}://{hostname}"))
            .map_err(|source| ConfigError::InvalidBaseUrl {
                value: hostname.clone(),
                source,
            })?;
        if path != "/" {
            base.set_path(path.trim_end_matches('/'));
        }

        Ok(Self {
            base_url: base.as_str().trim_end_matches('/').to_string(),
            hostname,
            path,
            base,
        })
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    pub fn join<S: AsRef<str>>(&self, segments: &[S]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new("localhost", "/").expect("localhost forms a base URL")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidHostname { value: String },
    InvalidBaseUrl { value: String, source: url::ParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidHostname { value } => {
                write!(f, "APP_HOSTNAME '{}' cannot form a base URL", value)
            }
            ConfigError::InvalidBaseUrl { value, .. } => {
                write!(f, "APP_HOSTNAME '{}' is not a valid URL host", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidHostname { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidBaseUrl { source, .. } => Some(source),
        }
    }
}
