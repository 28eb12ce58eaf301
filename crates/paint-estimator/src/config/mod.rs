use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub estimator: EstimatorConfig,
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
            estimator: EstimatorConfig::from_env()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Constants and request defaults used by the calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Square metres deducted from a wall for each door.
    pub door_allowance_m2: f64,
    /// Square metres deducted from a wall for each window.
    pub window_allowance_m2: f64,
    /// Prep times are minutes per square metre; dividing by this yields hours.
    pub prep_time_divisor: f64,
    pub default_coats: u32,
    pub default_region: String,
    pub default_condition_id: u32,
    pub labor_rates_csv: Option<PathBuf>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            door_allowance_m2: 1.6,
            window_allowance_m2: 1.2,
            prep_time_divisor: 60.0,
            default_coats: 2,
            default_region: "Sydney".to_string(),
            default_condition_id: 1,
            labor_rates_csv: None,
        }
    }
}

impl EstimatorConfig {
    /// Reads the estimator settings, honouring a `.env` file in the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let door_allowance_m2 =
            non_negative_var("ESTIMATOR_DOOR_ALLOWANCE_M2", defaults.door_allowance_m2)?;
        let window_allowance_m2 =
            non_negative_var("ESTIMATOR_WINDOW_ALLOWANCE_M2", defaults.window_allowance_m2)?;
        let prep_time_divisor =
            non_negative_var("ESTIMATOR_PREP_TIME_DIVISOR", defaults.prep_time_divisor)?;
        if prep_time_divisor == 0.0 {
            return Err(ConfigError::InvalidNumber {
                key: "ESTIMATOR_PREP_TIME_DIVISOR",
            });
        }

        let default_coats = unsigned_var("ESTIMATOR_DEFAULT_COATS", defaults.default_coats)?;
        let default_condition_id = unsigned_var(
            "ESTIMATOR_DEFAULT_CONDITION_ID",
            defaults.default_condition_id,
        )?;
        let default_region =
            env::var("ESTIMATOR_DEFAULT_REGION").unwrap_or(defaults.default_region);
        let labor_rates_csv = env::var("ESTIMATOR_LABOR_RATES_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            door_allowance_m2,
            window_allowance_m2,
            prep_time_divisor,
            default_coats,
            default_region,
            default_condition_id,
            labor_rates_csv,
        })
    }
}

fn non_negative_var(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidNumber { key })?;
            if value.is_finite() && value >= 0.0 {
                Ok(value)
            } else {
                Err(ConfigError::InvalidNumber { key })
            }
        }
        Err(_) => Ok(default),
    }
}

fn unsigned_var(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} must be a non-negative number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
