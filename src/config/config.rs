use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    pub reminder_window_days: i64,
    /// `None` disables the background reminder loop.
    pub reminder_interval: Option<Duration>,
    pub cors_allowed_origin: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .field("reminder_window_days", &self.reminder_window_days)
            .field("reminder_interval", &self.reminder_interval)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .finish()
    }
}

fn parsed<T: FromStr>(vars: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    vars(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(vars: impl Fn(&str) -> Option<String>) -> Self {
        let reminder_interval_secs: u64 = parsed(&vars, "REMINDER_INTERVAL_SECS", 3600);
        Self {
            host: parsed(&vars, "HOST", IpAddr::from([127, 0, 0, 1])),
            port: parsed(&vars, "PORT", 5000),
            log_level: vars("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            api_key: vars("API_KEY").filter(|key| !key.trim().is_empty()),
            request_timeout: Duration::from_secs(parsed(&vars, "REQUEST_TIMEOUT_SECS", 30)),
            reminder_window_days: parsed(&vars, "REMINDER_WINDOW_DAYS", 3),
            reminder_interval: (reminder_interval_secs > 0).then(|| Duration::from_secs(reminder_interval_secs)),
            cors_allowed_origin: vars("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| "*".to_string()),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
