//! Runtime configuration
//!
//! Flags with environment fallbacks, using the variable names the platform
//! manifest already sets (`TENANT`, `BEARER_TOKEN`, `ARTIFACT`, `PORT`, ...).

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use collector_client::forwarder::DEFAULT_TIMEOUT;
use collector_client::{CollectorScheme, ConfigError, Credentials};

use crate::logging::LogFormat;

#[derive(Parser, Debug, Clone)]
#[command(name = "status-app")]
#[command(about = "Platform status page with collector-forwarding diagnostics", long_about = None)]
#[command(version)]
pub struct Config {
    /// Collector tenant host (host[:port])
    #[arg(long, env = "TENANT")]
    pub tenant: Option<String>,

    /// Collector auth token
    #[arg(long, env = "BEARER_TOKEN", hide_env_values = true)]
    pub bearer_token: Option<String>,

    /// Artifact name, reported as the event source
    #[arg(long, env = "ARTIFACT", default_value = "")]
    pub artifact: String,

    /// Bind host (empty = all interfaces)
    #[arg(long, env = "HOST", default_value = "")]
    pub host: String,

    /// Bind port
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Seconds to wait before serving
    #[arg(long, env = "STARTUP_SLEEP")]
    pub startup_sleep: Option<String>,

    /// Directory served under /static
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Collector scheme (https or http)
    #[arg(long, env = "COLLECTOR_SCHEME", default_value = "https")]
    pub collector_scheme: CollectorScheme,

    /// Collector request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub collector_timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Validated collector credentials
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        Credentials::new(
            self.tenant.clone().unwrap_or_default(),
            self.bearer_token.clone().unwrap_or_default(),
        )
    }

    pub fn collector_timeout(&self) -> Duration {
        Duration::from_secs(self.collector_timeout_secs)
    }

    /// Address for the listener; an empty host binds every interface
    pub fn bind_addr(&self) -> String {
        let host = if self.host.is_empty() {
            "0.0.0.0"
        } else {
            self.host.as_str()
        };
        format!("{}:{}", host, self.port)
    }

    /// Address as configured, for startup announcements
    pub fn listen_label(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["status-app"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_build_credentials() {
        let config = parse(&[
            "--tenant",
            "collector.example.com",
            "--bearer-token",
            "tok",
            "--port",
            "9090",
            "--collector-scheme",
            "http",
        ]);

        let creds = config.credentials().unwrap();
        assert_eq!(creds.tenant_host(), "collector.example.com");
        assert_eq!(config.port, 9090);
        assert_eq!(config.collector_scheme, CollectorScheme::Http);
    }

    #[test]
    fn test_collector_timeout_defaults_to_client_timeout() {
        let config = parse(&[]);
        assert_eq!(config.collector_timeout(), DEFAULT_TIMEOUT);

        let config = parse(&["--collector-timeout-secs", "5"]);
        assert_eq!(config.collector_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_empty_tenant_is_config_error() {
        let config = parse(&["--tenant", "", "--bearer-token", "tok"]);
        assert_eq!(config.credentials().unwrap_err(), ConfigError::MissingTenant);
    }

    #[test]
    fn test_empty_token_is_config_error() {
        let config = parse(&["--tenant", "collector.example.com", "--bearer-token", ""]);
        assert_eq!(config.credentials().unwrap_err(), ConfigError::MissingToken);
    }

    #[test]
    fn test_bind_addr_defaults_to_all_interfaces() {
        let config = parse(&["--host", "", "--port", "8080"]);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.listen_label(), ":8080");

        let config = parse(&["--host", "127.0.0.1", "--port", "8081"]);
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
    }
}
