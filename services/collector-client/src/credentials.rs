//! Collector Credentials
//!
//! Tenant host and bearer token, validated once at startup.

use thiserror::Error;

/// Startup configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Collector tenant host is missing or blank
    #[error("$TENANT must be set for events to reach the collector")]
    MissingTenant,

    /// Collector token is missing or blank
    #[error("$BEARER_TOKEN must be set for events to reach the collector")]
    MissingToken,
}

/// Collector destination and credential
#[derive(Clone)]
pub struct Credentials {
    tenant_host: String,
    auth_token: String,
}

impl Credentials {
    /// Validate and build credentials. Blank values are rejected.
    pub fn new(
        tenant_host: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let tenant_host = tenant_host.into().trim().to_string();
        let auth_token = auth_token.into().trim().to_string();

        if tenant_host.is_empty() {
            return Err(ConfigError::MissingTenant);
        }
        if auth_token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        Ok(Self {
            tenant_host,
            auth_token,
        })
    }

    pub fn tenant_host(&self) -> &str {
        &self.tenant_host
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_host", &self.tenant_host)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let creds = Credentials::new(" collector.example.com ", "abc123").unwrap();
        assert_eq!(creds.tenant_host(), "collector.example.com");
        assert_eq!(creds.auth_token(), "abc123");
    }

    #[test]
    fn test_missing_values_rejected() {
        assert_eq!(
            Credentials::new("", "abc123").unwrap_err(),
            ConfigError::MissingTenant
        );
        assert_eq!(
            Credentials::new("collector.example.com", "   ").unwrap_err(),
            ConfigError::MissingToken
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let creds = Credentials::new("collector.example.com", "super-secret").unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("collector.example.com"));
        assert!(!debug.contains("super-secret"));
    }
}
