use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres URL. Without one the service keeps users in memory.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    /// Tokens carry no `exp` claim when unset.
    pub expiration_hours: Option<i64>,
}

// Keeps the secret out of `{:?}` output.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 5)?
            .set_default("jwt.issuer", "credential-service")?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        config.validate()
    }

    /// Reject settings the service must not start with.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must not be empty".to_string(),
            ));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> Config {
        Config {
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                acquire_timeout_secs: 5,
            },
            server: ServerConfig { http_port: 8080 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                issuer: "credential-service".to_string(),
                expiration_hours: None,
            },
        }
    }

    #[test]
    fn test_empty_secret_rejected() {
        for secret in ["", "   "] {
            let result = config_with_secret(secret).validate();
            assert!(
                matches!(result, Err(ConfigError::Message(ref msg)) if msg.contains("jwt.secret")),
                "{secret:?}"
            );
        }
    }

    #[test]
    fn test_non_empty_secret_accepted() {
        let config = config_with_secret("test_secret_key_at_least_32_bytes!")
            .validate()
            .expect("config should be valid");
        assert_eq!(config.server.http_port, 8080);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let jwt = config_with_secret("super-secret-value").jwt;

        let output = format!("{:?}", jwt);
        assert!(!output.contains("super-secret-value"));
        assert!(output.contains("credential-service"));
    }
}
