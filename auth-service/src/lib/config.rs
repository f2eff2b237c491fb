use std::env;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
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
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL URL. When unset the service runs on the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub grpc_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
    pub algorithm: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Argon2id work factor.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_cost_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Build the credentials component from the `jwt` and `password` sections.
    pub fn authenticator(&self) -> Result<Authenticator, anyhow::Error> {
        if self.jwt.ttl_seconds <= 0 {
            anyhow::bail!("jwt.ttl_seconds must be positive, got {}", self.jwt.ttl_seconds);
        }
        let token_ttl = chrono::Duration::try_seconds(self.jwt.ttl_seconds)
            .filter(|ttl| chrono::Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| {
                anyhow::anyhow!("jwt.ttl_seconds is too large, got {}", self.jwt.ttl_seconds)
            })?;

        let jwt_handler = JwtHandler::with_algorithm(self.jwt.secret.as_bytes(), &self.jwt.algorithm)?;
        let password_hasher = PasswordHasher::with_params(
            self.password.memory_cost_kib,
            self.password.iterations,
            self.password.parallelism,
        )?;

        Ok(Authenticator::from_parts(
            password_hasher,
            jwt_handler,
            token_ttl,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
            },
            server: ServerConfig {
                http_port: 3000,
                grpc_port: 50051,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
                ttl_seconds: 900,
                algorithm: "HS256".to_string(),
            },
            password: PasswordConfig {
                memory_cost_kib: 8 * 1024,
                iterations: 1,
                parallelism: 1,
            },
        }
    }

    #[test]
    fn test_authenticator_from_config() {
        let authenticator = config().authenticator().unwrap();
        assert_eq!(authenticator.token_ttl(), chrono::Duration::minutes(15));
    }

    #[test]
    fn test_authenticator_rejects_bad_settings() {
        let mut bad_ttl = config();
        bad_ttl.jwt.ttl_seconds = 0;
        assert!(bad_ttl.authenticator().is_err());

        let mut huge_ttl = config();
        huge_ttl.jwt.ttl_seconds = i64::MAX;
        assert!(huge_ttl.authenticator().is_err());

        let mut unreachable_expiry = config();
        unreachable_expiry.jwt.ttl_seconds = i64::MAX / 1000;
        assert!(unreachable_expiry.authenticator().is_err());

        let mut bad_algorithm = config();
        bad_algorithm.jwt.algorithm = "RS256".to_string();
        assert!(bad_algorithm.authenticator().is_err());

        let mut bad_cost = config();
        bad_cost.password.memory_cost_kib = 1;
        assert!(bad_cost.authenticator().is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let printed = format!("{:?}", config().jwt);
        assert!(!printed.contains("test-secret"));
    }
}
