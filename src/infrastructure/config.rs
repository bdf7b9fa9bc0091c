use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

// Default timeout functions
fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_session_ttl_days() -> i64 {
  7
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  #[serde(default)]
  pub session: SessionConfig,
  #[serde(default)]
  pub google: Option<GoogleConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
  /// Cookie max-age; the server-side expiry is fixed at the same length
  #[serde(default = "default_session_ttl_days")]
  pub ttl_days: i64,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      ttl_days: default_session_ttl_days(),
    }
  }
}

/// Google OAuth configuration. Absent when federated login is disabled.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
  /// OAuth 2.0 client ID from Google Cloud Console
  pub client_id: String,
  /// OAuth 2.0 client secret from Google Cloud Console
  pub client_secret: String,
  /// Must match the redirect URI registered in Google Cloud Console
  pub redirect_url: String,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override
  /// earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with FURRYFRIENDS_ prefix, e.g.
  ///    `FURRYFRIENDS_SERVER__PORT=3000` or
  ///    `FURRYFRIENDS_DATABASE__URL=postgres://...`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if required files or values are missing, or if
  /// values have invalid types.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("FURRYFRIENDS")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [database]
            url = "postgres://localhost/furryfriends"
            max_connections = 5

            [google]
            client_id = "client-id"
            client_secret = "client-secret"
            redirect_url = "http://localhost:3000/auth/google/furryfriends"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.database.url, "postgres://localhost/furryfriends");
    assert_eq!(config.database.connect_timeout_seconds, 5); // default
    assert_eq!(config.database.acquire_timeout_seconds, 3); // default
    assert_eq!(config.session.ttl_days, 7); // default
    assert!(config.google.is_some());
  }

  #[test]
  fn test_google_section_is_optional() {
    let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [database]
            url = "postgres://localhost/furryfriends"
            max_connections = 5
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");
    assert!(config.google.is_none());
  }

  #[test]
  fn test_session_ttl_override() {
    let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [database]
            url = "postgres://localhost/furryfriends"
            max_connections = 5

            [session]
            ttl_days = 30
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");
    assert_eq!(config.session.ttl_days, 30);
  }
}
