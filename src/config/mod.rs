// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HealthConfig};

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources are layered: built-in defaults, then the optional file, then
    /// `TUTORIAL_`-prefixed environment variables (`TUTORIAL_SERVER__PORT=9000`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_layered(config_path, None)
    }

    /// `env` stands in for the process environment when given
    fn load_layered(
        config_path: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("TUTORIAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/config").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert!(cfg.health.enabled);
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[performance]\nmax_connections = 5\n\n[data]\nbase_dir = \"/srv/data\""
        )
        .unwrap();

        let base = dir.path().join("custom");
        let cfg = Config::load_from(base.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.performance.max_connections, Some(5));
        assert_eq!(cfg.data.base_dir, std::path::PathBuf::from("/srv/data"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("layered.toml"),
            "[server]\nport = 9100\n\n[performance]\nmax_connections = 3\n",
        )
        .unwrap();

        let env = config::Map::from([
            ("TUTORIAL_SERVER__PORT".to_string(), "9555".to_string()),
            ("TUTORIAL_LOGGING__LEVEL".to_string(), "debug".to_string()),
            ("OTHER_SERVER__PORT".to_string(), "1".to_string()),
        ]);
        let base = dir.path().join("layered");
        let cfg = Config::load_layered(base.to_str().unwrap(), Some(env)).unwrap();
        assert_eq!(cfg.server.port, 9555);
        assert_eq!(cfg.performance.max_connections, Some(3));
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::default();
        cfg.server.port = 8123;
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8123);

        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
