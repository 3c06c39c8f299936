//! Handles settings for the application. Configuration is read from
//! `settings.toml` (or the file named by `EBOOM_CONFIG`), then overridden by
//! `EBOOM_*` environment variables, e.g. `EBOOM_SERVER__PORT=8080`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DatabaseKind {
    Memory,
    Sqlite { path: String },
    Postgres { url: String },
}

#[derive(Debug, Deserialize)]
pub struct Database {
    #[serde(flatten)]
    pub kind: DatabaseKind,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub connect_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub provider_url: String,
    pub api_key: String,
    pub service_key: String,
    pub app_url: String,
    pub bypass_user_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
    pub database: Database,
    pub auth: Auth,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path = std::env::var("EBOOM_CONFIG").unwrap_or_else(|_| "settings".to_string());
        let settings = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("EBOOM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    const AUTH: &str = r#"
        [auth]
        provider_url = "https://auth.example.com"
        api_key = "anon"
        service_key = "service"
        app_url = "http://localhost:3000"
    "#;

    #[test]
    fn sqlite_settings() {
        let settings = parse(&format!(
            r#"
            [server]
            port = 4000

            [database]
            kind = "sqlite"
            path = "eboom.db"
            max_connections = 5
            {AUTH}"#
        ))
        .unwrap();

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 4000);
        assert!(settings.server.bind.is_none());
        assert!(matches!(
            settings.database.kind,
            DatabaseKind::Sqlite { ref path } if path == "eboom.db"
        ));
        assert_eq!(settings.database.max_connections, Some(5));
        assert!(settings.auth.bypass_user_id.is_none());
    }

    #[test]
    fn memory_database_needs_no_path() {
        let settings = parse(&format!(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 8080

            [database]
            kind = "memory"
            {AUTH}"#
        ))
        .unwrap();

        assert_eq!(settings.app.level, "debug");
        assert!(matches!(settings.database.kind, DatabaseKind::Memory));
    }

    #[test]
    fn postgres_requires_a_url() {
        let err = parse(&format!(
            r#"
            [server]
            port = 4000

            [database]
            kind = "postgres"
            {AUTH}"#
        ));
        assert!(err.is_err());
    }
}
