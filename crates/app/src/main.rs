use std::{sync::Arc, time::Duration};

use migration::{Migrator, MigratorTrait};
use sea_orm::ConnectOptions;
use server::{
    ServerConfig, ServerState, identity::GoTrueProvider, notify::LogNotifier,
    tokens::MemoryTokenStore,
};
use settings::{Database, DatabaseKind};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "eboom={level},server={level},engine={level},migration={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect_database(&settings.database).await?;
    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await?;

    let auth = settings.auth;
    let state = ServerState {
        engine: Arc::new(engine),
        db,
        identity: Arc::new(GoTrueProvider::new(
            &auth.provider_url,
            &auth.api_key,
            &auth.service_key,
        )),
        tokens: Arc::new(MemoryTokenStore::default()),
        notifier: Arc::new(LogNotifier),
        config: Arc::new(ServerConfig {
            app_url: auth.app_url,
            bypass_user_id: auth.bypass_user_id,
        }),
    };

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    server::run(state, &format!("{}:{}", bind, settings.server.port)).await;

    Ok(())
}

/// Connections to an in-memory database are pinned: closing the last one
/// discards every table.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 100);

fn connect_options(config: &Database) -> ConnectOptions {
    let url = match &config.kind {
        DatabaseKind::Memory => String::from("sqlite::memory:"),
        DatabaseKind::Sqlite { path } => format!("sqlite:{}?mode=rwc", path),
        DatabaseKind::Postgres { url } => url.clone(),
    };

    let mut options = ConnectOptions::new(url);
    options
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs.unwrap_or(8)))
        .sqlx_logging(false);
    if matches!(config.kind, DatabaseKind::Memory) {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(MEMORY_CONNECTION_LIFETIME)
            .max_lifetime(MEMORY_CONNECTION_LIFETIME);
    } else {
        options
            .max_connections(config.max_connections.unwrap_or(10))
            .min_connections(config.min_connections.unwrap_or(1))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs.unwrap_or(300)));
    }
    options
}

async fn connect_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(connect_options(config)).await?;
    tracing::info!("database connected, running migrations");
    Migrator::up(&database, None).await?;
    Ok(database)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database(kind: DatabaseKind) -> Database {
        Database {
            kind,
            max_connections: Some(4),
            min_connections: None,
            connect_timeout_secs: None,
            idle_timeout_secs: Some(60),
        }
    }

    #[test]
    fn memory_database_keeps_its_single_connection() {
        let options = connect_options(&database(DatabaseKind::Memory));
        assert_eq!(options.get_url(), "sqlite::memory:");
        assert_eq!(options.get_max_connections(), Some(1));
        assert_eq!(options.get_min_connections(), Some(1));
        assert_eq!(options.get_max_lifetime(), Some(MEMORY_CONNECTION_LIFETIME));
        assert_eq!(options.get_idle_timeout(), Some(MEMORY_CONNECTION_LIFETIME));
    }

    #[test]
    fn file_databases_use_the_configured_pool() {
        let options = connect_options(&database(DatabaseKind::Sqlite {
            path: "eboom.db".to_string(),
        }));
        assert_eq!(options.get_url(), "sqlite:eboom.db?mode=rwc");
        assert_eq!(options.get_max_connections(), Some(4));
        assert_eq!(options.get_min_connections(), Some(1));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(options.get_max_lifetime(), None);
    }
}
