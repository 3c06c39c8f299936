pub use sea_orm_migration::prelude::*;

mod m20260101_000000_init;
mod m20260101_000001_reference_data;
mod m20260101_000002_invitations_forecasts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000000_init::Migration),
            Box::new(m20260101_000001_reference_data::Migration),
            Box::new(m20260101_000002_invitations_forecasts::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, Database, DbBackend, Statement};

    use super::*;

    #[tokio::test]
    async fn applies_every_migration_on_sqlite() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let applied = Migrator::get_applied_migrations(&db).await.unwrap();
        assert_eq!(applied.len(), Migrator::migrations().len());
        assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sqlite_money_columns_keep_their_checks() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT sql FROM sqlite_master WHERE name = 'income_forecasts'",
            ))
            .await
            .unwrap()
            .unwrap();
        let sql: String = row.try_get("", "sql").unwrap();
        assert!(sql.contains("\"forecasted_amount\" real"));
        assert!(sql.contains("CHECK"));
    }
}
