use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::prelude::*;

/// Apply or inspect the eboom schema migrations.
#[derive(Parser, Debug)]
#[command(name = "migration")]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./eboom.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations (all unless `--steps`).
    Up {
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Roll back the last migration, or `--steps` of them.
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Drop every table and re-apply all migrations.
    Fresh,
    /// Print applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or(Command::Up { steps: None }) {
        Command::Up { steps } => migration::Migrator::up(&db, steps).await?,
        Command::Down { steps } => migration::Migrator::down(&db, Some(steps)).await?,
        Command::Fresh => migration::Migrator::fresh(&db).await?,
        Command::Status => migration::Migrator::status(&db).await?,
    }

    Ok(())
}
