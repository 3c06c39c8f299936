use std::error::Error;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{Engine, EngineError, NewCanvas, NewExchangeRate};
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "eboom_admin")]
#[command(about = "Admin utilities for eboom (bootstrap users, currencies, rates, canvases)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./eboom.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Currency(Currency),
    Rate(Rate),
    Canvas(Canvas),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    /// Mark the email as already verified.
    #[arg(long)]
    verified: bool,
}

#[derive(Args, Debug)]
struct Currency {
    #[command(subcommand)]
    command: CurrencyCommand,
}

#[derive(Subcommand, Debug)]
enum CurrencyCommand {
    Add(CurrencyAddArgs),
}

#[derive(Args, Debug)]
struct CurrencyAddArgs {
    #[arg(long)]
    code: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    symbol: String,
    #[arg(long, default_value_t = 2)]
    decimals: i32,
    /// e.g. `fiat` or `crypto`.
    #[arg(long)]
    kind: Option<String>,
}

#[derive(Args, Debug)]
struct Rate {
    #[command(subcommand)]
    command: RateCommand,
}

#[derive(Subcommand, Debug)]
enum RateCommand {
    Add(RateAddArgs),
}

#[derive(Args, Debug)]
struct RateAddArgs {
    #[arg(long)]
    from: String,
    #[arg(long)]
    to: String,
    /// Units of `to` for one unit of `from`.
    #[arg(long)]
    rate: Decimal,
    /// RFC 3339 timestamp; defaults to now.
    #[arg(long)]
    date: Option<DateTime<Utc>>,
    #[arg(long)]
    source: Option<String>,
}

#[derive(Args, Debug)]
struct Canvas {
    #[command(subcommand)]
    command: CanvasCommand,
}

#[derive(Subcommand, Debug)]
enum CanvasCommand {
    Create(CanvasCreateArgs),
}

#[derive(Args, Debug)]
struct CanvasCreateArgs {
    /// Email of the owning user.
    #[arg(long)]
    owner: String,
    #[arg(long)]
    name: String,
    /// Base currency code; defaults to the owner's settings, then USD.
    #[arg(long)]
    currency: Option<String>,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let user = match engine
                .create_user(
                    &args.email,
                    args.first_name.as_deref(),
                    args.last_name.as_deref(),
                )
                .await
            {
                Ok(user) => user,
                Err(EngineError::ExistingKey(_)) => {
                    eprintln!("user already exists: {}", args.email);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            };
            if args.verified {
                engine.set_email_verified(user.id).await?;
            }

            println!("created user: {} ({})", user.email, user.id);
        }
        Command::Currency(Currency {
            command: CurrencyCommand::Add(args),
        }) => {
            let currency = engine
                .add_currency(&args.code, &args.name, &args.symbol, args.decimals, args.kind)
                .await?;
            println!("created currency: {} ({})", currency.code, currency.id);
        }
        Command::Rate(Rate {
            command: RateCommand::Add(args),
        }) => {
            let rate = engine
                .add_exchange_rate(NewExchangeRate {
                    from: args.from,
                    to: args.to,
                    rate: args.rate,
                    rate_date: args.date.unwrap_or_else(Utc::now),
                    source: args.source,
                })
                .await?;
            println!("recorded rate {} ({})", rate.rate, rate.id);
        }
        Command::Canvas(Canvas {
            command: CanvasCommand::Create(args),
        }) => {
            let Some(owner) = engine.user_by_email(&args.owner).await? else {
                eprintln!("user not found: {}", args.owner);
                std::process::exit(1);
            };

            let mut new = NewCanvas::new(&args.name);
            if let Some(code) = args.currency.as_deref() {
                new.base_currency_id = Some(engine.currency_by_code(code).await?.id);
            }
            let (canvas, _) = engine.create_canvas(owner.id, new).await?;
            println!("created canvas: {} ({})", canvas.name, canvas.id);
        }
    }

    Ok(())
}
