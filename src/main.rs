use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use orgdir::config::{ConfigOverrides, ServerConfig};
use orgdir::server;
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        /// YAML config file; flags below override its values
        #[clap(short, long)]
        config: Option<PathBuf>,
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(short, long)]
        database: Option<String>,
        #[clap(long)]
        cors_origin: Option<String>,
        #[clap(long)]
        bcrypt_cost: Option<u32>,
        /// Return null instead of the password hash in user results
        #[clap(long)]
        redact_password_hash: bool,
    },
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
        #[clap(short, long, default_value = "orgdir.db")]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    match args.command {
        Commands::Serve {
            config,
            port,
            database,
            cors_origin,
            bcrypt_cost,
            redact_password_hash,
        } => {
            let config = ServerConfig::load(config.as_deref())?.apply(ConfigOverrides {
                port,
                database,
                cors_origin,
                log_level: args.log_level,
                bcrypt_cost,
                redact_password_hash: redact_password_hash.then_some(true),
            });
            setup_logging(&config.log_level);

            info!("Starting server on port {}", config.port);
            server::start_server(&config).await?;
        }
        Commands::Migrate {
            direction,
            database,
        } => {
            setup_logging(args.log_level.as_deref().unwrap_or("info"));

            info!("Running database migration: {:?}", direction);
            server::migrate_database(&database, direction).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &str) {
    let log_level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // sqlx logs every statement at info; only show them when debugging
    let sql_level = if log_level >= Level::DEBUG {
        log_level
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sqlx={},{}", sql_level, log_level)))
        .without_time()
        .init();
}
