//! oak-cli entry point.
//!
//! This binary is the presentation adapter: it parses arguments, wires the
//! config and the database pool, and delegates to the workflow and
//! repository crates.  No business logic lives here (or in `commands/`) —
//! totals, tax, and cart rules belong to `oak-checkout`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use oak_config::StoreConfig;
use oak_db::Pool;

mod commands;

#[derive(Parser)]
#[command(name = "oak")]
#[command(about = "Oak Donuts point-of-sale CLI", long_about = None)]
struct Cli {
    /// Store config YAML paths in merge order (base -> site overrides)
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database commands
    Db {
        #[command(subcommand)]
        cmd: DbCmd,
    },

    /// Menu management
    Menu {
        #[command(subcommand)]
        cmd: commands::menu::MenuCmd,
    },

    /// Order taking and history
    Order {
        #[command(subcommand)]
        cmd: commands::order::OrderCmd,
    },
}

#[derive(Subcommand)]
enum DbCmd {
    /// Connectivity + schema presence probe
    Status,

    /// Apply schema migrations (idempotent)
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if absent.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    let path_refs: Vec<&str> = cli.config_paths.iter().map(|s| s.as_str()).collect();
    let config = oak_config::load_layered_yaml(&path_refs)?;

    match cli.cmd {
        Commands::Db { cmd } => {
            let pool = connect(&config).await?;
            match cmd {
                DbCmd::Status => {
                    let s = oak_db::status(&pool).await?;
                    println!("db_ok={} has_menu_table={}", s.ok, s.has_menu_table);
                }
                DbCmd::Migrate => {
                    oak_db::migrate(&pool).await?;
                    println!("migrations_applied=true");
                }
            }
        }

        Commands::Menu { cmd } => {
            let pool = open_store(&config).await?;
            commands::menu::run(&pool, cmd).await?;
        }

        Commands::Order { cmd } => {
            let pool = open_store(&config).await?;
            commands::order::run(&pool, &config, cmd).await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

/// Resolve the database location: config file first, then env var/default.
async fn connect(config: &StoreConfig) -> Result<Pool> {
    match &config.database_url {
        Some(url) => oak_db::connect(url).await,
        None => oak_db::connect_from_env().await,
    }
}

/// Connect and bring the schema up to date — the normal path for every
/// sales-floor command.  A failure here ends the process with exit code 1.
async fn open_store(config: &StoreConfig) -> Result<Pool> {
    let pool = connect(config).await?;
    oak_db::migrate(&pool).await?;
    Ok(pool)
}
