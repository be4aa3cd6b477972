//! card_batch: ingest fixed-width card files and query the card store

use std::path::PathBuf;

use anyhow::{Context, Result};
use card_vault::consts::DEFAULT_PAGE_SIZE;
use card_vault::{load_config, CardService, SqliteCardStore};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "card_batch")]
#[command(about = "Encrypted card store batch tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest a fixed-width batch file, all or nothing
    Ingest { file: PathBuf },
    /// Store a single card number
    Create { card_number: String },
    /// Look a card up by its number
    Find { card_number: String },
    /// Look a card up by its external identifier
    Get { external_id: String },
    /// List cards in creation order
    List {
        #[arg(default_value_t = 0)]
        offset: u64,
        #[arg(default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config().context("Failed to load configuration")?;
    let store = SqliteCardStore::open(&config.paths.card_db)
        .with_context(|| format!("Failed to open card database at {}", config.paths.card_db))?;
    let mut service = CardService::new(store, &config);

    info!(db = %config.paths.card_db, "card-vault batch tool");

    let output = match cli.command {
        Command::Ingest { ref file } => {
            let report = service
                .upload_file(file)
                .with_context(|| format!("Failed to ingest {}", file.display()))?;
            serde_json::to_value(&report)?
        }
        Command::Create { ref card_number } => {
            let summary = service
                .create_card(card_number)
                .context("Failed to create card")?;
            serde_json::to_value(&summary)?
        }
        Command::Find { ref card_number } => {
            let record = service.find_by_number(card_number).context("Lookup failed")?;
            serde_json::to_value(record.summary())?
        }
        Command::Get { ref external_id } => {
            let record = service
                .find_by_external_id(external_id)
                .context("Lookup failed")?;
            json!({
                "id": record.id,
                "external_id": record.external_id,
                "created_at": record.created_at,
            })
        }
        Command::List { offset, limit } => serde_json::to_value(service.list_page(offset, limit)?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
