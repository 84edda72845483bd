//! cambio CLI - record exchange desk transactions from the terminal.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use cambio_cli::commands::{self, PostArgs};
use cambio_core::{BankId, TransactionId};
use cambio_exchange::CurrencyOperation;
use cambio_infra::{DeskConfig, FileKeyValueStore, PersistentDesk};

#[derive(Parser)]
#[command(name = "cambio")]
#[command(about = "Cash register and bank balances for a currency exchange desk", long_about = None)]
struct Cli {
    /// Data directory path (overrides CAMBIO_DATA_DIR)
    #[arg(short, long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post a transaction
    Post {
        /// Currency operation (ARS_IN, USDT_BUY, USD_SELL, ...)
        operation: CurrencyOperation,
        /// Primary leg amount
        #[arg(allow_hyphen_values = true)]
        amount: Decimal,
        /// Bank holding the funds
        #[arg(long)]
        bank: Option<BankId>,
        /// Exchange rate (ARS per unit) for buys and sells
        #[arg(long)]
        rate: Option<Decimal>,
        /// Counter-leg amount; derived from --rate when omitted
        #[arg(long)]
        calculated: Option<Decimal>,
        /// Free-form operation label
        #[arg(long = "type")]
        operation_type: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Show cash register and bank balances
    Balances,

    /// Show one posted transaction
    Show { id: TransactionId },

    /// List transactions recorded within a date range (RFC 3339, inclusive)
    History {
        #[arg(long)]
        from: DateTime<Utc>,
        #[arg(long)]
        to: DateTime<Utc>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = DeskConfig::from_env()?;
    if let Some(dir) = cli.data {
        config = config.with_data_dir(dir);
    }

    cambio_observability::tracing::init(&config.log_filter);
    tracing::debug!(data_dir = %config.data_dir.display(), "opening desk");

    let store = FileKeyValueStore::open(&config.data_dir)?;
    let mut desk = PersistentDesk::open(store, config.posting_settings())?;

    match cli.command {
        Commands::Post {
            operation,
            amount,
            bank,
            rate,
            calculated,
            operation_type,
            description,
        } => {
            let tx = commands::post(
                &mut desk,
                PostArgs {
                    operation,
                    amount,
                    bank,
                    rate,
                    calculated,
                    operation_type,
                    description,
                },
            )?;
            print!("{}", commands::render_transactions(std::slice::from_ref(&tx)));
        }
        Commands::Balances => {
            print!("{}", commands::render_balances(desk.desk()));
        }
        Commands::Show { id } => {
            print!("{}", commands::show(&desk, id)?);
        }
        Commands::History { from, to } => {
            let found = commands::history(desk.desk(), from, to);
            if found.is_empty() {
                println!("no transactions between {from} and {to}");
            } else {
                print!("{}", commands::render_transactions(&found));
            }
        }
    }

    Ok(())
}
