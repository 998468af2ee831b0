use clap::Parser;
use localpay::application::manager::GatewayManager;
use localpay::config::PaymentsConfig;
use localpay::domain::gateway::GatewayRecord;
use localpay::domain::ports::{GatewayRepository, TransactionLedgerBox};
use localpay::infrastructure::in_memory::{InMemoryGatewayRepository, InMemoryTransactionLedger};
use localpay::interfaces::csv::purchase_reader::PurchaseReader;
use localpay::interfaces::csv::result_writer::{PurchaseResult, ResultWriter};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input purchases CSV file
    input: PathBuf,

    /// JSON file with manager settings (default currency, driver whitelist)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to persistent ledger database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Slug of the local gateway record purchases are sent through
    #[arg(long, default_value = "local")]
    gateway: String,
}

fn open_ledger(db_path: Option<PathBuf>) -> Result<TransactionLedgerBox> {
    #[cfg(feature = "storage-rocksdb")]
    {
        if let Some(db_path) = db_path {
            let ledger = localpay::infrastructure::rocksdb::RocksDBLedger::open(db_path)
                .into_diagnostic()?;
            return Ok(Box::new(ledger));
        }
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    {
        if db_path.is_some() {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
        }
    }

    Ok(Box::new(InMemoryTransactionLedger::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PaymentsConfig::load(cli.config.as_deref()).into_diagnostic()?;

    let mut record = GatewayRecord::new(cli.gateway.clone(), "Local Dummy");
    record.driver = Some(config.default_driver.clone());
    record.is_test_mode = true;

    let gateways = InMemoryGatewayRepository::new();
    gateways.store(record).await.into_diagnostic()?;

    let manager = GatewayManager::new(config, Box::new(gateways), open_ledger(cli.db_path)?);
    let record = manager
        .gateways()
        .get_by_slug(&cli.gateway)
        .await
        .into_diagnostic()?
        .ok_or_else(|| miette::miette!("gateway {} is not configured", cli.gateway))?;

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = PurchaseReader::new(file);
    let mut results = Vec::new();
    for row in reader.purchases() {
        match row {
            Ok(row) => {
                let order_id = row.order_id.clone();
                match manager.initiate_purchase(&record, row.into()).await {
                    Ok(session) => results.push(PurchaseResult::from_response(order_id, &session)),
                    Err(e) => eprintln!("Error processing purchase {}: {}", order_id, e),
                }
            }
            Err(e) => {
                eprintln!("Error reading purchase: {}", e);
            }
        }
    }

    let stdout = io::stdout();
    let mut writer = ResultWriter::new(stdout.lock());
    writer.write_results(results).into_diagnostic()?;

    Ok(())
}
