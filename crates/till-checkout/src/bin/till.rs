//! # till
//!
//! Scans item codes into a cart and prints the priced result.
//!
//! ## Usage
//! ```bash
//! # Price two APEs and a PUNK from the built-in reference data
//! till APE APE PUNK
//!
//! # Scan three, then take one back
//! till PUNK PUNK PUNK --remove PUNK
//!
//! # Read prices and rules from SQLite (see the seed binary in till-db)
//! TILL_SOURCE=sqlite TILL_DB_PATH=./till_dev.db till AZUKI AZUKI AZUKI
//!
//! # Machine-readable summary
//! till --json APE PUNK
//! ```

use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use till_checkout::{
    CheckoutEngine, InMemoryCatalog, InMemoryRules, PriceProvider, RuleProvider, SourceKind,
    SqliteCatalog, SqliteRules, TillConfig,
};
use till_core::CheckoutSummary;
use till_db::{Database, DbConfig};

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Scan(String),
    Remove(String),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    config_path: Option<PathBuf>,
    json: bool,
    init_config: bool,
    help: bool,
    steps: Vec<Step>,
}

/// Parses everything after the program name. A flag that takes a value
/// must be followed by one.
fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().ok_or_else(|| format!("{arg} requires a <PATH>"))?;
                options.config_path = Some(PathBuf::from(path));
            }
            "--remove" | "-r" => {
                let code = args.next().ok_or_else(|| format!("{arg} requires a <CODE>"))?;
                options.steps.push(Step::Remove(code.clone()));
            }
            "--json" => options.json = true,
            "--init-config" => options.init_config = true,
            "--help" | "-h" => options.help = true,
            code => options.steps.push(Step::Scan(code.to_string())),
        }
    }

    Ok(options)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let Options {
        config_path,
        json,
        init_config,
        help,
        steps,
    } = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            print_help();
            process::exit(2);
        }
    };

    if help {
        print_help();
        return Ok(());
    }

    if init_config {
        let path = TillConfig::default().save(config_path)?;
        println!("✓ Wrote default config: {}", path.display());
        return Ok(());
    }

    let config = TillConfig::load(config_path)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log.filter)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(source = %config.source, "Configuration loaded");

    let db = match config.source {
        SourceKind::Memory => None,
        SourceKind::Sqlite => Some(
            Database::new(
                DbConfig::new(config.database.path.clone())
                    .max_connections(config.database.max_connections),
            )
            .await?,
        ),
    };

    let prices: Arc<dyn PriceProvider> = match &db {
        Some(db) => Arc::new(SqliteCatalog::new(db)),
        None => Arc::new(InMemoryCatalog::reference()),
    };
    let rules: Arc<dyn RuleProvider> = match &db {
        Some(db) => Arc::new(SqliteRules::new(db)),
        None => Arc::new(InMemoryRules::reference()),
    };

    let mut engine = CheckoutEngine::new(prices, rules);
    for step in &steps {
        match step {
            Step::Scan(code) => engine.scan(code),
            Step::Remove(code) => engine.remove(code),
        }
    }

    let result = engine.summary().await;

    if let Some(db) = db {
        db.close().await;
    }

    let summary = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &CheckoutSummary) {
    println!(
        "{:<10} {:>5} {:>10} {:>10} {:>10}",
        "CODE", "QTY", "PRICE", "DISCOUNT", "NET"
    );
    for line in &summary.lines {
        println!(
            "{:<10} {:>5} {:>10} {:>10} {:>10}",
            line.code,
            line.quantity,
            line.unit_price.to_string(),
            line.discount.to_string(),
            line.net_total().to_string()
        );
    }
    println!();
    println!("{:<28} {:>10}", "Subtotal", summary.subtotal.to_string());
    println!("{:<28} {:>10}", "Discount", summary.discount.to_string());
    println!("{:<28} {:>10}", "Total", summary.total.to_string());
}

fn print_help() {
    println!("Till Checkout");
    println!();
    println!("Usage: till [OPTIONS] [CODE]...");
    println!();
    println!("Each CODE scans one unit into the cart, in order.");
    println!();
    println!("Options:");
    println!("  -r, --remove <CODE>   Remove one unit of CODE");
    println!("  -c, --config <PATH>   Config file (default: $TILL_CONFIG or platform config dir)");
    println!("      --json            Print the summary as JSON");
    println!("      --init-config     Write a default config file and exit");
    println!("  -h, --help            Show this help message");
    println!();
    println!("Environment:");
    println!("  TILL_SOURCE           memory | sqlite");
    println!("  TILL_DB_PATH          SQLite database path");
    println!("  TILL_LOG / RUST_LOG   Log filter");
}
