//! # Seed Data Loader
//!
//! Populates a database with the reference catalog and pricing rules.
//!
//! ## Usage
//! ```bash
//! # Seed ./till_dev.db
//! cargo run -p till-db --bin seed
//!
//! # Specify database path
//! cargo run -p till-db --bin seed -- --db ./data/till.db
//! ```

use std::env;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use till_db::{reference, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./till_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                let Some(path) = args.get(i + 1) else {
                    return Err(format!("{} requires a <PATH>", args[i]).into());
                };
                db_path = path.clone();
                i += 1;
            }
            "--help" | "-h" => {
                println!("Till Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./till_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(path = %db_path, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    for item in reference::catalog() {
        db.catalog().upsert(&item).await?;
    }
    info!(count = db.catalog().count().await?, "Catalog loaded");

    let existing = db.rules().count().await?;
    if existing > 0 {
        warn!(existing, "Rule table already populated, leaving it untouched");
    } else {
        for rule in reference::rules() {
            db.rules().insert(&rule).await?;
        }
        info!(count = db.rules().count().await?, "Pricing rules loaded");
    }

    db.close().await;
    println!("✓ Seed complete: {}", db_path);

    Ok(())
}
