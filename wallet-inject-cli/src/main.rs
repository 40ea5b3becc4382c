//! wallet-inject CLI - simulate injected wallet detection against a fixture.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wallet_inject::{Catalog, DetectorConfig};
use wallet_inject_cli::{
    InstalledWallet, Simulation, load_catalog, load_config, load_fixture, render_json,
    render_table, resolve_config, sign_in,
};

/// Detect injected wallets in a simulated host
#[derive(Parser, Debug)]
#[command(name = "wallet-inject")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host fixture (JSON) describing globals and announcements
    #[arg(short, long, env = "WALLET_INJECT_FIXTURE")]
    fixture: PathBuf,

    /// Wallet catalog (JSON); the built-in catalog is used if not specified
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Detector configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Detection budget in milliseconds, overrides the configuration
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Delay before fixture announcements are delivered
    #[arg(long, default_value_t = 150)]
    announce_after_ms: u64,

    /// Connect this wallet after detection and print its accounts
    #[arg(long)]
    sign_in: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("wallet_inject=debug,wallet_inject_cli=debug")
    } else {
        EnvFilter::new("wallet_inject=warn,wallet_inject_cli=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let fixture = load_fixture(&args.fixture).await?;
    let catalog = match &args.catalog {
        Some(path) => load_catalog(path).await?,
        None => Catalog::builtin(),
    };
    let config = match &args.config {
        Some(path) => load_config(path).await?,
        None => DetectorConfig::default(),
    };
    let config = resolve_config(config, args.timeout_ms);

    let simulation = Simulation::new(
        &fixture,
        catalog,
        config,
        Duration::from_millis(args.announce_after_ms),
    );
    let wallets = simulation.run().await;
    let adapters = Simulation::adapters(&wallets);
    let installed: Vec<InstalledWallet> = wallets.iter().map(InstalledWallet::from).collect();
    info!(count = installed.len(), "detection complete");

    if args.json {
        println!("{}", render_json(&installed, &adapters)?);
    } else {
        print!("{}", render_table(&installed, &adapters));
    }

    if let Some(id) = &args.sign_in {
        let accounts = sign_in(&adapters, id).await?;
        if accounts.is_empty() {
            println!("{id}: connected, no accounts reported");
        }
        for account in accounts {
            match account.public_key {
                Some(key) => println!("{id}: {} ({key})", account.account_id),
                None => println!("{id}: {}", account.account_id),
            }
        }
    }

    simulation.detector().destroy();
    Ok(())
}
