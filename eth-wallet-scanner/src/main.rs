use eth_wallet_scanner::{config::Config, scanner::Scanner};
use eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point
///
/// This is the main function that:
/// 1. Sets up logging
/// 2. Loads configuration
/// 3. Collects the wallets active in the configured block range
/// 4. Looks up their balances and writes the CSV report(s)
#[tokio::main]
async fn main() -> Result<()> {
    // Our crate at info, dependencies quieter
    let filter = EnvFilter::from_default_env()
        .add_directive("eth_wallet_scanner=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let summary = Scanner::new(config).run().await?;
    info!(
        "Scan complete: {} wallets, {} balances written",
        summary.wallets, summary.balances_written
    );

    Ok(())
}
