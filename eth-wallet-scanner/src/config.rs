use config::{Environment, File, Source};
use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;

/// Scanner configuration structure
///
/// Contains every tunable of a scan run: which node to talk to, which blocks
/// to walk and where the reports go.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Ethereum RPC endpoint URL (default: http://localhost:8545)
    pub ethereum_rpc_url: String,

    /// First block of the scan, inclusive (default: 100)
    pub start_block: u64,

    /// Last block of the scan, inclusive (default: 200)
    pub end_block: u64,

    /// Destination of the wallet balance report (default: wallet_balances.csv)
    pub output_file: String,

    /// Order report rows by balance, highest first (default: false)
    pub sort_by_balance: bool,

    /// Also count contract interactions in the range (default: false)
    pub count_contract_interactions: bool,

    /// Add internal calls from `debug_traceTransaction` to the counts (default: false)
    pub trace_internal_calls: bool,

    /// Destination of the contract interaction report (default: contract_interactions.csv)
    pub contract_output_file: String,
}

impl Config {
    /// Load configuration from `scanner.toml` and the environment
    ///
    /// Sources are layered in this order, later ones winning:
    ///
    /// 1. built-in defaults
    /// 2. `scanner.toml` in the working directory (optional)
    /// 3. `SCANNER_*` environment variables, e.g. `SCANNER_START_BLOCK=1000`
    ///
    /// A `.env` file is loaded first if one exists.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        Self::from_sources(vec![
            Box::new(File::with_name("scanner").required(false)),
            Box::new(Environment::with_prefix("SCANNER").try_parsing(true)),
        ])
    }

    /// Build a configuration from the defaults overlaid with `sources`
    pub fn from_sources(sources: Vec<Box<dyn Source + Send + Sync>>) -> Result<Self> {
        let config: Config = config::Config::builder()
            .set_default("ethereum_rpc_url", "http://localhost:8545")?
            .set_default("start_block", 100_i64)?
            .set_default("end_block", 200_i64)?
            .set_default("output_file", "wallet_balances.csv")?
            .set_default("sort_by_balance", false)?
            .set_default("count_contract_interactions", false)?
            .set_default("trace_internal_calls", false)?
            .set_default("contract_output_file", "contract_interactions.csv")?
            .add_source(sources)
            .build()
            .wrap_err("Failed to read configuration")?
            .try_deserialize()
            .wrap_err("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot describe a scan
    pub fn validate(&self) -> Result<()> {
        if self.ethereum_rpc_url.trim().is_empty() {
            return Err(eyre!("ethereum_rpc_url must not be empty"));
        }
        if self.start_block > self.end_block {
            return Err(eyre!(
                "start_block ({}) must not be greater than end_block ({})",
                self.start_block,
                self.end_block
            ));
        }
        Ok(())
    }
}
