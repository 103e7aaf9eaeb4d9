use std::path::Path;

use eyre::{Result, WrapErr};
use tracing::{error, info};

use crate::{
    balance::BalanceLookup,
    collector::WalletCollector,
    config::Config,
    contracts::ContractInteractionCounter,
    report,
    rpc::EthereumClient,
};

/// Outcome of a completed scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Distinct wallets seen in the range
    pub wallets: usize,
    /// Wallet rows written to the balance report
    pub balances_written: usize,
    /// Contract rows written, when interaction counting ran and succeeded
    pub contracts_written: Option<usize>,
}

/// Runs the collect, look up and report stages one after another
#[derive(Clone, Debug)]
pub struct Scanner {
    config: Config,
    eth_client: EthereumClient,
}

impl Scanner {
    pub fn new(config: Config) -> Self {
        let eth_client = EthereumClient::new(&config.ethereum_rpc_url);
        Self { config, eth_client }
    }

    /// Run a full scan over the configured block range
    ///
    /// Nothing is written when wallet collection fails. A failed contract
    /// interaction count is logged and leaves the balance report intact.
    pub async fn run(&self) -> Result<ScanSummary> {
        let blocks = self.config.start_block..=self.config.end_block;
        info!(
            "Scanning blocks {} to {} on {}",
            self.config.start_block,
            self.config.end_block,
            self.eth_client.rpc_url()
        );

        let wallets = WalletCollector::new(self.eth_client.clone())
            .collect(blocks.clone())
            .await
            .wrap_err("Error finding interacting wallets")?;

        let balances = BalanceLookup::new(self.eth_client.clone())
            .balances_of(&wallets)
            .await;

        let output = Path::new(&self.config.output_file);
        let balances_written =
            report::write_wallet_balances(output, &balances, self.config.sort_by_balance)
                .wrap_err("Error saving to CSV")?;
        info!("Wallet balances saved to '{}'", output.display());

        let mut summary = ScanSummary {
            wallets: wallets.len(),
            balances_written,
            contracts_written: None,
        };

        if self.config.count_contract_interactions {
            let counter = ContractInteractionCounter::new(
                self.eth_client.clone(),
                self.config.trace_internal_calls,
            );
            match counter.count(blocks).await {
                Ok(interactions) => {
                    let output = Path::new(&self.config.contract_output_file);
                    let written = report::write_contract_interactions(output, &interactions)
                        .wrap_err("Error saving contract interactions to CSV")?;
                    info!("Contract interactions saved to '{}'", output.display());
                    summary.contracts_written = Some(written);
                }
                Err(e) => error!("Error counting contract interactions: {}", e),
            }
        }

        Ok(summary)
    }
}
