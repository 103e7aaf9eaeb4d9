use std::collections::{HashMap, HashSet};

use alloy::primitives::{utils::format_units, U256};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{ServiceError, ServiceResult},
    rpc::EthereumClient,
};

/// Looks up wallet balances and converts them to ether
#[derive(Clone, Debug)]
pub struct BalanceLookup {
    /// Ethereum client for balance queries
    eth_client: EthereumClient,
}

impl BalanceLookup {
    pub fn new(eth_client: EthereumClient) -> Self {
        Self { eth_client }
    }

    /// Latest balance of `address` in ether
    #[instrument(skip(self))]
    pub async fn balance_of(&self, address: &str) -> ServiceResult<f64> {
        let wei = self.eth_client.get_balance(address).await?;
        let ether = wei_to_ether(wei)?;
        debug!("Balance of {}: {} wei ({} ETH)", address, wei, ether);
        Ok(ether)
    }

    /// Look up every wallet in turn
    ///
    /// A wallet whose lookup fails is left out of the table; the remaining
    /// wallets are still queried.
    pub async fn balances_of(&self, wallets: &HashSet<String>) -> HashMap<String, f64> {
        let mut balances = HashMap::with_capacity(wallets.len());

        for wallet in wallets {
            match self.balance_of(wallet).await {
                Ok(balance) => {
                    balances.insert(wallet.clone(), balance);
                }
                Err(e) => warn!("Skipping {}: balance lookup failed: {}", wallet, e),
            }
        }

        info!(
            "Resolved balances for {} of {} wallets",
            balances.len(),
            wallets.len()
        );
        balances
    }
}

/// Convert a wei amount to ether
///
/// The division by 10^18 is done exactly in decimal; only the final result is
/// narrowed to `f64`.
pub fn wei_to_ether(wei: U256) -> ServiceResult<f64> {
    let ether = format_units(wei, "ether")
        .map_err(|e| ServiceError::DecodeError(format!("Cannot convert {} wei: {}", wei, e)))?;
    ether
        .parse::<f64>()
        .map_err(|e| ServiceError::DecodeError(format!("Cannot convert {} ether: {}", ether, e)))
}
