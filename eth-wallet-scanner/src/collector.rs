use std::collections::HashSet;
use std::ops::RangeInclusive;

use tracing::{debug, info, instrument};

use crate::{
    error::ServiceResult,
    models::block::Block,
    rpc::EthereumClient,
};

/// Collects the wallets that sent or received transactions in a block range
#[derive(Clone, Debug)]
pub struct WalletCollector {
    /// Ethereum client for fetching blocks
    eth_client: EthereumClient,
}

impl WalletCollector {
    pub fn new(eth_client: EthereumClient) -> Self {
        Self { eth_client }
    }

    /// Fetch and decode a single block
    pub async fn fetch_block(&self, block_number: u64) -> ServiceResult<Block> {
        let raw = self.eth_client.get_block_by_number(block_number).await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Walk `blocks` in ascending order and return every sender and recipient seen
    ///
    /// Contract creations contribute only their sender. The first block that
    /// cannot be fetched or decoded aborts the walk and its error is returned.
    #[instrument(skip(self), err)]
    pub async fn collect(&self, blocks: RangeInclusive<u64>) -> ServiceResult<HashSet<String>> {
        let mut wallets = HashSet::new();

        for block_number in blocks {
            let block = self.fetch_block(block_number).await?;
            debug!(
                "Block {} has {} transactions",
                block_number,
                block.transactions.len()
            );
            add_block_wallets(&mut wallets, &block);
        }

        info!("Collected {} distinct wallets", wallets.len());
        Ok(wallets)
    }
}

/// Add the sender and, unless it is a contract creation, the recipient of
/// every transaction in `block`
pub fn add_block_wallets(wallets: &mut HashSet<String>, block: &Block) {
    for tx in &block.transactions {
        wallets.insert(tx.from.clone());
        if let Some(to) = tx.recipient() {
            wallets.insert(to.to_string());
        }
    }
}
