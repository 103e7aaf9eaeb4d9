use std::collections::HashMap;
use std::ops::RangeInclusive;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    collector::WalletCollector,
    error::ServiceResult,
    models::block::BlockTransaction,
    rpc::EthereumClient,
};

/// Counts how often each contract is touched by transactions in a block range
///
/// A transaction counts once against the contract it targets; contract
/// creations are attributed to their sender. With call tracing enabled the
/// internal calls made by the transaction are added on top.
#[derive(Clone, Debug)]
pub struct ContractInteractionCounter {
    /// Ethereum client for code lookups and traces
    eth_client: EthereumClient,
    /// Block source
    collector: WalletCollector,
    /// Add `debug_traceTransaction` call counts
    trace_internal_calls: bool,
}

impl ContractInteractionCounter {
    pub fn new(eth_client: EthereumClient, trace_internal_calls: bool) -> Self {
        Self {
            collector: WalletCollector::new(eth_client.clone()),
            eth_client,
            trace_internal_calls,
        }
    }

    /// Whether `address` has code deployed at the latest block
    pub async fn is_contract(&self, address: &str) -> ServiceResult<bool> {
        let code = self.eth_client.get_code(address).await?;
        Ok(has_code(&code))
    }

    /// Count contract interactions across `blocks`
    ///
    /// Any failed RPC call aborts the count.
    #[instrument(skip(self), err)]
    pub async fn count(&self, blocks: RangeInclusive<u64>) -> ServiceResult<HashMap<String, u64>> {
        let mut interactions = HashMap::new();

        for block_number in blocks {
            let block = self.collector.fetch_block(block_number).await?;
            for tx in &block.transactions {
                self.count_transaction(tx, &mut interactions).await?;
            }
        }

        info!("Found {} contracts with interactions", interactions.len());
        Ok(interactions)
    }

    async fn count_transaction(
        &self,
        tx: &BlockTransaction,
        interactions: &mut HashMap<String, u64>,
    ) -> ServiceResult<()> {
        let target = tx.recipient().unwrap_or(&tx.from);
        if !self.is_contract(target).await? {
            return Ok(());
        }

        let mut count = 1;
        if self.trace_internal_calls {
            if let Some(hash) = tx.hash.as_deref() {
                let frame = self.eth_client.trace_transaction(hash).await?;
                let calls = internal_call_count(&frame);
                debug!("Transaction {} made {} internal calls", hash, calls);
                count += calls;
            } else {
                warn!(
                    "Transaction from {} to {} has no hash, internal calls not counted",
                    tx.from, target
                );
            }
        }

        *interactions.entry(target.to_string()).or_insert(0) += count;
        Ok(())
    }
}

/// `eth_getCode` answers "0x" for externally owned accounts
pub fn has_code(code: &str) -> bool {
    !code.is_empty() && code != "0x"
}

/// Number of direct sub-calls in a `callTracer` frame
pub fn internal_call_count(frame: &Value) -> u64 {
    frame
        .get("calls")
        .and_then(Value::as_array)
        .map_or(0, |calls| calls.len() as u64)
}
