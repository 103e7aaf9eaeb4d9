use serde::Deserialize;

/// Block returned by `eth_getBlockByNumber` with full transaction objects
///
/// Only the fields the scanner reads are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Block {
    /// Transactions in block order
    #[serde(default)]
    pub transactions: Vec<BlockTransaction>,
}

/// The parties of a single transaction
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockTransaction {
    /// Transaction hash
    #[serde(default)]
    pub hash: Option<String>,

    /// Sender address
    pub from: String,

    /// Recipient address, `null` for contract creation
    #[serde(default)]
    pub to: Option<String>,
}

impl BlockTransaction {
    /// Recipient address, or `None` for a contract creation
    pub fn recipient(&self) -> Option<&str> {
        self.to.as_deref().filter(|to| !to.is_empty())
    }
}
