//! CSV reports
//!
//! Writes the wallet balance table and the contract interaction table.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{ServiceError, ServiceResult};

/// Header of the wallet balance report
pub const WALLET_HEADER: [&str; 2] = ["Wallet Address", "Balance (ETH)"];

/// Header of the contract interaction report
pub const CONTRACT_HEADER: [&str; 2] = ["Contract Address", "Interaction Count"];

/// Write wallet balances to a CSV file, replacing any existing file
///
/// Rows follow the map's iteration order unless `sort_by_balance` is set, in
/// which case the richest wallet comes first. Balances are written with six
/// fractional digits.
pub fn write_wallet_balances(
    path: &Path,
    balances: &HashMap<String, f64>,
    sort_by_balance: bool,
) -> ServiceResult<usize> {
    let mut rows: Vec<(&String, &f64)> = balances.iter().collect();
    if sort_by_balance {
        rows.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
    }

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(WALLET_HEADER)?;
    for (wallet, balance) in &rows {
        wtr.write_record([wallet.as_str(), format!("{:.6}", balance).as_str()])?;
    }
    wtr.flush()?;

    info!("Wrote {} wallet balances to {}", rows.len(), path.display());
    Ok(rows.len())
}

/// Read a wallet balance report back into an address to balance map
pub fn read_wallet_balances(path: &Path) -> ServiceResult<HashMap<String, f64>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();
    if headers.iter().ne(WALLET_HEADER) {
        return Err(ServiceError::DecodeError(format!(
            "Unexpected report header: {:?}",
            headers
        )));
    }

    let mut balances = HashMap::new();
    for record in rdr.records() {
        let record = record?;
        let (wallet, balance) = match (record.get(0), record.get(1)) {
            (Some(wallet), Some(balance)) => (wallet, balance),
            _ => {
                return Err(ServiceError::DecodeError(format!(
                    "Malformed report row: {:?}",
                    record
                )))
            }
        };
        let balance = balance
            .parse::<f64>()
            .map_err(|e| ServiceError::DecodeError(format!("Bad balance {}: {}", balance, e)))?;
        balances.insert(wallet.to_string(), balance);
    }
    Ok(balances)
}

/// Write contract interaction counts to a CSV file, most used contract first
pub fn write_contract_interactions(
    path: &Path,
    interactions: &HashMap<String, u64>,
) -> ServiceResult<usize> {
    let mut rows: Vec<(&String, &u64)> = interactions.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(CONTRACT_HEADER)?;
    for (contract, count) in &rows {
        wtr.write_record([contract.as_str(), count.to_string().as_str()])?;
    }
    wtr.flush()?;

    info!("Wrote {} contract interaction counts to {}", rows.len(), path.display());
    Ok(rows.len())
}
