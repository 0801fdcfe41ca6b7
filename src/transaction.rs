//! Transaction types for the pending pool and sealed blocks

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Sentinel sender recorded on block-reward transactions.
pub const REWARD_SENDER: &str = "0";

/// Amount credited to a miner whose proof seals a block.
pub const REWARD_AMOUNT: u64 = 1;

/// A sender/recipient/amount record queued for inclusion in a future block.
///
/// Immutable once created; moved into exactly one block when that block is
/// sealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

impl Transaction {
    /// Build a transaction, rejecting blank fields.
    ///
    /// An empty string is the typed stand-in for an omitted sender or
    /// recipient; `amount` presence is already guaranteed by the type.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: u64,
    ) -> Result<Self> {
        let sender = sender.into();
        let recipient = recipient.into();
        if sender.is_empty() {
            return Err(LedgerError::MissingField("sender"));
        }
        if recipient.is_empty() {
            return Err(LedgerError::MissingField("recipient"));
        }
        Ok(Transaction {
            sender,
            recipient,
            amount,
        })
    }

    /// The reward credited to `miner_id` when its proof is accepted.
    pub fn reward(miner_id: impl Into<String>) -> Self {
        Transaction {
            sender: REWARD_SENDER.to_string(),
            recipient: miner_id.into(),
            amount: REWARD_AMOUNT,
        }
    }
}
