use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::consensus::{valid_proof, GENESIS_PROOF};
use crate::error::{LedgerError, Result};
use crate::hashing::{canonical_block_bytes, hash_block, BlockHash};
use crate::mempool::PendingPool;
use crate::transaction::Transaction;

/// An immutable, sequentially indexed record binding a proof, a timestamp,
/// the transactions it sealed and the digest of its predecessor.
///
/// `previous_hash` is `None` only on the genesis block. That sentinel is
/// never produced by the hasher and [`Ledger::seal_block`] cannot emit it:
/// it either receives a digest or computes one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based position in the chain.
    pub index: u64,
    /// Epoch milliseconds at sealing time.
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: Option<BlockHash>,
}

/// Read-only snapshot of the full chain.
#[derive(Debug, Clone, Serialize)]
pub struct ChainSnapshot {
    pub length: usize,
    pub blocks: Vec<Block>,
}

/// The ledger engine: append-only block sequence plus the pending pool.
///
/// Not internally synchronized. [`crate::node::NodeContext`] wraps it in a
/// lock so chain and pool always mutate inside one exclusive critical
/// section; see that module for the concurrency discipline.
pub struct Ledger {
    pub blocks: Vec<Block>,
    pub pool: PendingPool,
}

impl Ledger {
    /// Create a ledger holding exactly the genesis block and an empty pool.
    pub fn new() -> Self {
        let genesis = Block {
            index: 1,
            timestamp: current_millis(),
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: None,
        };
        Ledger {
            blocks: vec![genesis],
            pool: PendingPool::new(),
        }
    }

    /// Most recent chain entry.
    ///
    /// The chain is never empty after construction; an empty chain is a
    /// construction bug and panics rather than surfacing an error.
    pub fn last_block(&self) -> &Block {
        self.blocks.last().expect("chain is never empty")
    }

    /// Validate and queue a transaction, returning the index of the block
    /// likely to include it.
    ///
    /// The returned index is a hint, not a guarantee: a seal can run
    /// between this call and any use of the value, and the transaction then
    /// lands in a later block.
    pub fn queue_transaction(&mut self, sender: &str, recipient: &str, amount: u64) -> Result<u64> {
        let tx = Transaction::new(sender, recipient, amount)?;
        self.pool.push(tx);
        let hint = self.last_block().index + 1;
        debug!(sender, recipient, amount, hint, "transaction queued");
        Ok(hint)
    }

    /// Seal the pending pool into a new block and append it to the chain.
    ///
    /// `previous_hash` defaults to the digest of the current last block.
    /// Pool drain and chain append happen in the same call; this is the
    /// sole chain-mutating operation besides genesis construction.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<BlockHash>) -> Result<Block> {
        let previous_hash = match previous_hash {
            Some(hash) => hash,
            None => hash_block(self.last_block())?,
        };
        let block = Block {
            index: self.blocks.len() as u64 + 1,
            timestamp: current_millis(),
            transactions: self.pool.drain_all(),
            proof,
            previous_hash: Some(previous_hash),
        };
        self.blocks.push(block.clone());
        info!(
            index = block.index,
            transactions = block.transactions.len(),
            "block sealed"
        );
        Ok(block)
    }

    /// Accept an externally discovered proof and seal a block with it.
    ///
    /// The proof is checked against the canonical bytes of the current last
    /// block. Rejection is an ordinary outcome and leaves chain and pool
    /// untouched; the miner may resubmit. On acceptance the reward for
    /// `miner_id` is queued into the now-empty pool, so it lands in the
    /// next block, not the one returned here.
    pub fn accept_proof_and_seal(&mut self, proof: u64, miner_id: &str) -> Result<Block> {
        let last_repr = canonical_block_bytes(self.last_block())?;
        if !valid_proof(&last_repr, proof) {
            warn!(proof, miner_id, "proof rejected");
            return Err(LedgerError::InvalidProof);
        }
        let previous_hash = hash_block(self.last_block())?;
        let block = self.seal_block(proof, Some(previous_hash))?;
        self.pool.push(Transaction::reward(miner_id));
        Ok(block)
    }

    /// Clone of the whole chain plus its length.
    pub fn chain_snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            length: self.blocks.len(),
            blocks: self.blocks.clone(),
        }
    }

    /// Transactions awaiting inclusion, in queueing order.
    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.pool.transactions().to_vec()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

fn current_millis() -> u64 {
    Utc::now().timestamp_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    // Fixed genesis used where a deterministic canonical representation is
    // needed; its first satisfying proof is 3831130 (see consensus tests).
    fn fixture_genesis() -> Block {
        Block {
            index: 1,
            timestamp: 1_690_000_000_000,
            transactions: Vec::new(),
            proof: 100,
            previous_hash: None,
        }
    }

    const FIXTURE_GENESIS_HASH: &str =
        "9557d317ff7b802e8c08ab3e958b3b852d03c92a8df6cd3f4a7a0c86826aa577";

    #[test]
    fn test_genesis_shape() {
        let ledger = Ledger::new();
        assert_eq!(ledger.blocks.len(), 1);
        assert_eq!(ledger.last_block().index, 1);
        assert_eq!(ledger.last_block().proof, GENESIS_PROOF);
        assert_eq!(ledger.last_block().previous_hash, None);
        assert!(ledger.last_block().transactions.is_empty());
        assert!(ledger.pool.is_empty());
    }

    #[test]
    fn test_queue_returns_next_index_hint() {
        let mut ledger = Ledger::new();
        let hint = ledger.queue_transaction("alice", "bob", 5).unwrap();
        assert_eq!(hint, 2);
        assert_eq!(ledger.pool.len(), 1);
    }

    #[test]
    fn test_queue_rejects_blank_fields() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.queue_transaction("", "bob", 5),
            Err(LedgerError::MissingField("sender"))
        );
        assert_eq!(
            ledger.queue_transaction("alice", "", 5),
            Err(LedgerError::MissingField("recipient"))
        );
        assert!(ledger.pool.is_empty());
    }

    #[test]
    fn test_seal_moves_pool_into_block() {
        let mut ledger = Ledger::new();
        ledger.queue_transaction("alice", "bob", 5).unwrap();

        let block = ledger.seal_block(7, None).unwrap();
        assert_eq!(
            block.transactions,
            vec![Transaction::new("alice", "bob", 5).unwrap()]
        );
        assert!(ledger.pool.is_empty());
    }

    #[test]
    fn test_seal_extends_chain_by_one_with_correct_link() {
        let mut ledger = Ledger::new();
        let expected_link = hash_block(ledger.last_block()).unwrap();

        let block = ledger.seal_block(7, None).unwrap();
        assert_eq!(ledger.blocks.len(), 2);
        assert_eq!(block.index, 2);
        assert_eq!(block.previous_hash, Some(expected_link));
        assert_eq!(ledger.last_block(), &block);
    }

    #[test]
    fn test_seal_honors_explicit_previous_hash() {
        let mut ledger = Ledger::new();
        let link = "ab".repeat(32);
        let block = ledger.seal_block(7, Some(link.clone())).unwrap();
        assert_eq!(block.previous_hash, Some(link));
    }

    #[test]
    fn test_indexes_stay_sequential_across_seals() {
        let mut ledger = Ledger::new();
        for _ in 0..4 {
            ledger.seal_block(7, None).unwrap();
        }
        for (i, block) in ledger.blocks.iter().enumerate() {
            assert_eq!(block.index, i as u64 + 1);
        }
    }

    #[test]
    fn test_accept_valid_proof_seals_and_queues_reward() {
        let mut ledger = Ledger::new();
        ledger.blocks[0] = fixture_genesis();
        ledger.queue_transaction("alice", "bob", 5).unwrap();

        let block = ledger.accept_proof_and_seal(3_831_130, "miner-7").unwrap();

        assert_eq!(ledger.blocks.len(), 2);
        assert_eq!(block.index, 2);
        assert_eq!(block.previous_hash, Some(FIXTURE_GENESIS_HASH.to_string()));
        assert_eq!(
            block.transactions,
            vec![Transaction::new("alice", "bob", 5).unwrap()]
        );
        // Reward sits in the pool for the next block, not the sealed one.
        assert_eq!(ledger.pending_transactions(), vec![Transaction::reward("miner-7")]);
    }

    #[test]
    fn test_accept_invalid_proof_leaves_state_untouched() {
        let mut ledger = Ledger::new();
        ledger.blocks[0] = fixture_genesis();
        ledger.queue_transaction("alice", "bob", 5).unwrap();

        let result = ledger.accept_proof_and_seal(1, "miner-7");
        assert_eq!(result, Err(LedgerError::InvalidProof));
        assert_eq!(ledger.blocks.len(), 1);
        assert_eq!(ledger.pool.len(), 1);
    }

    #[test]
    fn test_snapshot_reflects_chain() {
        let mut ledger = Ledger::new();
        ledger.seal_block(7, None).unwrap();

        let snapshot = ledger.chain_snapshot();
        assert_eq!(snapshot.length, 2);
        assert_eq!(snapshot.blocks, ledger.blocks);
    }
}
