//! Process context
//!
//! The ledger and the node identity live in an explicit context constructed
//! once at startup and handed to every caller; nothing in this crate is a
//! process-wide global. Lifecycle is init-once with no teardown: all state
//! is process memory and is lost on exit.
//!
//! Concurrency discipline: every mutating operation takes the write lock
//! for the whole read-modify-write of chain and pool together, so a seal
//! can never observe a pool another call is mid-way through appending to.
//! Reads take the shared lock and observe a consistent snapshot. All work
//! under the lock is a hash and a comparison; no I/O ever happens inside
//! the critical section.

use parking_lot::RwLock;
use tracing::info;

use crate::config::{load_config, Config};
use crate::error::Result;
use crate::hashing::BlockHash;
use crate::ledger::{Block, ChainSnapshot, Ledger};
use crate::transaction::Transaction;

pub struct NodeContext {
    node_id: String,
    ledger: RwLock<Ledger>,
}

impl NodeContext {
    /// Build a context from an already-loaded configuration. No global side
    /// effects; use this from tests and embedding code.
    pub fn new(config: &Config) -> Self {
        NodeContext {
            node_id: config.node.node_id.clone(),
            ledger: RwLock::new(Ledger::new()),
        }
    }

    /// Load `config.toml`, install the tracing subscriber and build the
    /// context. Call once at process start.
    pub fn init() -> Result<Self> {
        let config = load_config()?;
        tracing_subscriber::fmt::init();
        info!(node_id = %config.node.node_id, "ledger context initialized");
        Ok(Self::new(&config))
    }

    /// Identity this process reports as a mining participant. Assigned by
    /// the operator through configuration, never generated here.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Validate and queue a transaction.
    ///
    /// The returned index is the same non-guaranteed inclusion hint as
    /// [`Ledger::queue_transaction`]: a seal between this call and any use
    /// of the value makes it stale.
    pub fn queue_transaction(&self, sender: &str, recipient: &str, amount: u64) -> Result<u64> {
        self.ledger.write().queue_transaction(sender, recipient, amount)
    }

    /// Seal the pending pool into a new block without checking any proof.
    ///
    /// Trusts the caller; the predicate-checked path is
    /// [`NodeContext::accept_proof_and_seal`].
    pub fn seal_block(&self, proof: u64, previous_hash: Option<BlockHash>) -> Result<Block> {
        self.ledger.write().seal_block(proof, previous_hash)
    }

    /// Check a submitted proof and, if it meets the difficulty target, seal
    /// the pending pool into a new block credited to `miner_id`.
    pub fn accept_proof_and_seal(&self, proof: u64, miner_id: &str) -> Result<Block> {
        self.ledger.write().accept_proof_and_seal(proof, miner_id)
    }

    /// Clone of the most recent block.
    pub fn last_block(&self) -> Block {
        self.ledger.read().last_block().clone()
    }

    /// Consistent snapshot of the full chain.
    pub fn chain_snapshot(&self) -> ChainSnapshot {
        self.ledger.read().chain_snapshot()
    }

    /// Transactions awaiting inclusion at the instant of the call.
    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.ledger.read().pending_transactions()
    }
}
