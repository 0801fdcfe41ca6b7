//! Canonical block serialization and digests
//!
//! The chain is only verifiable if hashing the same logical block always
//! yields the same digest, so the hash input is a canonical encoding:
//! compact JSON with field names in lexicographic order. Two independent
//! implementations that agree on this rule produce byte-identical
//! serializations and therefore matching digests.

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::ledger::Block;

/// Lowercase hex rendering of a SHA-256 digest.
pub type BlockHash = String;

/// Canonical byte encoding of a block.
///
/// The block is round-tripped through `serde_json::Value`, whose object map
/// keeps keys sorted, so the output is independent of struct field
/// declaration order.
pub fn canonical_block_bytes(block: &Block) -> Result<Vec<u8>> {
    let value = serde_json::to_value(block)?;
    Ok(serde_json::to_string(&value)?.into_bytes())
}

/// SHA-256 digest of the canonical encoding, rendered as lowercase hex.
///
/// Pure: no side effects, and repeated calls on an unchanged block value
/// return an identical digest.
pub fn hash_block(block: &Block) -> Result<BlockHash> {
    let bytes = canonical_block_bytes(block)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
