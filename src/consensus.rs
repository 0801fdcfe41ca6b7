//! Proof acceptance
//!
//! Verification only. Discovering a satisfying proof is the job of an
//! external mining participant; no search loop exists anywhere in this
//! crate.

use sha2::{Digest, Sha256};

/// Hex prefix a candidate digest must carry: six hex zeros, i.e. the 24
/// most significant bits. This constant defines the system's difficulty.
pub const DIFFICULTY_PREFIX: &str = "000000";

/// Proof recorded on the genesis block. Never checked against the
/// predicate.
pub const GENESIS_PROOF: u64 = 100;

/// True iff `sha256(block_repr ++ decimal proof)` renders to hex starting
/// with [`DIFFICULTY_PREFIX`].
///
/// `block_repr` is the canonical byte encoding of the reference block (see
/// [`crate::hashing::canonical_block_bytes`]). Pure function, no side
/// effects.
pub fn valid_proof(block_repr: &[u8], proof: u64) -> bool {
    let mut hasher = Sha256::new();
    hasher.update(block_repr);
    hasher.update(proof.to_string().as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest.starts_with(DIFFICULTY_PREFIX)
}
