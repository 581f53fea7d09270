//! Hash-chain verification of a [`Proof`].
//!
//! The walk starts from the digest of the leaf data and combines it with one
//! sibling per level. The side of each sibling comes from the position
//! arithmetic alone:
//!
//! ```text
//! index == level - 1 || index is odd  =>  node(sibling, current)
//! otherwise                           =>  node(current, sibling)
//! level = ceil(level / 2), index = index / 2
//! ```
//!
//! The first condition covers the unpaired trailing node of an odd-sized
//! level. Such a node is carried up unchanged and stays the last node of
//! every level above, so whenever it finally pairs it is the right child.

use crate::codec;
use crate::config::ProofConfig;
use crate::error::Result;
use crate::hash::DigestProvider;
use crate::proof::Proof;
use crate::ring_impl::RingProvider;
use log::{debug, trace};

/// Returns `true` when the sibling at `(index, level_size)` goes on the left.
#[inline]
pub fn sibling_is_left(index: u32, level_size: u32) -> bool {
    index + 1 == level_size || index & 1 == 1
}

/// Recomputes the root implied by `data` and the proof path.
///
/// Fails with [`Error::UnsupportedAlgorithm`] when `provider` does not know
/// the proof's hash algorithm.
///
/// [`Error::UnsupportedAlgorithm`]: crate::Error::UnsupportedAlgorithm
pub fn recompute_root<P: DigestProvider + ?Sized>(
    data: &[u8],
    proof: &Proof,
    provider: &P,
) -> Result<Vec<u8>> {
    let mut a = provider.algorithm(proof.hash_alg())?;
    let mut h = a.leaf(data);
    let mut index = proof.leaf_index();
    let mut level = proof.leaf_size();

    for (depth, sibling) in proof.proof_set().iter().enumerate() {
        let left = sibling_is_left(index, level);
        trace!(
            "level {}: index {}/{}, sibling on the {}",
            depth,
            index,
            level,
            if left { "left" } else { "right" }
        );
        h = if left {
            a.node(sibling, &h)
        } else {
            a.node(&h, sibling)
        };
        level = level / 2 + level % 2;
        index /= 2;
    }

    Ok(h)
}

/// Verifies that `data` is the leaf `proof` was issued for.
///
/// Returns `Ok(false)` on any mismatch, including a provider whose digests
/// are not as long as the proof's. The only error is an algorithm the
/// provider cannot produce.
pub fn verify<P: DigestProvider + ?Sized>(data: &[u8], proof: &Proof, provider: &P) -> Result<bool> {
    Verifier::new(provider).verify(data, proof)
}

/// Reusable proof verifier: a digest provider plus a [`ProofConfig`].
#[derive(Debug, Clone)]
pub struct Verifier<P> {
    provider: P,
    config: ProofConfig,
}

impl<P: DigestProvider> Verifier<P> {
    /// Creates a verifier with the default config.
    pub fn new(provider: P) -> Verifier<P> {
        Verifier::with_config(provider, ProofConfig::default())
    }

    /// Creates a verifier with the given config.
    pub fn with_config(provider: P, config: ProofConfig) -> Verifier<P> {
        Verifier { provider, config }
    }

    /// Returns the verifier config.
    pub fn config(&self) -> &ProofConfig {
        &self.config
    }

    /// Verifies that `data` is the leaf `proof` was issued for.
    ///
    /// A provider whose digests are not as long as the proof's gives
    /// `Ok(false)`, not an error: the root can never match. Only an algorithm
    /// the provider cannot produce is an error.
    pub fn verify(&self, data: &[u8], proof: &Proof) -> Result<bool> {
        let root = recompute_root(data, proof, &self.provider)?;
        if root.len() != proof.digest_len() {
            debug!(
                "{} produces {}-byte digests, proof carries {}-byte digests",
                proof.hash_alg(),
                root.len(),
                proof.digest_len()
            );
            return Ok(false);
        }

        let ok = if self.config.constant_time_compare {
            constant_time_eq(&root, proof.root_hash())
        } else {
            root == proof.root_hash()
        };
        if !ok {
            debug!(
                "proof for leaf {}/{} does not hash up to its root",
                proof.leaf_index(),
                proof.leaf_size()
            );
        }
        Ok(ok)
    }

    /// Decodes `encoded` under the configured limits, then verifies it.
    pub fn verify_bytes(&self, data: &[u8], encoded: &[u8]) -> Result<bool> {
        let proof = codec::decode_with_config(encoded, &self.config)?;
        self.verify(data, &proof)
    }
}

impl Default for Verifier<RingProvider> {
    fn default() -> Self {
        Verifier::new(RingProvider)
    }
}

/// Slice equality whose running time depends only on the lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
