//! Compact _Merkle Tree_ inclusion proofs.
//!
//! A [`Proof`] lets a verifier confirm that a piece of data is a leaf of a
//! Merkle tree knowing only the tree root. It carries the root hash, the
//! chain of sibling digests from the leaf level up to the root, the leaf's
//! position and level size, and the name of the digest algorithm.
//!
//! Hashing scheme:
//!
//! ```text
//! leaf(d)       = ALG(d)
//! node(l, r)    = ALG(l || r)
//! ```
//!
//! The last node of an odd-sized level is carried up unchanged. Proofs carry
//! no per-level direction flags: the verifier derives each sibling's side from
//! `(index, level size)` alone (see [`verify`]).
//!
//! Link: [](https://en.wikipedia.org/wiki/Merkle_tree)
//!
//! # Implementation choices
//!
//! The digest length is only known at run time, from the decoded buffer or
//! from the algorithm name, so digests are plain byte vectors. The library
//! does not build trees and does not pick hash implementations: an
//! [`Algorithm`] is obtained by name from a [`DigestProvider`]. `ring`
//! backs the default [`RingProvider`]; the `rust-crypto` feature adds
//! `CryptoProvider` with the MD5, SHA-224 and SHA-3 families.
//!
//! # Interface
//!
//! ```text
//! - Proof::new (root, siblings, index, size, alg) -> proof
//! - encode (proof) -> bytes
//! - decode (bytes) -> proof
//! - verify (data, proof, provider) -> bool
//! ```
//!
//! # Wire format
//!
//! See [`codec`]. Integers are 4-byte big-endian, the algorithm name runs to
//! the end of the buffer.
//!
//! # Quick start
//!
//! ```
//! extern crate merkle_proof;
//!
//! use merkle_proof::{Algorithm, DigestProvider, Proof, RingProvider};
//!
//! fn main() {
//!     let mut a = RingProvider.algorithm("SHA-256").unwrap();
//!
//!     // two leaves: our data on the right
//!     let sibling = a.leaf(b"left leaf");
//!     let leaf = a.leaf(b"right leaf");
//!     let root = a.node(&sibling, &leaf);
//!
//!     let proof = Proof::new(root, vec![sibling], 1, 2, "SHA-256").unwrap();
//!     let bytes = proof.to_bytes();
//!
//!     let decoded = Proof::from_bytes(&bytes).unwrap();
//!     assert!(decoded.verify(b"right leaf").unwrap());
//!     assert!(!decoded.verify(b"left leaf").unwrap());
//! }
//! ```

#![deny(
    missing_docs,
    unused_qualifications,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]

/// Proof errors.
mod error;
pub use crate::error::{Error, Result};

/// Hash infrastructure for proof verification.
pub mod hash;
pub use crate::hash::{Algorithm, DigestProvider};

/// `ring` digests.
mod ring_impl;
pub use crate::ring_impl::{RingAlgorithm, RingProvider};

/// `rust-crypto` digests.
#[cfg(feature = "rust-crypto")]
mod crypto_impl;
#[cfg(feature = "rust-crypto")]
pub use crate::crypto_impl::{CryptoAlgorithm, CryptoProvider};

/// Decode limits and verification options.
pub mod config;
pub use crate::config::ProofConfig;

/// Merkle tree inclusion proof.
pub mod proof;
pub use crate::proof::Proof;

/// Proof wire format.
pub mod codec;

/// Proof verification.
pub mod verify;
pub use crate::verify::Verifier;

#[cfg(test)]
mod test_common;
