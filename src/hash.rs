//! Hash infrastructure for proof verification.
//!
//! An [`Algorithm`] is a reusable digest state following the
//! `start-update-finish-reset` lifecycle. Leaf and interior node hashes are
//! derived from it: a leaf is the plain digest of the data, an interior node
//! is the digest of `left || right`, without any domain prefix.
//!
//! A [`DigestProvider`] maps the algorithm name carried by a proof to a fresh
//! [`Algorithm`] instance.

use crate::error::{Error, Result};

/// Hashing algorithm type.
///
/// Most cryptographic digests break their state on finalization, so
/// [`Algorithm::hash`] takes `&mut self` and the state must be [`reset`]
/// before it is reused.
///
/// [`reset`]: Algorithm::reset
pub trait Algorithm {
    /// Feeds bytes into the digest state.
    fn write(&mut self, data: &[u8]);

    /// Returns the hash value for the data stream written so far.
    fn hash(&mut self) -> Vec<u8>;

    /// Reset digest state.
    fn reset(&mut self);

    /// Length in bytes of the values returned by [`Algorithm::hash`].
    fn digest_len(&self) -> usize;

    /// Returns the hash value for a leaf: the digest of `data`.
    fn leaf(&mut self, data: &[u8]) -> Vec<u8> {
        self.reset();
        self.write(data);
        self.hash()
    }

    /// Returns the hash value for an interior node: the digest of `left || right`.
    fn node(&mut self, left: &[u8], right: &[u8]) -> Vec<u8> {
        self.reset();
        self.write(left);
        self.write(right);
        self.hash()
    }
}

/// Source of [`Algorithm`] instances by name.
pub trait DigestProvider {
    /// Returns a fresh digest state for the algorithm called `name`.
    ///
    /// Fails with [`Error::UnsupportedAlgorithm`] when the name is not known.
    fn algorithm(&self, name: &str) -> Result<Box<dyn Algorithm>>;
}

impl<'a, P: DigestProvider + ?Sized> DigestProvider for &'a P {
    fn algorithm(&self, name: &str) -> Result<Box<dyn Algorithm>> {
        (**self).algorithm(name)
    }
}

/// Folds an algorithm name into the form providers match on: upper case,
/// without `-` and `_` separators, so `SHA-256`, `sha256` and `Sha_256` agree.
pub(crate) fn canonical_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_uppercase)
        .collect()
}

pub(crate) fn unsupported(name: &str) -> Error {
    Error::UnsupportedAlgorithm(name.to_string())
}

#[test]
fn test_canonical_name() {
    assert_eq!(canonical_name("SHA-256"), "SHA256");
    assert_eq!(canonical_name("sha256"), "SHA256");
    assert_eq!(canonical_name("Sha_512/256"), "SHA512/256");
    assert_eq!(canonical_name("sha3-384"), "SHA3384");
    assert_eq!(canonical_name(""), "");
}
