use crate::error::Result;
use crate::hash::{canonical_name, unsupported, Algorithm, DigestProvider};
use crypto::digest::Digest;
use crypto::md5::Md5;
use crypto::sha1::Sha1;
use crypto::sha2::{Sha224, Sha256, Sha384, Sha512, Sha512Trunc224, Sha512Trunc256};
use crypto::sha3::{Sha3, Sha3Mode};
use std::fmt;

/// [`Algorithm`] over a `rust-crypto` digest.
pub struct CryptoAlgorithm {
    name: &'static str,
    digest: Box<dyn Digest>,
}

impl CryptoAlgorithm {
    /// Wraps a `rust-crypto` digest under the given display name.
    pub fn new(name: &'static str, digest: Box<dyn Digest>) -> CryptoAlgorithm {
        CryptoAlgorithm { name, digest }
    }
}

impl fmt::Debug for CryptoAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CryptoAlgorithm")
            .field("name", &self.name)
            .finish()
    }
}

impl Algorithm for CryptoAlgorithm {
    #[inline]
    fn write(&mut self, data: &[u8]) {
        self.digest.input(data)
    }

    /// Finalizes the digest; the state must be reset before further writes.
    #[inline]
    fn hash(&mut self) -> Vec<u8> {
        let mut h = vec![0u8; self.digest.output_bytes()];
        self.digest.result(&mut h);
        h
    }

    #[inline]
    fn reset(&mut self) {
        self.digest.reset();
    }

    fn digest_len(&self) -> usize {
        self.digest.output_bytes()
    }
}

/// Digest provider backed by `rust-crypto`.
///
/// Covers the MD5, SHA-1, SHA-2 and SHA-3 families, including the names
/// `ring` has no implementation for (`MD5`, `SHA-224`, `SHA-512/224`,
/// `SHA3-*`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CryptoProvider;

impl CryptoProvider {
    fn lookup(name: &str) -> Option<CryptoAlgorithm> {
        let (name, digest): (&'static str, Box<dyn Digest>) = match canonical_name(name).as_str() {
            "MD5" => ("MD5", Box::new(Md5::new())),
            "SHA1" => ("SHA-1", Box::new(Sha1::new())),
            "SHA224" => ("SHA-224", Box::new(Sha224::new())),
            "SHA256" => ("SHA-256", Box::new(Sha256::new())),
            "SHA384" => ("SHA-384", Box::new(Sha384::new())),
            "SHA512" => ("SHA-512", Box::new(Sha512::new())),
            "SHA512/224" => ("SHA-512/224", Box::new(Sha512Trunc224::new())),
            "SHA512/256" => ("SHA-512/256", Box::new(Sha512Trunc256::new())),
            "SHA3224" => ("SHA3-224", Box::new(Sha3::new(Sha3Mode::Sha3_224))),
            "SHA3256" => ("SHA3-256", Box::new(Sha3::new(Sha3Mode::Sha3_256))),
            "SHA3384" => ("SHA3-384", Box::new(Sha3::new(Sha3Mode::Sha3_384))),
            "SHA3512" => ("SHA3-512", Box::new(Sha3::new(Sha3Mode::Sha3_512))),
            _ => return None,
        };
        Some(CryptoAlgorithm::new(name, digest))
    }
}

impl DigestProvider for CryptoProvider {
    fn algorithm(&self, name: &str) -> Result<Box<dyn Algorithm>> {
        match CryptoProvider::lookup(name) {
            Some(alg) => Ok(Box::new(alg)),
            None => Err(unsupported(name)),
        }
    }
}
