use crate::error::Result;
use crate::hash::{canonical_name, unsupported, Algorithm, DigestProvider};
use ring::digest::{self, Context};
use std::fmt;

/// [`Algorithm`] over a `ring` digest context.
///
/// `ring::digest::Context` is not reusable after `finish(self)`, so
/// [`Algorithm::hash`] finalizes a clone and leaves the running state intact.
#[derive(Clone)]
pub struct RingAlgorithm {
    alg: &'static digest::Algorithm,
    ctx: Context,
}

impl RingAlgorithm {
    /// Creates a fresh state for the given `ring` digest.
    pub fn new(alg: &'static digest::Algorithm) -> RingAlgorithm {
        RingAlgorithm {
            alg,
            ctx: Context::new(alg),
        }
    }
}

impl fmt::Debug for RingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RingAlgorithm")
            .field("alg", self.alg)
            .finish()
    }
}

impl Algorithm for RingAlgorithm {
    #[inline]
    fn write(&mut self, data: &[u8]) {
        self.ctx.update(data)
    }

    #[inline]
    fn hash(&mut self) -> Vec<u8> {
        self.ctx.clone().finish().as_ref().to_vec()
    }

    #[inline]
    fn reset(&mut self) {
        self.ctx = Context::new(self.alg);
    }

    fn digest_len(&self) -> usize {
        self.alg.output_len()
    }
}

/// Digest provider backed by `ring`.
///
/// Knows `SHA-1`, `SHA-256`, `SHA-384`, `SHA-512` and `SHA-512/256`. Names
/// are matched ignoring case and `-`/`_` separators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RingProvider;

impl RingProvider {
    fn lookup(name: &str) -> Option<&'static digest::Algorithm> {
        match canonical_name(name).as_str() {
            "SHA1" => Some(&digest::SHA1_FOR_LEGACY_USE_ONLY),
            "SHA256" => Some(&digest::SHA256),
            "SHA384" => Some(&digest::SHA384),
            "SHA512" => Some(&digest::SHA512),
            "SHA512/256" => Some(&digest::SHA512_256),
            _ => None,
        }
    }
}

impl DigestProvider for RingProvider {
    fn algorithm(&self, name: &str) -> Result<Box<dyn Algorithm>> {
        match RingProvider::lookup(name) {
            Some(alg) => Ok(Box::new(RingAlgorithm::new(alg))),
            None => Err(unsupported(name)),
        }
    }
}
