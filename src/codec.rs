//! Wire format of a [`Proof`].
//!
//! All integers are 4-byte big-endian signed values, laid out back to back
//! without padding:
//!
//! ```text
//! digestLength | siblingCount | leafIndex | leafSize | rootHash | proofSet | hashAlg
//! ```
//!
//! `rootHash` takes `digestLength` bytes and `proofSet` takes
//! `siblingCount * digestLength` bytes. `hashAlg` is UTF-8 text and has no
//! length prefix: it runs to the end of the buffer. The format is therefore
//! closed. Nothing can be appended after the name, and a buffer with
//! trailing padding decodes to a different algorithm name.

use crate::config::ProofConfig;
use crate::error::{Error, Result};
use crate::proof::Proof;
use log::debug;

/// Largest value a wire integer can carry.
pub(crate) const MAX_WIRE_VALUE: u32 = i32::MAX as u32;

/// Byte length of the fixed integer header.
pub const HEADER_LEN: usize = 16;

/// Returns the length of `proof`'s wire form.
pub fn encoded_len(proof: &Proof) -> usize {
    HEADER_LEN + (proof.depth() + 1) * proof.digest_len() + proof.hash_alg().len()
}

/// Encodes `proof` into its wire form.
///
/// Infallible: [`Proof::new`] already rejected siblings whose length differs
/// from the root, and values too large for the integer fields. The result
/// decodes back to `proof` under the default [`ProofConfig`] limits.
pub fn encode(proof: &Proof) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(proof));

    // Proof::new bounds these by MAX_DIGEST_LEN, MAX_DEPTH and MAX_WIRE_VALUE
    put_int(&mut out, proof.digest_len() as u32);
    put_int(&mut out, proof.depth() as u32);
    put_int(&mut out, proof.leaf_index());
    put_int(&mut out, proof.leaf_size());

    out.extend_from_slice(proof.root_hash());
    for sibling in proof.proof_set() {
        out.extend_from_slice(sibling);
    }
    out.extend_from_slice(proof.hash_alg().as_bytes());

    out
}

/// Decodes a proof with the default [`ProofConfig`] limits.
pub fn decode(bytes: &[u8]) -> Result<Proof> {
    decode_with_config(bytes, &ProofConfig::default())
}

/// Decodes a proof, rejecting buffers that declare more siblings or longer
/// digests than `config` allows.
///
/// Fails with [`Error::MalformedProof`] at the first inconsistency; no partial
/// proof is returned. Decoding checks structure only, a decoded proof may
/// still fail verification.
pub fn decode_with_config(bytes: &[u8], config: &ProofConfig) -> Result<Proof> {
    let proof = read_proof(bytes, config);
    if let Err(ref e) = proof {
        debug!("rejecting {}-byte proof buffer: {}", bytes.len(), e);
    }
    proof
}

fn read_proof(bytes: &[u8], config: &ProofConfig) -> Result<Proof> {
    let mut cursor = Cursor::new(bytes);

    let digest_len = cursor.read_len("digestLength")?;
    let sibling_count = cursor.read_len("siblingCount")?;
    let leaf_index = cursor.read_len("leafIndex")? as u32;
    let leaf_size = cursor.read_len("leafSize")? as u32;

    if digest_len == 0 {
        return Err(Error::malformed("digestLength", "digest length is zero"));
    }
    if digest_len > config.max_digest_len {
        return Err(Error::malformed(
            "digestLength",
            format!("{} exceeds limit {}", digest_len, config.max_digest_len),
        ));
    }
    if sibling_count > config.max_siblings {
        return Err(Error::malformed(
            "siblingCount",
            format!("{} exceeds limit {}", sibling_count, config.max_siblings),
        ));
    }

    // check the whole digest block up front, before allocating for it
    let digests_len = (sibling_count + 1).saturating_mul(digest_len);
    if cursor.remaining() < digests_len {
        let field = if cursor.remaining() < digest_len {
            "rootHash"
        } else {
            "proofSet"
        };
        return Err(Error::malformed(
            field,
            format!(
                "need {} bytes for {} digests of {} bytes, {} left",
                digests_len,
                sibling_count + 1,
                digest_len,
                cursor.remaining()
            ),
        ));
    }

    let root_hash = cursor.read_bytes("rootHash", digest_len)?.to_vec();
    let mut proof_set = Vec::with_capacity(sibling_count);
    for _ in 0..sibling_count {
        proof_set.push(cursor.read_bytes("proofSet", digest_len)?.to_vec());
    }

    let hash_alg = std::str::from_utf8(cursor.read_rest())
        .map_err(|e| Error::malformed("hashAlg", format!("invalid UTF-8: {}", e)))?;

    Proof::new(root_hash, proof_set, leaf_index, leaf_size, hash_alg)
}

fn put_int(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

/// Read position over an input buffer. Every read checks the remaining
/// length first and fails instead of slicing out of bounds.
struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn read_bytes(&mut self, field: &'static str, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::malformed(
                field,
                format!("need {} bytes, {} left", len, self.remaining()),
            ));
        }
        let out = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(out)
    }

    fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.read_bytes(field, 4)?);
        Ok(i32::from_be_bytes(raw))
    }

    /// Reads a wire integer that must not be negative.
    fn read_len(&mut self, field: &'static str) -> Result<usize> {
        let v = self.read_i32(field)?;
        usize::try_from(v).map_err(|_| Error::malformed(field, format!("negative value {}", v)))
    }

    fn read_rest(&mut self) -> &'a [u8] {
        let out = &self.bytes[self.offset..];
        self.offset = self.bytes.len();
        out
    }
}
