use crate::codec::{self, MAX_WIRE_VALUE};
use crate::error::{Error, Result};
use crate::hash::DigestProvider;
use crate::ring_impl::RingProvider;
use crate::verify;
use std::fmt;

/// Longest digest a proof may carry (SHA-512 needs 64).
pub const MAX_DIGEST_LEN: usize = 128;

/// Most siblings any proof may carry: a level of at most `i32::MAX` nodes
/// is at most 31 levels below the root.
pub const MAX_DEPTH: usize = 31;

/// Number of levels between a level of `leaf_size` nodes and the root,
/// `ceil(log2(leaf_size))`.
pub fn max_depth(leaf_size: u32) -> usize {
    match leaf_size {
        0 | 1 => 0,
        n => (u32::BITS - (n - 1).leading_zeros()) as usize,
    }
}

/// Merkle tree inclusion proof for a single data item.
///
/// Proof layout, leaf to root:
///
/// ```text
/// digest(data)  proof_set[0]  proof_set[1]  ...  root_hash
/// ```
///
/// `leaf_index` and `leaf_size` locate the leaf in its level. They are enough
/// to decide on which side each sibling sits, so the proof carries no
/// per-level direction flags.
///
/// A `Proof` is immutable. Every value, including decoded ones, went through
/// [`Proof::new`], so all digests share one length and
/// `leaf_index < leaf_size`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Proof {
    root_hash: Vec<u8>,
    proof_set: Vec<Vec<u8>>,
    leaf_index: u32,
    leaf_size: u32,
    hash_alg: String,
}

impl Proof {
    /// Creates new MT inclusion proof.
    ///
    /// Fails with [`Error::MalformedProof`] when `root_hash` is empty or
    /// longer than [`MAX_DIGEST_LEN`], when a sibling is not exactly as long
    /// as `root_hash`, when `leaf_size` does not fit the signed 32-bit wire
    /// field, when `leaf_index >= leaf_size`, or when there are more siblings
    /// than levels above a level of `leaf_size` nodes.
    pub fn new<S: Into<String>>(
        root_hash: Vec<u8>,
        proof_set: Vec<Vec<u8>>,
        leaf_index: u32,
        leaf_size: u32,
        hash_alg: S,
    ) -> Result<Proof> {
        let digest_len = root_hash.len();
        if digest_len == 0 {
            return Err(Error::malformed("rootHash", "digest is empty"));
        }
        if digest_len > MAX_DIGEST_LEN {
            return Err(Error::malformed(
                "rootHash",
                format!("digest length {} exceeds {}", digest_len, MAX_DIGEST_LEN),
            ));
        }
        if let Some((i, sibling)) = proof_set
            .iter()
            .enumerate()
            .find(|(_, s)| s.len() != digest_len)
        {
            return Err(Error::malformed(
                "proofSet",
                format!(
                    "sibling {} has {} bytes, root has {}",
                    i,
                    sibling.len(),
                    digest_len
                ),
            ));
        }
        if leaf_size > MAX_WIRE_VALUE {
            return Err(Error::malformed(
                "leafSize",
                format!("{} exceeds {}", leaf_size, MAX_WIRE_VALUE),
            ));
        }
        if leaf_index >= leaf_size {
            return Err(Error::malformed(
                "leafIndex",
                format!("index {} is outside a level of {}", leaf_index, leaf_size),
            ));
        }
        let levels = max_depth(leaf_size);
        if proof_set.len() > levels {
            return Err(Error::malformed(
                "proofSet",
                format!(
                    "{} siblings, a level of {} is {} levels below the root",
                    proof_set.len(),
                    leaf_size,
                    levels
                ),
            ));
        }

        Ok(Proof {
            root_hash,
            proof_set,
            leaf_index,
            leaf_size,
            hash_alg: hash_alg.into(),
        })
    }

    /// Returns the root the proof must hash up to.
    pub fn root_hash(&self) -> &[u8] {
        &self.root_hash
    }

    /// Returns the sibling digests, leaf to root.
    pub fn proof_set(&self) -> &[Vec<u8>] {
        &self.proof_set
    }

    /// Returns the leaf position within its level.
    pub fn leaf_index(&self) -> u32 {
        self.leaf_index
    }

    /// Returns the number of nodes in the leaf's level.
    pub fn leaf_size(&self) -> u32 {
        self.leaf_size
    }

    /// Returns the hash algorithm name.
    pub fn hash_alg(&self) -> &str {
        &self.hash_alg
    }

    /// Returns the length shared by the root and every sibling digest.
    pub fn digest_len(&self) -> usize {
        self.root_hash.len()
    }

    /// Returns the number of combine steps between leaf and root.
    pub fn depth(&self) -> usize {
        self.proof_set.len()
    }

    /// Encodes the proof into its wire form, see [`codec::encode`].
    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Decodes a proof from its wire form with default limits, see [`codec::decode`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Proof> {
        codec::decode(bytes)
    }

    /// Verifies that `data` is the leaf this proof was issued for, using the
    /// `ring` digests.
    pub fn verify(&self, data: &[u8]) -> Result<bool> {
        verify::verify(data, self, &RingProvider)
    }

    /// Verifies that `data` is the leaf this proof was issued for, using the
    /// given provider.
    pub fn verify_with<P: DigestProvider + ?Sized>(&self, data: &[u8], provider: &P) -> Result<bool> {
        verify::verify(data, self, provider)
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Proof {{ root: {}, siblings: [", hex::encode(&self.root_hash))?;
        for (i, sibling) in self.proof_set.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&hex::encode(sibling))?;
        }
        write!(
            f,
            "], leaf: {}/{}, alg: {} }}",
            self.leaf_index, self.leaf_size, self.hash_alg
        )
    }
}

#[cfg(test)]
use crate::test_common::malformed_field;

#[test]
fn test_new_accepts_valid() {
    let p = Proof::new(vec![1; 4], vec![vec![2; 4], vec![3; 4]], 2, 3, "SHA-256").unwrap();
    assert_eq!(p.root_hash(), &[1, 1, 1, 1]);
    assert_eq!(p.proof_set().len(), 2);
    assert_eq!(p.leaf_index(), 2);
    assert_eq!(p.leaf_size(), 3);
    assert_eq!(p.hash_alg(), "SHA-256");
    assert_eq!(p.digest_len(), 4);
    assert_eq!(p.depth(), 2);

    let single = Proof::new(vec![9; 32], vec![], 0, 1, "SHA-256").unwrap();
    assert_eq!(single.depth(), 0);
}

#[test]
fn test_new_rejects_invariant_violations() {
    assert_eq!(
        malformed_field(Proof::new(vec![], vec![], 0, 1, "SHA-256")),
        "rootHash"
    );
    assert_eq!(
        malformed_field(Proof::new(vec![0; 4], vec![vec![0; 4], vec![0; 3]], 0, 4, "SHA-256")),
        "proofSet"
    );
    assert_eq!(
        malformed_field(Proof::new(vec![0; 4], vec![], 1, 1, "SHA-256")),
        "leafIndex"
    );
    assert_eq!(
        malformed_field(Proof::new(vec![0; 4], vec![], 0, 0, "SHA-256")),
        "leafIndex"
    );
    assert_eq!(
        malformed_field(Proof::new(vec![0; 4], vec![], 0, u32::MAX, "SHA-256")),
        "leafSize"
    );
}

#[test]
fn test_display() {
    let p = Proof::new(vec![0xab, 0xcd], vec![vec![0x01, 0x02], vec![0xff, 0x00]], 1, 4, "SHA-256")
        .unwrap();
    assert_eq!(
        p.to_string(),
        "Proof { root: abcd, siblings: [0102, ff00], leaf: 1/4, alg: SHA-256 }"
    );

    let single = Proof::new(vec![0x10], vec![], 0, 1, "XOR128").unwrap();
    assert_eq!(
        single.to_string(),
        "Proof { root: 10, siblings: [], leaf: 0/1, alg: XOR128 }"
    );
}

#[test]
fn test_max_depth() {
    assert_eq!(max_depth(1), 0);
    assert_eq!(max_depth(2), 1);
    assert_eq!(max_depth(3), 2);
    assert_eq!(max_depth(4), 2);
    assert_eq!(max_depth(5), 3);
    assert_eq!(max_depth(1 << 20), 20);
    assert_eq!(max_depth((1 << 20) + 1), 21);
    assert_eq!(max_depth(MAX_WIRE_VALUE), MAX_DEPTH);
}

#[test]
fn test_new_bounds_depth_and_digest() {
    // more siblings than levels above the leaf
    assert_eq!(
        malformed_field(Proof::new(vec![1; 32], vec![vec![2; 32]; 65], 0, 2, "SHA-256")),
        "proofSet"
    );
    assert_eq!(
        malformed_field(Proof::new(vec![1; 32], vec![vec![2; 32]; 2], 0, 2, "SHA-256")),
        "proofSet"
    );
    assert_eq!(
        malformed_field(Proof::new(vec![1; 32], vec![vec![2; 32]], 0, 1, "SHA-256")),
        "proofSet"
    );
    assert_eq!(
        malformed_field(Proof::new(vec![1; MAX_DIGEST_LEN + 1], vec![], 0, 1, "SHA-256")),
        "rootHash"
    );

    // largest accepted proof still decodes with the default limits
    let widest = Proof::new(
        vec![1; MAX_DIGEST_LEN],
        vec![vec![2; MAX_DIGEST_LEN]; MAX_DEPTH],
        MAX_WIRE_VALUE - 1,
        MAX_WIRE_VALUE,
        "SHA-256",
    )
    .unwrap();
    assert_eq!(Proof::from_bytes(&widest.to_bytes()).unwrap(), widest);
}
