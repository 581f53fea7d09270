use crate::error::{Error, Result};
use crate::hash::{canonical_name, unsupported, Algorithm, DigestProvider};
use crate::proof::Proof;
use std::fmt;

pub const SIZE: usize = 0x10;

/// Toy 16-byte digest: bytes are folded into the state with XOR.
#[derive(Debug, Copy, Clone, Default)]
pub struct XOR128 {
    data: [u8; SIZE],
    i: usize,
}

impl XOR128 {
    pub fn new() -> XOR128 {
        XOR128 {
            data: [0; SIZE],
            i: 0,
        }
    }
}

impl Algorithm for XOR128 {
    fn write(&mut self, bytes: &[u8]) {
        for x in bytes {
            self.data[self.i & (SIZE - 1)] ^= *x;
            self.i += 1;
        }
    }

    #[inline]
    fn hash(&mut self) -> Vec<u8> {
        self.data.to_vec()
    }

    #[inline]
    fn reset(&mut self) {
        *self = XOR128::new();
    }

    fn digest_len(&self) -> usize {
        SIZE
    }
}

impl fmt::UpperHex for XOR128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for b in self.data.as_ref() {
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

/// Provider that knows only `XOR128`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xor128Provider;

impl DigestProvider for Xor128Provider {
    fn algorithm(&self, name: &str) -> Result<Box<dyn Algorithm>> {
        if canonical_name(name) == "XOR128" {
            Ok(Box::new(XOR128::new()))
        } else {
            Err(unsupported(name))
        }
    }
}

/// Builds every level of a reference tree over `leaves`, leaf level first,
/// root level last.
///
/// Pairs are hashed left to right. The last node of an odd-sized level has no
/// partner and is carried up to the next level unchanged.
pub fn tree_levels(a: &mut dyn Algorithm, leaves: &[Vec<u8>]) -> Vec<Vec<Vec<u8>>> {
    assert!(!leaves.is_empty());

    let mut levels = vec![leaves.iter().map(|d| a.leaf(d)).collect::<Vec<_>>()];
    while levels[levels.len() - 1].len() > 1 {
        let level = &levels[levels.len() - 1];
        let mut next = Vec::with_capacity(level.len() / 2 + 1);
        for pair in level.chunks(2) {
            if pair.len() == 2 {
                next.push(a.node(&pair[0], &pair[1]));
            } else {
                next.push(pair[0].clone());
            }
        }
        levels.push(next);
    }
    levels
}

/// Generates the inclusion proof for leaf `i` of a tree built by [`tree_levels`].
///
/// A level where the node is carried up unchanged contributes no sibling.
pub fn gen_proof(levels: &[Vec<Vec<u8>>], i: usize, hash_alg: &str) -> Proof {
    let mut proof_set = Vec::new();
    let mut j = i;
    for level in &levels[..levels.len() - 1] {
        let unpaired = level.len() % 2 == 1 && j == level.len() - 1;
        if !unpaired {
            proof_set.push(level[j ^ 1].clone());
        }
        j >>= 1;
    }

    let root = levels[levels.len() - 1][0].clone();
    Proof::new(root, proof_set, i as u32, levels[0].len() as u32, hash_alg)
        .expect("reference tree produced an invalid proof")
}

/// Returns the field named by a `MalformedProof` error, panics on anything else.
pub fn malformed_field(r: Result<Proof>) -> &'static str {
    match r {
        Err(Error::MalformedProof { field, .. }) => field,
        other => panic!("expected MalformedProof, got {:?}", other),
    }
}

#[test]
fn test_hasher_simple() {
    let mut h = XOR128::new();
    h.write(b"1234567812345678");
    assert_eq!(format!("{:#X}", h), "0x31323334353637383132333435363738");
    h.write(b"1234567812345678");
    assert_eq!(format!("{:#X}", h), "0x00000000000000000000000000000000");
    h.reset();
    assert_eq!(h.leaf(b"1234567812345678"), b"1234567812345678".to_vec());
}

#[test]
fn test_reference_tree_shape() {
    let mut a = XOR128::new();
    let leaves: Vec<Vec<u8>> = (0u8..7).map(|i| vec![i]).collect();
    let levels = tree_levels(&mut a, &leaves);

    let widths: Vec<usize> = levels.iter().map(|l| l.len()).collect();
    assert_eq!(widths, vec![7, 4, 2, 1]);
    // trailing leaf 6 is carried up as is
    assert_eq!(levels[1][3], levels[0][6]);

    // leaf 6 skips level 0 and pairs at level 1
    let p = gen_proof(&levels, 6, "XOR128");
    assert_eq!(p.depth(), 2);
    assert_eq!(p.proof_set()[0], levels[1][2]);
    assert_eq!(p.proof_set()[1], levels[2][0]);
}
