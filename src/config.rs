use crate::proof::{MAX_DEPTH, MAX_DIGEST_LEN};
use serde::{Deserialize, Serialize};

/// Upper bound on sibling digests accepted by decode. Defaults to the most
/// siblings [`Proof::new`] accepts, so every proof decodes from its own bytes.
///
/// [`Proof::new`]: crate::Proof::new
pub const DEFAULT_MAX_SIBLINGS: usize = MAX_DEPTH;

/// Upper bound on digest length accepted by decode. Defaults to the longest
/// digest [`Proof::new`] accepts.
///
/// [`Proof::new`]: crate::Proof::new
pub const DEFAULT_MAX_DIGEST_LEN: usize = MAX_DIGEST_LEN;

/// Decode limits and verification options.
///
/// Every field falls back to its default when missing from a serialized
/// config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofConfig {
    /// Largest `siblingCount` a decoded buffer may declare.
    pub max_siblings: usize,

    /// Largest `digestLength` a decoded buffer may declare.
    pub max_digest_len: usize,

    /// Compare the recomputed root against the stored one in constant time.
    pub constant_time_compare: bool,
}

impl ProofConfig {
    /// Config with the given decode limits and constant-time comparison.
    pub fn new(max_siblings: usize, max_digest_len: usize) -> Self {
        ProofConfig {
            max_siblings,
            max_digest_len,
            constant_time_compare: true,
        }
    }
}

impl Default for ProofConfig {
    fn default() -> Self {
        ProofConfig::new(DEFAULT_MAX_SIBLINGS, DEFAULT_MAX_DIGEST_LEN)
    }
}

#[test]
fn test_config_defaults() {
    let c = ProofConfig::default();
    assert_eq!(c.max_siblings, DEFAULT_MAX_SIBLINGS);
    assert_eq!(c.max_digest_len, DEFAULT_MAX_DIGEST_LEN);
    assert!(c.constant_time_compare);
}

#[test]
fn test_config_from_json() {
    let c: ProofConfig = serde_json::from_str(r#"{ "max_siblings": 8 }"#).unwrap();
    assert_eq!(c, ProofConfig::new(8, DEFAULT_MAX_DIGEST_LEN));

    let c: ProofConfig = serde_json::from_str(
        r#"{ "max_digest_len": 32, "constant_time_compare": false }"#,
    )
    .unwrap();
    assert_eq!(c.max_siblings, DEFAULT_MAX_SIBLINGS);
    assert_eq!(c.max_digest_len, 32);
    assert!(!c.constant_time_compare);

    let back: ProofConfig = serde_json::from_str(&serde_json::to_string(&c).unwrap()).unwrap();
    assert_eq!(back, c);
}
