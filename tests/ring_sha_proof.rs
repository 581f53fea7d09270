extern crate merkle_proof;

use merkle_proof::codec::{decode, encode};
use merkle_proof::{Algorithm, DigestProvider, Error, Proof, ProofConfig, RingProvider, Verifier};

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("test vector is valid hex")
}

/// Single-leaf trees: the root is the digest of the data itself.
#[test]
fn test_known_answer_single_leaf() {
    let cases = [
        ("SHA-1", "a9993e364706816aba3e25717850c26c9cd0d89d"),
        (
            "SHA-256",
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        ),
        (
            "SHA-384",
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
             8086072ba1e7cc2358baeca134c825a7",
        ),
        (
            "SHA-512",
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        ),
        (
            "SHA-512/256",
            "53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23",
        ),
    ];

    for (alg, root) in cases.iter() {
        let p = Proof::new(unhex(root), vec![], 0, 1, *alg).unwrap();
        assert!(p.verify(b"abc").unwrap(), "{}", alg);
        assert!(!p.verify(b"abd").unwrap(), "{}", alg);

        let lower = Proof::new(unhex(root), vec![], 0, 1, alg.to_lowercase()).unwrap();
        assert!(lower.verify(b"abc").unwrap(), "{}", alg);
    }
}

/// Three leaves `a b c`: `c` is carried up and pairs with `h(a || b)`.
///
/// ```text
///        root = H(hab || hc)
///       /                  \
///  hab = H(ha || hb)        hc
///   /        \              |
///  ha        hb             hc
/// ```
#[test]
fn test_three_leaf_tree_over_the_wire() {
    let mut a = RingProvider.algorithm("SHA-256").unwrap();
    let ha = a.leaf(b"a");
    let hb = a.leaf(b"b");
    let hc = a.leaf(b"c");
    let hab = a.node(&ha, &hb);
    let root = a.node(&hab, &hc);

    let proofs = vec![
        (b"a", Proof::new(root.clone(), vec![hb.clone(), hc.clone()], 0, 3, "SHA-256").unwrap()),
        (b"b", Proof::new(root.clone(), vec![ha.clone(), hc.clone()], 1, 3, "SHA-256").unwrap()),
        (b"c", Proof::new(root.clone(), vec![hab.clone()], 2, 3, "SHA-256").unwrap()),
    ];

    let verifier = Verifier::default();
    for (data, p) in proofs.iter() {
        let bytes = encode(p);
        assert_eq!(bytes.len(), 16 + (p.depth() + 1) * 32 + "SHA-256".len());
        assert_eq!(&decode(&bytes).unwrap(), p);

        assert!(verifier.verify_bytes(&data[..], &bytes).unwrap());
        assert!(!verifier.verify_bytes(b"d", &bytes).unwrap());
    }
}

#[test]
fn test_header_is_big_endian() {
    let p = Proof::new(vec![0x5a; 32], vec![vec![0x11; 32]], 1, 258, "SHA-256").unwrap();
    let bytes = p.to_bytes();
    assert_eq!(&bytes[0..4], &[0, 0, 0, 32]);
    assert_eq!(&bytes[4..8], &[0, 0, 0, 1]);
    assert_eq!(&bytes[8..12], &[0, 0, 0, 1]);
    assert_eq!(&bytes[12..16], &[0, 0, 1, 2]);
    assert_eq!(&bytes[bytes.len() - 7..], b"SHA-256");
}

#[test]
fn test_unsupported_algorithm_is_an_error() {
    let p = Proof::new(vec![0; 16], vec![], 0, 1, "MD5").unwrap();
    assert_eq!(
        p.verify(b"abc"),
        Err(Error::UnsupportedAlgorithm("MD5".to_string()))
    );

    let verifier = Verifier::with_config(RingProvider, ProofConfig::default());
    match verifier.verify_bytes(b"abc", &p.to_bytes()) {
        Err(Error::UnsupportedAlgorithm(name)) => assert_eq!(name, "MD5"),
        other => panic!("expected UnsupportedAlgorithm, got {:?}", other),
    }
}

#[test]
fn test_malformed_error_display() {
    let err = decode(&[0, 0, 0]).unwrap_err();
    assert!(matches!(err, Error::MalformedProof { field: "digestLength", .. }));
    assert!(err.to_string().starts_with("malformed proof: digestLength:"));
}
