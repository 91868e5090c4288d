use subtle::ConstantTimeEq as _;

/// Compare two byte strings in constant time.
///
/// Only the contents are compared in constant time. A length mismatch,
/// which is public for all callers, returns early.
pub fn ct_bytes_eq(bytes0: &[u8], bytes1: &[u8]) -> bool {
    if bytes0.len() != bytes1.len() {
        return false;
    }
    bool::from(bytes0.ct_eq(bytes1))
}

#[test]
fn test_ct_bytes_eq() {
    let mut bytes0 = [0xccu8; 33];
    let mut bytes1 = [0xccu8; 33];
    assert!(ct_bytes_eq(&bytes0, &bytes1));

    for k in 0..bytes0.len() {
        bytes0.fill(0xcc);
        bytes1.fill(0xcc);
        bytes0[k] = 0x77;
        assert!(!ct_bytes_eq(&bytes0, &bytes1));

        bytes0.fill(0xcc);
        bytes1[k] = 0x77;
        assert!(!ct_bytes_eq(&bytes0, &bytes1));
    }

    assert!(!ct_bytes_eq(&bytes0[..32], &bytes1));
    assert!(ct_bytes_eq(&[], &[]));
}
