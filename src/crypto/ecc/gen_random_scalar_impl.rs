// SPDX-License-Identifier: Apache-2.0
// Copyright 2023 SUSE LLC
// Copyright 2026 The pwkeygen Authors

use super::curve::EccCurve;
use crate::crypto::rng;
use crate::error::Error;
use crate::utils::{self, cfg_zeroize};
use alloc::vec::Vec;
use cfg_zeroize::Zeroize as _;
use num_bigint_dig::BigUint;
use num_traits::One as _;

/// Generate a random scalar in the range `[1, n - 1]` by oversampling.
///
/// Draws `nbits / 8 + 8` bytes, interprets them as a big-endian integer,
/// reduces modulo `n - 1` and adds one, exactly like Go's
/// `crypto/ecdsa.GenerateKey()` did up to Go 1.10. Note that the draw is
/// sized in whole bytes of the field width rounded down, i.e. for P-521 the
/// oversampling amounts to 63 rather than 64 bits. The result is returned
/// big-endian, left-padded to the curve's field length.
pub fn gen_random_scalar<R: rng::RngCore + ?Sized>(
    rng: &mut R,
    curve: EccCurve,
) -> Result<cfg_zeroize::Zeroizing<Vec<u8>>, Error> {
    let mut random = utils::alloc_zeroizing_vec(curve.nbits() / 8 + 8);
    rng.generate(&mut random)?;

    let order_minus_one = BigUint::from_bytes_be(curve.order()) - BigUint::one();
    let mut k = BigUint::from_bytes_be(&random);
    let reduced = &k % &order_minus_one;
    k.zeroize();
    let scalar = cfg_zeroize::Zeroizing::from(reduced + BigUint::one());
    let scalar_bytes = cfg_zeroize::Zeroizing::from(scalar.to_bytes_be());
    let field_len = curve.field_len();
    let mut result = utils::alloc_zeroizing_vec(field_len);
    result[field_len - scalar_bytes.len()..].copy_from_slice(&scalar_bytes);
    Ok(result)
}

#[cfg(feature = "ecc_nist_p256")]
#[test]
fn test_gen_random_scalar_bounds() {
    use hex_literal::hex;

    // All-zero input maps to the lower bound.
    let random = [0u8; 40];
    let mut rng = rng::ReplayRng::new(&random);
    let scalar = gen_random_scalar(&mut rng, EccCurve::NistP256).unwrap();
    let mut expected = [0u8; 32];
    expected[31] = 1;
    assert_eq!(&scalar[..], &expected);
    assert_eq!(rng.remaining_len(), 0);

    let random = [0xffu8; 40];
    let mut rng = rng::ReplayRng::new(&random);
    let scalar = gen_random_scalar(&mut rng, EccCurve::NistP256).unwrap();
    assert_eq!(
        &scalar[..],
        &hex!("fffffffe00000001431905529c0166cd22159165b6faae71f756a572fc632550")
    );
}

#[cfg(feature = "ecc_nist_p521")]
#[test]
fn test_gen_random_scalar_p521() {
    use hex_literal::hex;

    // 73 bytes are consumed, and the result is padded to the 66 byte
    // field length.
    let random = [0xffu8; 73];
    let mut rng = rng::ReplayRng::new(&random);
    let scalar = gen_random_scalar(&mut rng, EccCurve::NistP521).unwrap();
    assert_eq!(rng.remaining_len(), 0);
    assert_eq!(
        &scalar[..],
        &hex!(
            "0000000000000000000000000000000000000000000000000002d73cbc3e2068"
            "34ca4019ff5b847b2d17e2251b23bb31dc28a2482470b763cdfc000000000000"
            "0000"
        )
    );
}
