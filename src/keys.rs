// -*- mode: rust; -*-
//
// This file is part of vanity25519.
// See LICENSE for licensing information.

//! Key derivation and offset reconstruction.
//!
//! The search reports matches as offsets `k` such that the vanity
//! public key is the `u`-coordinate of `start_point + k·(8B)`.  Because
//! the search works on `u`-coordinates alone, `k` is only determined up
//! to sign; [`add_offset`] resolves the ambiguity by checking both
//! `start_private_key + 8k` and `start_private_key - 8k` against the
//! reconstructed public key.

use num_bigint::BigUint;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::edwards::EdwardsPoint;
use crate::errors::VanityError;
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;

/// Compute the X25519 public key of `private_key` (32 raw bytes;
/// clamping is applied internally).
///
/// # Errors
///
/// Returns [`VanityError::InvalidPrivateKey`] if the slice is not 32
/// bytes long.
pub fn derive_public_key(private_key: &[u8]) -> Result<[u8; 32], VanityError> {
    let sk: [u8; 32] = private_key
        .try_into()
        .map_err(|_| VanityError::InvalidPrivateKey)?;
    Ok(public_key_for(&sk))
}

/// Compute the public key at `offset` steps of `8B` from
/// `start_public_key`, i.e. the `u`-coordinate of
/// `start_point + offset·(8B)`.
///
/// This is the public half of [`add_offset`]: it lets a caller verify a
/// reported match without holding the start private key.
///
/// # Errors
///
/// Returns [`VanityError::InvalidPublicKey`] if `start_public_key` is
/// not 32 bytes or does not decode to a curve point.
///
/// # Panics
///
/// Panics if `offset >= 2^255`; such offsets are never produced by a
/// search (`8B` has far smaller order).
pub fn offset_public_key(
    start_public_key: &[u8],
    offset: &BigUint,
) -> Result<[u8; 32], VanityError> {
    Ok(point_with_offset(start_public_key, offset)?.u_bytes())
}

/// Recover the vanity private key from the start private key and an
/// offset reported by [`search`](crate::search()).
///
/// Both `start_private_key + 8·offset` and `start_private_key -
/// 8·offset` are tried; the one whose public key matches the
/// reconstructed vanity public key is returned.
///
/// # Errors
///
/// - [`VanityError::InvalidPrivateKey`] if the slice is not 32 bytes.
/// - [`VanityError::OffsetMismatch`] if neither candidate matches,
///   which means the offset was not produced by a search against this
///   start key.
///
/// # Panics
///
/// Panics if `offset >= 2^255`.
pub fn add_offset(start_private_key: &[u8], offset: &BigUint) -> Result<[u8; 32], VanityError> {
    let sk: [u8; 32] = start_private_key
        .try_into()
        .map_err(|_| VanityError::InvalidPrivateKey)?;
    let start_public_key = public_key_for(&sk);
    let vanity_public_key = point_with_offset(&start_public_key, offset)?.u_bytes();

    // Work on the private key as a field element; clamping keeps the
    // low three bits clear, so adding 8·offset moves the clamped scalar
    // by exactly offset steps of 8B (up to the sign checked below).
    #[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
    let mut s = FieldElement::from_bytes(&sk);
    let so = FieldElement::from_bytes(&offset_to_bytes(offset));
    let so2 = &so + &so;
    let so4 = &so2 + &so2;
    #[cfg_attr(not(feature = "zeroize"), allow(unused_mut))]
    let mut so8 = &so4 + &so4;

    let mut result = Err(VanityError::OffsetMismatch);
    for candidate in [&s + &so8, &s - &so8] {
        let bytes = candidate.to_bytes();
        if public_key_for(&bytes) == vanity_public_key {
            result = Ok(bytes);
            break;
        }
    }

    #[cfg(feature = "zeroize")]
    {
        s.zeroize();
        so8.zeroize();
    }

    result
}

/// The X25519 public key of the clamped secret `sk`.
fn public_key_for(sk: &[u8; 32]) -> [u8; 32] {
    EdwardsPoint::mul_base_clamped(*sk).to_montgomery()
}

/// Decode a `u`-coordinate public key and add `offset·(8B)` to it,
/// returning the affine sum.
pub(crate) fn point_with_offset(
    public_key: &[u8],
    offset: &BigUint,
) -> Result<MontgomeryPoint, VanityError> {
    let bytes: [u8; 32] = public_key
        .try_into()
        .map_err(|_| VanityError::InvalidPublicKey)?;
    let p = MontgomeryPoint::decompress_edwards(&bytes).ok_or(VanityError::InvalidPublicKey)?;

    let shift = EdwardsPoint::mul_base(&offset_to_bytes(offset)).mul_by_cofactor();

    Ok(MontgomeryPoint::from_edwards(&(&p + &shift)))
}

/// The 32 little-endian bytes of `offset`, which must be below 2^255.
fn offset_to_bytes(offset: &BigUint) -> [u8; 32] {
    assert!(offset.bits() <= 255, "offset must be below 2^255");
    let le = offset.to_bytes_le();
    let mut bytes = [0u8; 32];
    bytes[..le.len()].copy_from_slice(&le);
    bytes
}
