// -*- mode: rust; -*-
//
// This file is part of vanity25519.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Scalar byte handling: RFC 7748 clamping and bit access.
//!
//! Scalars in this crate are plain 255-bit little-endian integers; they
//! are never reduced modulo the group order.  Multiplying the basepoint
//! by the integer directly is equivalent, since the basepoint's order
//! divides any multiple shed by a reduction.

/// Clamp the scalar bytes per RFC 7748 §5: clear the low cofactor bits,
/// clear the top bit, set bit 254.
pub(crate) const fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}

/// Iterate over the bits of a little-endian 256-bit integer, most
/// significant bit first.
pub(crate) fn bits_be(bytes: &[u8; 32]) -> impl Iterator<Item = bool> + '_ {
    (0..256).rev().map(|i| (bytes[i / 8] >> (i % 8)) & 1 == 1)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clamping() {
        let clamped = clamp_integer([0xff; 32]);
        assert_eq!(clamped[0], 0b1111_1000);
        assert_eq!(clamped[31], 0b0111_1111);

        let clamped = clamp_integer([0x00; 32]);
        assert_eq!(clamped[0], 0);
        assert_eq!(clamped[31], 0b0100_0000);
    }

    #[test]
    fn bits_are_msb_first() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0b0000_0011;
        bytes[31] = 0b1000_0000;
        let bits: Vec<bool> = bits_be(&bytes).collect();
        assert_eq!(bits.len(), 256);
        assert!(bits[0]); // bit 255
        assert!(!bits[1]);
        assert!(bits[254]); // bit 1
        assert!(bits[255]); // bit 0
    }
}
