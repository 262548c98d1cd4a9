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

//! Group operations on the twisted Edwards form of Curve25519.
//!
//! Points are kept in extended twisted Edwards coordinates
//! \\((X:Y:Z:T)\\) with \\(x = X/Z\\), \\(y = Y/Z\\), \\(xy = T/Z\\),
//! following the ["Twisted Edwards Curves Revisited"][hwcd] formulas.
//! Addition routes through the \\(\mathbb P\^1 \times \mathbb P\^1\\)
//! ("completed") and \\(\mathbb P\^2\\) (projective) models, with the
//! second summand cached in Niels coordinates
//! \\((Y+X, Y-X, Z, 2dXY)\\).
//!
//! The scalar multiplications in this module are variable-time
//! double-and-add: the scalars that reach them are public search
//! offsets, or clamped secrets feeding a public-key derivation whose
//! timing posture is documented at the crate level.
//!
//! [hwcd]: https://www.iacr.org/archive/asiacrypt2008/53500329/53500329.pdf

// We allow non snake_case names because coordinates in projective space are
// traditionally denoted by the capitalisation of their respective
// counterparts in affine space.
#![allow(non_snake_case)]

use core::ops::{Add, Sub};

use subtle::Choice;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::field::FieldElement;
use crate::scalar;

/// An `EdwardsPoint` represents a point on the Edwards form of
/// Curve25519, in extended twisted Edwards coordinates.
#[derive(Copy, Clone, Debug)]
pub(crate) struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

// ------------------------------------------------------------------------
// Internal point representations
// ------------------------------------------------------------------------

/// A `ProjectivePoint` is a point \\((X:Y:Z)\\) on the
/// \\(\mathbb P\^2\\) model of the curve.
#[derive(Copy, Clone)]
struct ProjectivePoint {
    X: FieldElement,
    Y: FieldElement,
    Z: FieldElement,
}

/// A `CompletedPoint` is a point \\( ((X:Z), (Y:T)) \\) on the
/// \\(\mathbb P\^1 \times \mathbb P\^1\\) model of the curve.
#[derive(Copy, Clone)]
struct CompletedPoint {
    X: FieldElement,
    Y: FieldElement,
    Z: FieldElement,
    T: FieldElement,
}

/// A pre-computed point in the \\(\mathbb P\^3\\) model, represented as
/// \\((Y+X, Y-X, Z, 2dXY)\\) in "Niels coordinates".
#[derive(Copy, Clone)]
struct ProjectiveNielsPoint {
    Y_plus_X: FieldElement,
    Y_minus_X: FieldElement,
    Z: FieldElement,
    T2d: FieldElement,
}

impl ProjectivePoint {
    /// Double this point: return self + self, costing
    /// \\(3 \mathrm M + 4 \mathrm S\\).
    fn double(&self) -> CompletedPoint {
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ2 = self.Z.square2();
        let X_plus_Y = &self.X + &self.Y;
        let X_plus_Y_sq = X_plus_Y.square();
        let YY_plus_XX = &YY + &XX;
        let YY_minus_XX = &YY - &XX;

        CompletedPoint {
            X: &X_plus_Y_sq - &YY_plus_XX,
            Y: YY_plus_XX,
            Z: YY_minus_XX,
            T: &ZZ2 - &YY_minus_XX,
        }
    }
}

impl CompletedPoint {
    /// Convert to the \\(\mathbb P\^2\\) model, costing
    /// \\(3 \mathrm M\\).
    fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.Z * &self.T,
        }
    }

    /// Convert to the \\(\mathbb P\^3\\) model, costing
    /// \\(4 \mathrm M\\).
    fn as_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.Z * &self.T,
            T: &self.X * &self.Y,
        }
    }
}

impl<'a, 'b> Add<&'b ProjectiveNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn add(self, other: &'b ProjectiveNielsPoint) -> CompletedPoint {
        let Y_plus_X = &self.Y + &self.X;
        let Y_minus_X = &self.Y - &self.X;
        let PP = &Y_plus_X * &other.Y_plus_X;
        let MM = &Y_minus_X * &other.Y_minus_X;
        let TT2d = &self.T * &other.T2d;
        let ZZ = &self.Z * &other.Z;
        let ZZ2 = &ZZ + &ZZ;

        CompletedPoint {
            X: &PP - &MM,
            Y: &PP + &MM,
            Z: &ZZ2 + &TT2d,
            T: &ZZ2 - &TT2d,
        }
    }
}

impl<'a, 'b> Sub<&'b ProjectiveNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn sub(self, other: &'b ProjectiveNielsPoint) -> CompletedPoint {
        let Y_plus_X = &self.Y + &self.X;
        let Y_minus_X = &self.Y - &self.X;
        let PM = &Y_plus_X * &other.Y_minus_X;
        let MP = &Y_minus_X * &other.Y_plus_X;
        let TT2d = &self.T * &other.T2d;
        let ZZ = &self.Z * &other.Z;
        let ZZ2 = &ZZ + &ZZ;

        CompletedPoint {
            X: &PM - &MP,
            Y: &PM + &MP,
            Z: &ZZ2 - &TT2d,
            T: &ZZ2 + &TT2d,
        }
    }
}

// ------------------------------------------------------------------------
// Group operations
// ------------------------------------------------------------------------

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        // Comparing in projective coordinates avoids normalizing
        // either point:  x₁/z₁ = x₂/z₂  ⟺  x₁z₂ = x₂z₁.
        (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z))
            & (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.as_projective_niels()).as_extended()
    }
}

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &other.as_projective_niels()).as_extended()
    }
}

impl EdwardsPoint {
    /// The neutral element of the group.
    pub(crate) fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }

    /// Convert to the \\(\mathbb P\^2\\) model.
    fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Convert to the cached Niels representation used by readditions.
    fn as_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.Y + &self.X,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    /// Add this point to itself.
    pub(crate) fn double(&self) -> EdwardsPoint {
        self.as_projective().double().as_extended()
    }

    /// Multiply by the cofactor: return \\(8 P\\).
    pub(crate) fn mul_by_cofactor(&self) -> EdwardsPoint {
        self.mul_by_pow_2(3)
    }

    /// Compute \\(2\^k P \\) by successive doublings, requiring
    /// \\( k > 0 \\).
    fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut r: CompletedPoint;
        let mut s = self.as_projective();
        for _ in 0..(k - 1) {
            r = s.double();
            s = r.as_projective();
        }
        // Unroll last doubling so we can go directly to extended coordinates.
        s.double().as_extended()
    }

    /// Multiply this point by the integer whose big-endian bits are
    /// produced by `bits`, by double-and-add.
    ///
    /// This is variable-time in the bit pattern.
    pub(crate) fn mul_bits_be(&self, bits: impl Iterator<Item = bool>) -> EdwardsPoint {
        let cached = self.as_projective_niels();
        let mut acc = EdwardsPoint::identity();
        for bit in bits {
            acc = acc.double();
            if bit {
                acc = (&acc + &cached).as_extended();
            }
        }
        acc
    }

    /// Multiply the Ed25519 basepoint by the little-endian 255-bit
    /// integer `bytes` (the top bit is ignored, as in field decoding).
    pub(crate) fn mul_base(bytes: &[u8; 32]) -> EdwardsPoint {
        let mut bytes = *bytes;
        bytes[31] &= 0b0111_1111;
        constants::ED25519_BASEPOINT_POINT.mul_bits_be(scalar::bits_be(&bytes))
    }

    /// Multiply the Ed25519 basepoint by `clamp_integer(bytes)`, giving
    /// the public point of the X25519 private key `bytes`.
    pub(crate) fn mul_base_clamped(bytes: [u8; 32]) -> EdwardsPoint {
        EdwardsPoint::mul_base(&scalar::clamp_integer(bytes))
    }

    /// Project to the Montgomery \\(u\\)-line and encode, using the map
    /// \\(u = (1+y)/(1-y) = (Z+Y)/(Z-Y)\\).
    ///
    /// Note that this is a one-way projection: both \\(P\\) and
    /// \\(-P\\) encode to the same `u`.
    pub(crate) fn to_montgomery(&self) -> [u8; 32] {
        let U = &self.Z + &self.Y;
        let W = &self.Z - &self.Y;
        let u = &U * &W.invert();
        u.to_bytes()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bytes_of(k: u64) -> [u8; 32] {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&k.to_le_bytes());
        b
    }

    #[test]
    fn basepoint_projects_to_nine() {
        let mut nine = [0u8; 32];
        nine[0] = 9;
        assert_eq!(constants::ED25519_BASEPOINT_POINT.to_montgomery(), nine);
    }

    #[test]
    fn mul_base_one_is_basepoint() {
        let B = EdwardsPoint::mul_base(&bytes_of(1));
        assert_eq!(B, constants::ED25519_BASEPOINT_POINT);
    }

    #[test]
    fn add_vs_double() {
        let B = constants::ED25519_BASEPOINT_POINT;
        assert_eq!(&B + &B, B.double());
        assert_eq!(EdwardsPoint::mul_base(&bytes_of(2)), B.double());
    }

    #[test]
    fn add_sub_roundtrip() {
        let B = constants::ED25519_BASEPOINT_POINT;
        let P = EdwardsPoint::mul_base(&bytes_of(98765));
        assert_eq!(&(&P + &B) - &B, P);
    }

    #[test]
    fn identity_is_neutral() {
        let B = constants::ED25519_BASEPOINT_POINT;
        let id = EdwardsPoint::identity();
        assert_eq!(&B + &id, B);
        assert_eq!(&id + &B, B);
    }

    #[test]
    fn mul_by_cofactor_is_eight_mults() {
        let B = constants::ED25519_BASEPOINT_POINT;
        assert_eq!(B.mul_by_cofactor(), EdwardsPoint::mul_base(&bytes_of(8)));
    }

    #[test]
    fn add_double_consistency() {
        let p = EdwardsPoint::mul_base(&bytes_of(31));
        let q = EdwardsPoint::mul_base(&bytes_of(17));
        assert_eq!(&p + &q.double(), &(&p + &q) + &q);
    }

    #[test]
    fn mul_base_distributes() {
        let a = 0x3645_0195_71b1_5078u64;
        let b = 0x0d40_6b5e_2f4a_99c1u64;
        let sum = EdwardsPoint::mul_base(&bytes_of(a + b));
        let parts = &EdwardsPoint::mul_base(&bytes_of(a)) + &EdwardsPoint::mul_base(&bytes_of(b));
        assert_eq!(sum, parts);
    }
}
