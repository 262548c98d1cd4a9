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

//! Curve constants, precomputed as radix-\\(2\^{51}\\) limbs.
//!
//! Everything here is read-only data; each constant is pinned to its
//! defining equation by a test at the bottom of the module.

use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;

/// The Montgomery curve coefficient `A = 486662` of
/// `v² = u³ + A·u² + u`.
pub(crate) const MONTGOMERY_A: FieldElement = FieldElement::from_limbs([486662, 0, 0, 0, 0]);

/// `SQRT_M1` is the positive square root of \\(-1 \pmod p\\).
pub(crate) const SQRT_M1: FieldElement = FieldElement::from_limbs([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// `SQRT_MINUS_APLUS2` is a square root of \\(-(A+2) = -486664\\), the
/// scaling factor of the bi-rational map between curve25519 and
/// edwards25519.
///
/// Of the two roots, this is the one that maps the Edwards basepoint
/// onto the Montgomery basepoint \\((9, v\_B)\\); it is the negative
/// root (its canonical encoding has the low bit set), matching the sign
/// of \\(v\_B\\).
pub(crate) const SQRT_MINUS_APLUS2: FieldElement = FieldElement::from_limbs([
    557817479725543,
    1643290402203250,
    16226468853936,
    1304118542701054,
    1985241807451647,
]);

/// Edwards `d` value, equal to `-121665/121666 mod p`.
pub(crate) const EDWARDS_D: FieldElement = FieldElement::from_limbs([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// Edwards `2*d` value, equal to `2*(-121665/121666) mod p`.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement::from_limbs([
    1859910466990425,
    932731440258426,
    1072319116312658,
    1815898335770999,
    633789495995903,
]);

/// The Ed25519 basepoint, with y = 4/5.
pub(crate) const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement::from_limbs([
        1738742601995546,
        1146398526822698,
        2070867633025821,
        562264141797630,
        587772402128613,
    ]),
    Y: FieldElement::from_limbs([
        1801439850948184,
        1351079888211148,
        450359962737049,
        900719925474099,
        1801439850948198,
    ]),
    Z: FieldElement::from_limbs([1, 0, 0, 0, 0]),
    T: FieldElement::from_limbs([
        1841354044333475,
        16398895984059,
        755974180946558,
        900171276175154,
        1821297809914039,
    ]),
};

/// The curve25519 basepoint in affine coordinates, `u = 9` and
/// `v = 1478161944758954479102059356840998688726460613461647528896488183\
/// 7755586237401` (RFC 7748 §4.1).
pub(crate) const MONTGOMERY_BASEPOINT: MontgomeryPoint = MontgomeryPoint {
    u: FieldElement::from_limbs([9, 0, 0, 0, 0]),
    v: FieldElement::from_limbs([
        498776679568345,
        2196478692312381,
        1446154986911029,
        943862271874619,
        574914022836744,
    ]),
};
