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

//! Affine arithmetic on the Montgomery form of Curve25519.
//!
//! To avoid notational confusion with the Edwards code, we use
//! variables \\( u, v \\) for the Montgomery curve
//! \\( v\^2 = u\^3 + A u\^2 + u \\), so that "Montgomery \\(u\\)" here
//! corresponds to "Montgomery \\(x\\)" elsewhere.
//!
//! Unlike a Montgomery ladder, which works on the \\(u\\)-line alone,
//! the batched search needs full affine points: the chord addition
//! \\[
//!     u\_3 = \left(\frac{v\_2 - v\_1}{u\_2 - u\_1}\right)\^2 - A - u\_1 - u\_2
//! \\]
//! shares its denominator across a whole batch of second summands, so
//! one field inversion amortizes over many candidate \\(u\\)-coordinates.
//! The point at infinity is not representable; callers keep it out of
//! range by construction.
//!
//! See Costello and Smith, [_Montgomery curves and their
//! arithmetic_][costello-smith], for the affine formulas.
//!
//! [costello-smith]: https://eprint.iacr.org/2017/212.pdf

use subtle::ConditionallyNegatable;

use crate::constants;
use crate::edwards::EdwardsPoint;
use crate::field::FieldElement;

/// An affine point \\((u, v)\\) on the Montgomery form of the curve.
#[derive(Copy, Clone, Debug)]
pub(crate) struct MontgomeryPoint {
    pub(crate) u: FieldElement,
    pub(crate) v: FieldElement,
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.u == other.u && self.v == other.v
    }
}

impl Eq for MontgomeryPoint {}

impl MontgomeryPoint {
    /// Attempt to decompress a `u`-coordinate encoding to an affine
    /// point, choosing the nonnegative root for `v`.
    ///
    /// Returns `None` if `u³ + A·u² + u` is not square, i.e. if the
    /// encoding is not the `u`-coordinate of a curve point.
    pub(crate) fn decompress(bytes: &[u8; 32]) -> Option<MontgomeryPoint> {
        let u = FieldElement::from_bytes(bytes);
        let uu = u.square();
        let mut w = &uu * &u; //  u³
        w = &w + &(&constants::MONTGOMERY_A * &uu); //  + A·u²
        w = &w + &u; //  + u

        let (is_square, v) = FieldElement::sqrt_ratio_i(&w, &FieldElement::ONE);
        if (!is_square).into() {
            return None;
        }
        Some(MontgomeryPoint { u, v })
    }

    /// Lift a `u`-coordinate encoding to the Edwards model, taking of
    /// the two candidates the one with nonnegative Edwards
    /// \\(x\\)-coordinate (the representative a clear sign bit in the
    /// Edwards `y`-encoding selects).
    ///
    /// All search offsets are relative to this representative: walking
    /// forward from it by `k·(8B)` and projecting back to the
    /// `u`-line is what [`search`](crate::search()) reports as offset
    /// `k`.
    ///
    /// Returns `None` if the encoding is not the `u`-coordinate of a
    /// curve point.  (In particular `u = -1` is rejected:
    /// `v² = u·(u² + 486662·u + 1) = 486660` is nonsquare mod p.)
    pub(crate) fn decompress_edwards(bytes: &[u8; 32]) -> Option<EdwardsPoint> {
        let p = MontgomeryPoint::decompress(bytes)?;
        let mut e = p.to_edwards();

        // decompress() fixed the sign of v, which to_edwards() carried
        // into the sign of x; flip to the nonnegative-x candidate.
        let x_is_negative = e.X.is_negative();
        e.X.conditional_negate(x_is_negative);
        e.T.conditional_negate(x_is_negative);
        Some(e)
    }

    /// The canonical 32-byte encoding of the `u`-coordinate.
    pub(crate) fn u_bytes(&self) -> [u8; 32] {
        self.u.to_bytes()
    }

    /// Add two points with distinct `u`-coordinates, spending a field
    /// inversion on the chord's denominator.
    pub(crate) fn add(&self, other: &MontgomeryPoint) -> MontgomeryPoint {
        let du_inv = (&other.u - &self.u).invert();
        self.add_with_inverse(other, &du_inv)
    }

    /// Add two points with distinct `u`-coordinates, given
    /// `du_inv = 1/(u₂ - u₁)` computed elsewhere (usually by a batch
    /// inversion shared with other additions).
    ///
    /// Cost: 4M + 7A.
    pub(crate) fn add_with_inverse(
        &self,
        other: &MontgomeryPoint,
        du_inv: &FieldElement,
    ) -> MontgomeryPoint {
        // The chord formula is undefined for u₁ = u₂; the search keeps
        // its step sizes away from this case by construction.
        debug_assert!(self.u != other.u);

        //  s  = (v₂ - v₁) / (u₂ - u₁)
        //  u₃ = s² - A - u₁ - u₂
        //  v₃ = (2u₁ + u₂ + A)·s - s³ - v₁
        let dv = &other.v - &self.v;
        let s = &dv * du_inv;
        let ss = s.square();
        let sss = &ss * &s;

        let u2_plus_a = &other.u + &constants::MONTGOMERY_A;
        let u1_u2_a = &self.u + &u2_plus_a;

        let u3 = &ss - &u1_u2_a;

        let u_sum = &self.u + &u1_u2_a;
        let v3 = &(&(&u_sum * &s) - &sss) - &self.v;

        MontgomeryPoint { u: u3, v: v3 }
    }

    /// Double a point, using the tangent formula
    ///
    ///  t  = (3u² + 2Au + 1) / 2v
    ///  u₃ = t² - A - 2u
    ///  v₃ = (3u + A)·t - t³ - v
    ///
    /// The caller must not pass a point with `v = 0` (the 2-torsion
    /// points, where the tangent is vertical).
    pub(crate) fn double(&self) -> MontgomeryPoint {
        let u2 = &self.u + &self.u;
        let u3 = &u2 + &self.u;

        let mut w = &u3 * &self.u;
        w = &w + &(&constants::MONTGOMERY_A * &u2);
        w = &w + &FieldElement::ONE;

        let t = &w * &(&self.v + &self.v).invert();
        let tt = t.square();
        let ttt = &tt * &t;

        let u_out = &(&tt - &constants::MONTGOMERY_A) - &u2;
        let v_out = &(&(&(&u3 + &constants::MONTGOMERY_A) * &t) - &ttt) - &self.v;

        MontgomeryPoint { u: u_out, v: v_out }
    }

    /// The bi-rational map to the Edwards model,
    /// \\( (x, y) = (\sqrt{-(A+2)}\cdot u/v,\ (u-1)/(u+1)) \\).
    pub(crate) fn to_edwards(&self) -> EdwardsPoint {
        let x = &(&self.u * &self.v.invert()) * &constants::SQRT_MINUS_APLUS2;
        let y = &(&self.u - &FieldElement::ONE) * &(&self.u + &FieldElement::ONE).invert();
        let t = &x * &y;
        EdwardsPoint {
            X: x,
            Y: y,
            Z: FieldElement::ONE,
            T: t,
        }
    }

    /// The bi-rational map from the Edwards model,
    /// \\( (u, v) = ((1+y)/(1-y),\ \sqrt{-(A+2)}\cdot u/x) \\).
    pub(crate) fn from_edwards(p: &EdwardsPoint) -> MontgomeryPoint {
        let z_inv = p.Z.invert();
        let x = &p.X * &z_inv;
        let y = &p.Y * &z_inv;

        let u = &(&FieldElement::ONE + &y) * &(&FieldElement::ONE - &y).invert();
        let v = &(&constants::SQRT_MINUS_APLUS2 * &u) * &x.invert();

        MontgomeryPoint { u, v }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mul_base(k: u64) -> EdwardsPoint {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&k.to_le_bytes());
        EdwardsPoint::mul_base(&b)
    }

    fn nine() -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[0] = 9;
        bytes
    }

    #[test]
    fn decompress_basepoint_u() {
        let p = MontgomeryPoint::decompress(&nine()).unwrap();
        assert_eq!(p.u, constants::MONTGOMERY_BASEPOINT.u);
        // The basepoint's v is negative, so decompression lands on the
        // other representative, (9, -v_B).
        assert!(bool::from(!p.v.is_negative()));
        assert_eq!(p.v, -&constants::MONTGOMERY_BASEPOINT.v);
        // Either representative squares to the curve equation.
        assert_eq!(p.v.square(), constants::MONTGOMERY_BASEPOINT.v.square());
    }

    #[test]
    fn decompress_rejects_minus_one() {
        // Without the nonsquare check, u = -1 would lift to a valid
        // (but incorrect) Edwards point, since 0.invert() = 0.
        let minus_one = (-&FieldElement::ONE).to_bytes();
        assert!(MontgomeryPoint::decompress(&minus_one).is_none());
        assert!(MontgomeryPoint::decompress_edwards(&minus_one).is_none());
    }

    #[test]
    fn decompress_rejects_nonsquare() {
        // u = 2 is not on the curve (it is on the twist).
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        assert!(MontgomeryPoint::decompress(&bytes).is_none());
        assert!(MontgomeryPoint::decompress_edwards(&bytes).is_none());
    }

    #[test]
    fn decompress_edwards_basepoint() {
        let p = MontgomeryPoint::decompress_edwards(&nine()).unwrap();
        assert_eq!(p, constants::ED25519_BASEPOINT_POINT);
    }

    #[test]
    fn decompress_edwards_picks_nonnegative_x() {
        for k in [1u64, 5, 6, 12, 999] {
            let u_bytes = MontgomeryPoint::from_edwards(&mul_base(k)).u_bytes();
            let e = MontgomeryPoint::decompress_edwards(&u_bytes).unwrap();
            // Z = 1 here, so X is affine.
            assert_eq!(e.Z, FieldElement::ONE);
            assert!(bool::from(!e.X.is_negative()));
            assert_eq!(e.T, &e.X * &e.Y);
            // The lift is a section of the projection.
            assert_eq!(MontgomeryPoint::from_edwards(&e).u_bytes(), u_bytes);
        }
    }

    #[test]
    fn edwards_roundtrip() {
        let b = constants::MONTGOMERY_BASEPOINT;
        assert_eq!(
            MontgomeryPoint::from_edwards(&constants::ED25519_BASEPOINT_POINT),
            b
        );
        assert_eq!(b.to_edwards(), constants::ED25519_BASEPOINT_POINT);

        let p = MontgomeryPoint::from_edwards(&mul_base(7283));
        assert_eq!(MontgomeryPoint::from_edwards(&p.to_edwards()), p);
    }

    #[test]
    fn double_matches_edwards() {
        let b = constants::MONTGOMERY_BASEPOINT;
        assert_eq!(b.double(), MontgomeryPoint::from_edwards(&mul_base(2)));
        assert_eq!(
            b.double().double(),
            MontgomeryPoint::from_edwards(&mul_base(4))
        );
    }

    #[test]
    fn add_matches_edwards() {
        let b = constants::MONTGOMERY_BASEPOINT;
        let b2 = b.double();
        assert_eq!(b.add(&b2), MontgomeryPoint::from_edwards(&mul_base(3)));

        let p5 = MontgomeryPoint::from_edwards(&mul_base(5));
        assert_eq!(b2.add(&p5), MontgomeryPoint::from_edwards(&mul_base(7)));
    }

    #[test]
    fn add_with_inverse_matches_add() {
        let b = constants::MONTGOMERY_BASEPOINT;
        let p5 = MontgomeryPoint::from_edwards(&mul_base(5));
        let du_inv = (&p5.u - &b.u).invert();
        assert_eq!(b.add_with_inverse(&p5, &du_inv), b.add(&p5));
    }

    #[test]
    fn candidate_u_is_sign_independent() {
        // p ± q and -(p ∓ q) share u-coordinates, the symmetry the
        // batched search exploits to get two candidates per inversion.
        let p = MontgomeryPoint::from_edwards(&mul_base(11));
        let q = MontgomeryPoint::from_edwards(&mul_base(4));
        let q_neg = MontgomeryPoint { u: q.u, v: -&q.v };

        let sum = p.add(&q);
        let diff = p.add(&q_neg);
        assert_eq!(sum.u, MontgomeryPoint::from_edwards(&mul_base(15)).u);
        assert_eq!(diff.u, MontgomeryPoint::from_edwards(&mul_base(7)).u);
    }
}
