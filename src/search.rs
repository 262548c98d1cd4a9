// -*- mode: rust; -*-
//
// This file is part of vanity25519.
// See LICENSE for licensing information.

//! The batched incremental search for vanity `u`-coordinates.
//!
//! Instead of deriving every candidate public key by a full scalar
//! multiplication (≈743 field multiplications with Edwards arithmetic),
//! the search walks an accumulator point \\(p\\) through the subgroup
//! generated by \\(8B\\) and derives candidates by affine chord
//! additions against a fixed table of multiples of \\(8B\\).  All the
//! chords of one batch share a single field inversion (Montgomery's
//! trick), and each table entry yields two candidates, \\(p + T\_j\\)
//! and \\(p - T\_j\\), because both share the denominator
//! \\(T\_j.u - p.u\\) and the sum \\(A + p.u + T\_j.u\\).
//!
//! The amortized cost works out to roughly \\(3.5 \mathrm M +
//! 3 \mathrm A\\) per candidate for large batches:
//! \\(3 \mathrm M\\) per element from the shared inversion and the two
//! chords, \\(265/n \mathrm M\\) of amortized inversion, and
//! \\(4 \mathrm M\\) per batch to advance the accumulator.

use core::sync::atomic::{AtomicBool, Ordering};

use num_bigint::BigUint;

use crate::constants;
use crate::field::FieldElement;
use crate::keys;
use crate::montgomery::MontgomeryPoint;

/// A table of consecutive multiples of `8B`: `T[i] = (i+1)·(8B)`.
///
/// Built once per search and read-only afterwards.  None of the entries
/// is the identity and all are distinct, since `8B` generates the large
/// prime-order subgroup and the table is far shorter than its order.
pub(crate) struct OffsetTable(Vec<MontgomeryPoint>);

impl OffsetTable {
    /// Build the table of the first `n` multiples of `8B`, `n > 0`.
    pub(crate) fn new(n: usize) -> OffsetTable {
        assert!(n > 0, "offset table must not be empty");

        let b8 = constants::MONTGOMERY_BASEPOINT.double().double().double();

        let mut points = Vec::with_capacity(n);
        points.push(b8);
        if n > 1 {
            points.push(b8.double());
            for i in 2..n {
                let next = points[i - 1].add(&b8);
                points.push(next);
            }
        }
        OffsetTable(points)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn iter(&self) -> core::slice::Iter<'_, MontgomeryPoint> {
        self.0.iter()
    }
}

impl core::ops::Index<usize> for OffsetTable {
    type Output = MontgomeryPoint;
    fn index(&self, i: usize) -> &MontgomeryPoint {
        &self.0[i]
    }
}

/// Compute the `u`-coordinates of `p1 + T[j]` and `p1 - T[j]` for every
/// table entry, sharing one field inversion across the whole batch.
///
/// On entry `du[..n]` is scratch and `du[n]` holds an extra difference
/// supplied by the caller; on return `u_out[j]` and `u_out[n + j]` hold
/// the two candidate coordinates for table index `j`, and `du[n]` has
/// been replaced by its inverse (the caller reuses it to advance the
/// accumulator without another inversion).
///
/// `u_out` doubles as the batch inversion's scratch buffer before the
/// candidates are written into it.
fn add_u_batch(
    p1: &MontgomeryPoint,
    table: &OffsetTable,
    du: &mut [FieldElement],
    u_out: &mut [FieldElement],
) {
    let n = table.len();
    debug_assert_eq!(du.len(), n + 1);
    debug_assert_eq!(u_out.len(), 2 * n);

    //  p₃  = p₁ + p₂
    //  p₃' = p₁ - p₂
    //
    //  u₃ = ((v₂ - v₁)/du)² - (A + u₁ + u₂)
    //
    // and for p₂' = -p₂ (same u₂, negated v₂):
    //
    //  u₃' = ((v₂ + v₁)/du)² - (A + u₁ + u₂)
    for (slot, t) in du.iter_mut().zip(table.iter()) {
        *slot = &t.u - &p1.u;
    }
    FieldElement::batch_invert(du, u_out);

    let a_plus_u1 = &constants::MONTGOMERY_A + &p1.u;
    for (j, t) in table.iter().enumerate() {
        let a_u1_u2 = &a_plus_u1 + &t.u;

        let s = &(&t.v - &p1.v) * &du[j];
        u_out[j] = &s.square() - &a_u1_u2;

        let s = &(&t.v + &p1.v) * &du[j];
        u_out[n + j] = &s.square() - &a_u1_u2;
    }
}

/// Generate candidate Curve25519 public keys by adding batches of
/// incrementing offsets to the start public key.
///
/// Once a matching candidate is found, the corresponding private key
/// can be recovered from its offset with [`add_offset`].
///
/// Parameters:
///
/// - `start_public_key`: the 32-byte public key to generate candidates
///   from.
/// - `start_offset`: the initial offset to start generating candidates
///   from.
/// - `batch_size`: candidates generated per batch; must be positive and
///   even.
/// - `accept`: evaluates each candidate public key (so it must be
///   fast) and returns `true` to accept the key.
/// - `yield_match`: called with each accepted candidate public key and
///   its offset from the start key.  The byte array is the callback's
///   to keep.
/// - `cancel`: polled once per batch; the search returns after at most
///   one further batch once it is set.
///
/// Every yielded pair satisfies: the candidate equals the
/// `u`-coordinate of `start_point + offset·(8B)`.
///
/// Returns the total number of candidates evaluated.
///
/// # Panics
///
/// Panics if `batch_size` is zero or odd, or if `start_public_key` is
/// not a valid Curve25519 public key.
///
/// [`add_offset`]: crate::add_offset
pub fn search<A, Y>(
    start_public_key: &[u8],
    start_offset: &BigUint,
    batch_size: usize,
    accept: A,
    mut yield_match: Y,
    cancel: &AtomicBool,
) -> u64
where
    A: Fn(&[u8; 32]) -> bool,
    Y: FnMut(&[u8; 32], BigUint),
{
    assert!(
        batch_size > 0 && batch_size % 2 == 0,
        "batch_size must be positive and even"
    );
    let mut p = keys::point_with_offset(start_public_key, start_offset)
        .expect("start_public_key must be a valid curve25519 public key");

    let m = batch_size / 2;
    let table = OffsetTable::new(m);

    // batch_offset = T[0] + 2·T[m-1] = (batch_size + 1)·(8B), the
    // stride between consecutive accumulator positions.  Doubling
    // before adding keeps the chord well-defined even for m = 1.
    let batch_offset = table[0].add(&table[m - 1].double());

    // Shift the accumulator up by m table steps so that the backward
    // candidates of the first batch still land at non-negative offsets.
    p = p.add(&table[m - 1]);

    let mut du = vec![FieldElement::ZERO; m + 1];
    let mut candidates = vec![FieldElement::ZERO; batch_size];

    // The accumulator sits at offset i, serving candidates i-m..=i+m.
    let mut i = m as u64;
    loop {
        if cancel.load(Ordering::Relaxed) {
            return i - m as u64;
        }

        // The last slot rides along in the batch inversion; its inverse
        // advances the accumulator below.
        du[m] = &batch_offset.u - &p.u;
        debug_assert!(!bool::from(du[m].is_zero()));

        add_u_batch(&p, &table, &mut du, &mut candidates);

        for (j, candidate) in candidates.iter().enumerate() {
            let bytes = candidate.to_bytes();
            if accept(&bytes) {
                let offset = if j < m {
                    start_offset + BigUint::from(i + j as u64 + 1)
                } else {
                    start_offset + BigUint::from(i - (j - m + 1) as u64)
                };
                yield_match(&bytes, offset);
            }
        }

        // The accumulator itself is a candidate too.
        let bytes = p.u.to_bytes();
        if accept(&bytes) {
            yield_match(&bytes, start_offset + BigUint::from(i));
        }

        p = p.add_with_inverse(&batch_offset, &du[m]);
        i += batch_size as u64 + 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::edwards::EdwardsPoint;

    fn mul_base(k: u64) -> EdwardsPoint {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&k.to_le_bytes());
        EdwardsPoint::mul_base(&b)
    }

    #[test]
    fn offset_table_matches_scalar_mult() {
        let n = 64;
        let table = OffsetTable::new(n);
        assert_eq!(table.len(), n);
        for i in 0..n {
            let expected = MontgomeryPoint::from_edwards(&mul_base(8 * (i as u64 + 1)));
            assert_eq!(table[i], expected);
        }
    }

    #[test]
    #[should_panic(expected = "offset table must not be empty")]
    fn offset_table_rejects_empty() {
        OffsetTable::new(0);
    }

    #[test]
    fn add_u_batch_matches_edwards() {
        let n = 16;
        let table = OffsetTable::new(n);

        let base = mul_base(12345);
        let p1 = MontgomeryPoint::from_edwards(&base);

        let mut du = vec![FieldElement::ZERO; n + 1];
        let mut u_out = vec![FieldElement::ZERO; 2 * n];

        // The final slot is inverted alongside the batch.
        let extra = FieldElement::from_limbs([123456789, 0, 0, 0, 0]);
        let extra_inv = extra.invert();
        du[n] = extra;

        add_u_batch(&p1, &table, &mut du, &mut u_out);

        for j in 0..n {
            let plus = &base + &mul_base(8 * (j as u64 + 1));
            let minus = &base - &mul_base(8 * (j as u64 + 1));
            assert_eq!(u_out[j], MontgomeryPoint::from_edwards(&plus).u);
            assert_eq!(u_out[n + j], MontgomeryPoint::from_edwards(&minus).u);
        }
        assert_eq!(du[n], extra_inv);
    }

    #[test]
    fn search_yields_consistent_offsets() {
        // With an accept-everything predicate, every yield must satisfy
        // the offset contract against the public-key-only derivation.
        let start = keys::derive_public_key(&[0x21; 32]).unwrap();
        let start_offset = BigUint::from(712u32);

        let cancel = AtomicBool::new(false);
        let mut yields: Vec<([u8; 32], BigUint)> = Vec::new();
        let count = search(
            &start,
            &start_offset,
            8,
            |_| true,
            |bytes, offset| {
                yields.push((*bytes, offset));
                if yields.len() >= 50 {
                    cancel.store(true, Ordering::Relaxed);
                }
            },
            &cancel,
        );

        assert!(yields.len() >= 50);
        assert_eq!(count % 9, 0);
        for (bytes, offset) in &yields {
            let expected = keys::offset_public_key(&start, offset).unwrap();
            assert_eq!(bytes, &expected);
        }
    }

    #[test]
    fn search_counts_batches() {
        let start = keys::derive_public_key(&[0x21; 32]).unwrap();

        // Cancel before the first batch: nothing evaluated.
        let cancel = AtomicBool::new(true);
        let count = search(
            &start,
            &BigUint::from(0u32),
            8,
            |_| true,
            |_, _| {},
            &cancel,
        );
        assert_eq!(count, 0);

        // Cancel during the first batch: one batch of n+1 candidates.
        let cancel = AtomicBool::new(false);
        let count = search(
            &start,
            &BigUint::from(0u32),
            8,
            |_| {
                cancel.store(true, Ordering::Relaxed);
                false
            },
            |_, _| {},
            &cancel,
        );
        assert_eq!(count, 9);
    }

    #[test]
    fn search_smallest_batch() {
        // batch_size = 2 exercises the single-entry table and the
        // doubled batch offset.
        let start = keys::derive_public_key(&[0x42; 32]).unwrap();
        let cancel = AtomicBool::new(false);
        let mut yields: Vec<([u8; 32], BigUint)> = Vec::new();
        search(
            &start,
            &BigUint::from(0u32),
            2,
            |_| true,
            |bytes, offset| {
                yields.push((*bytes, offset));
                if yields.len() >= 12 {
                    cancel.store(true, Ordering::Relaxed);
                }
            },
            &cancel,
        );
        for (bytes, offset) in &yields {
            let expected = keys::offset_public_key(&start, offset).unwrap();
            assert_eq!(bytes, &expected);
        }
    }

    #[test]
    #[should_panic(expected = "batch_size must be positive and even")]
    fn search_rejects_odd_batch() {
        let start = keys::derive_public_key(&[0x21; 32]).unwrap();
        let cancel = AtomicBool::new(true);
        search(
            &start,
            &BigUint::from(0u32),
            7,
            |_| false,
            |_, _| {},
            &cancel,
        );
    }

    #[test]
    #[should_panic(expected = "valid curve25519 public key")]
    fn search_rejects_invalid_public_key() {
        // u = 2 is on the twist, not the curve.
        let mut bad = [0u8; 32];
        bad[0] = 2;
        let cancel = AtomicBool::new(true);
        search(
            &bad,
            &BigUint::from(0u32),
            8,
            |_| false,
            |_, _| {},
            &cancel,
        );
    }
}
