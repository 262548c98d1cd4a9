// -*- mode: rust; -*-
//
// This file is part of vanity25519.
// See LICENSE for licensing information.

#![deny(missing_docs)]

//! # vanity25519
//!
//! **Batched incremental search for Curve25519 vanity key pairs.**
//!
//! A vanity X25519 key pair is one whose public key (the Montgomery
//! `u`-coordinate, 32 little-endian bytes) starts with a chosen bit
//! pattern.  Brute force derives each candidate with a full scalar
//! multiplication, roughly 743 field multiplications per key with
//! Edwards arithmetic.  This crate instead generates candidates by
//! *adding offsets* to a start public key: an accumulator point walks
//! the subgroup generated by `8B` (the basepoint times the cofactor),
//! and each batch derives many candidate `u`-coordinates from affine
//! chord additions that share a single field inversion.  The amortized
//! cost is about 3.5 field multiplications and 3 additions per
//! candidate.
//!
//! Because candidates are linked to the start key by their offset, a
//! match is reported as `(public_key, offset)` and the corresponding
//! private key is reconstructed afterwards with [`add_offset`] — which
//! only the holder of the start private key can do.
//!
//! # Example
//!
//! Find a key whose public key starts with the byte `0x42`, then
//! reconstruct its private key from the reported offset:
//!
//! ```
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! use num_bigint::BigUint;
//! use vanity25519::{add_offset, derive_public_key, has_prefix_bits, search};
//!
//! let start_private_key = [0x40u8; 32];
//! let start_public_key = derive_public_key(&start_private_key)?;
//!
//! let accept = has_prefix_bits(&[0x42], 8);
//! let cancel = AtomicBool::new(false);
//! let mut found = None;
//!
//! search(
//!     &start_public_key,
//!     &BigUint::from(0u32),
//!     256,
//!     accept,
//!     |public_key, offset| {
//!         found = Some((*public_key, offset));
//!         cancel.store(true, Ordering::Relaxed);
//!     },
//!     &cancel,
//! );
//!
//! let (public_key, offset) = found.expect("accept-by-prefix always matches eventually");
//! let private_key = add_offset(&start_private_key, &offset)?;
//! assert_eq!(derive_public_key(&private_key)?, public_key);
//! assert_eq!(public_key[0], 0x42);
//! # Ok::<(), vanity25519::VanityError>(())
//! ```
//!
//! # Parallel searches
//!
//! One [`search`] call runs on the calling thread.  To use several
//! cores, run one search per thread, seeding each with a random
//! `start_offset`, and share the acceptance predicate, a
//! first-match-wins slot (e.g. a mutex or an atomic pointer), and the
//! cancellation flag between them.  The engine itself keeps no shared
//! mutable state.
//!
//! # Timing posture
//!
//! The candidate loop is throughput-oriented and variable-time: the
//! acceptance predicate, yield emission, and the scalar multiplications
//! behind key derivation all branch on the data they handle.  Do not
//! run a search on a machine where a local observer measuring its
//! timing is part of your threat model.  Field-element conditional
//! select and swap are nonetheless data-oblivious (bitmask-based, via
//! `subtle`).

mod constants;
mod edwards;
mod errors;
mod field;
mod keys;
mod montgomery;
mod prefix;
mod scalar;
mod search;

pub use crate::errors::VanityError;
pub use crate::keys::{add_offset, derive_public_key, offset_public_key};
pub use crate::prefix::has_prefix_bits;
pub use crate::search::search;
