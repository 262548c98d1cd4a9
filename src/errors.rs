// -*- mode: rust; -*-
//
// This file is part of vanity25519.
// See LICENSE for licensing information.

//! Errors which may occur while deriving keys or reconstructing them
//! from search offsets.

use core::fmt;
use core::fmt::Display;

/// Errors which may occur while deriving keys or reconstructing them
/// from search offsets.
///
/// This error may arise due to:
///
/// * Being given byte slices with a length different to what was
///   expected.
///
/// * A problem decoding a public key: the bytes are not the
///   `u`-coordinate of a Curve25519 point.
///
/// * An offset that was not produced by a search against the given
///   start key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VanityError {
    /// The public key is not 32 bytes, or is not the `u`-coordinate of
    /// a curve point.
    InvalidPublicKey,
    /// The private key is not 32 bytes.
    InvalidPrivateKey,
    /// The offset does not match the private key: neither
    /// `start + 8·offset` nor `start - 8·offset` produces the
    /// reconstructed public key.
    OffsetMismatch,
}

impl Display for VanityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            VanityError::InvalidPublicKey => write!(f, "not a valid curve25519 public key"),
            VanityError::InvalidPrivateKey => write!(f, "private key must be 32 bytes in length"),
            VanityError::OffsetMismatch => write!(f, "offset does not match private key"),
        }
    }
}

impl std::error::Error for VanityError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            VanityError::OffsetMismatch.to_string(),
            "offset does not match private key"
        );
        assert_eq!(
            VanityError::InvalidPublicKey.to_string(),
            "not a valid curve25519 public key"
        );
    }
}
