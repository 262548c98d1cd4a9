// -*- mode: rust; -*-
//
// This file is part of vanity25519.
// See LICENSE for licensing information.

//! The reference acceptance predicate: bit-prefix matching.

/// Build a predicate that accepts a candidate public key when its first
/// `bits` bits equal those of `prefix`.
///
/// Whole bytes are compared directly; if `bits` is not a multiple of
/// eight, the remaining high bits of the next byte are compared after a
/// shift.  The returned closure is cheap, `Clone`, and thread-safe, so
/// parallel searches can share one predicate.
///
/// # Panics
///
/// Panics if `prefix` is empty or longer than 32 bytes, or if `bits` is
/// zero, greater than 256, or greater than `8 * prefix.len()`.
pub fn has_prefix_bits(
    prefix: &[u8],
    bits: usize,
) -> impl Fn(&[u8; 32]) -> bool + Clone + Send + Sync {
    assert!(
        !prefix.is_empty() && prefix.len() <= 32,
        "prefix must be between 1 and 32 bytes"
    );
    assert!(
        bits > 0 && bits <= 256 && bits <= prefix.len() * 8,
        "bits must be between 1 and the prefix length in bits"
    );

    let whole = bits / 8;
    let mut head = [0u8; 32];
    head[..whole].copy_from_slice(&prefix[..whole]);

    // The straggling high bits of the byte after the whole-byte prefix,
    // pre-shifted down for a single-compare test.
    let shift = 8 - (bits % 8) as u32;
    let tail = if bits % 8 != 0 {
        Some(prefix[whole] >> shift)
    } else {
        None
    };

    move |candidate: &[u8; 32]| {
        candidate[..whole] == head[..whole]
            && match tail {
                Some(t) => candidate[whole] >> shift == t,
                None => true,
            }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn candidate(bytes: &[u8]) -> [u8; 32] {
        let mut c = [0u8; 32];
        c[..bytes.len()].copy_from_slice(bytes);
        c
    }

    #[test]
    fn whole_byte_prefix() {
        let accept = has_prefix_bits(&[0x41, 0x59, 0x2f], 8);
        assert!(accept(&candidate(&[0x41, 0x59, 0x2f])));
        assert!(accept(&candidate(&[0x41, 0xff, 0x00])));
        assert!(!accept(&candidate(&[0x40, 0x59, 0x2f])));
    }

    #[test]
    fn partial_byte_prefix() {
        // With seven bits, 0x41 and 0x40 differ only in the masked-off
        // low bit and both match.
        let accept = has_prefix_bits(&[0x41, 0x59, 0x2f], 7);
        assert!(accept(&candidate(&[0x41, 0x59, 0x2f])));
        assert!(accept(&candidate(&[0x40, 0x59, 0x2f])));
        assert!(!accept(&candidate(&[0x43, 0x59, 0x2f])));
    }

    #[test]
    fn multi_byte_partial_prefix() {
        // 18 bits: two whole bytes plus the top two bits of the third.
        let accept = has_prefix_bits(&[0x01, 0x8f, 0xf1], 18);
        assert!(accept(&candidate(&[0x01, 0x8f, 0xf2])));
        assert!(accept(&candidate(&[0x01, 0x8f, 0xc0])));
        assert!(!accept(&candidate(&[0x01, 0x8f, 0x80])));
        assert!(!accept(&candidate(&[0x01, 0x8e, 0xf2])));
    }

    #[test]
    fn full_width_prefix() {
        let target = [0xabu8; 32];
        let accept = has_prefix_bits(&target, 256);
        assert!(accept(&target));
        let mut off = target;
        off[31] ^= 1;
        assert!(!accept(&off));
    }

    #[test]
    #[should_panic(expected = "prefix must be between 1 and 32 bytes")]
    fn rejects_empty_prefix() {
        has_prefix_bits(&[], 1);
    }

    #[test]
    #[should_panic(expected = "bits must be between 1 and the prefix length in bits")]
    fn rejects_bits_beyond_prefix() {
        has_prefix_bits(&[0xff], 9);
    }

    #[test]
    #[should_panic(expected = "bits must be between 1 and the prefix length in bits")]
    fn rejects_zero_bits() {
        has_prefix_bits(&[0xff], 0);
    }
}
