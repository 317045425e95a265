// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default key and plaintext parameters.

use crate::error::{Error, Result};

/// Modulus size used by [`KeyPair::generate`](super::KeyPair::generate).
pub const DEFAULT_KEY_SIZE: usize = 1024;

pub const MIN_KEY_SIZE: usize = 384;
pub const MAX_KEY_SIZE: usize = 1088;
pub const KEY_SIZE_STEP: usize = 8;

/// Signed plaintext values satisfy `|m| < 2^(bits - 1)`.
pub const DEFAULT_MAX_PLAINTEXT_BITS: usize = 128;

/// Decimal digits of fixed-point precision.
pub const DEFAULT_PLAINTEXT_DEC_PLACE: usize = 12;

pub const MILLER_RABIN_ROUNDS: usize = 16;

pub const MAX_MODULUS_ATTEMPTS: usize = 1024;

/// Whether `bits` is one of the supported modulus sizes.
pub fn is_legal_key_size(bits: usize) -> bool {
    (MIN_KEY_SIZE..=MAX_KEY_SIZE).contains(&bits) && (bits - MIN_KEY_SIZE) % KEY_SIZE_STEP == 0
}

pub(crate) fn check_key_size(bits: usize) -> Result<()> {
    if is_legal_key_size(bits) {
        return Ok(());
    }

    Err(Error::InvalidKeySize {
        min: MIN_KEY_SIZE,
        max: MAX_KEY_SIZE,
        step: KEY_SIZE_STEP,
        actual: bits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_sizes() {
        assert!(is_legal_key_size(384));
        assert!(is_legal_key_size(392));
        assert!(is_legal_key_size(1088));
        assert!(!is_legal_key_size(383));
        assert!(!is_legal_key_size(385));
        assert!(!is_legal_key_size(1096));
        assert_eq!((MIN_KEY_SIZE..=MAX_KEY_SIZE).filter(|b| is_legal_key_size(*b)).count(), 89);
    }
}
