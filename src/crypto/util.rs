// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_traits::{CheckedSub, One};

use crate::error::{Error, Result};

/// Paillier's `L(x) = (x - 1) / n`.
///
/// Fails on `x == 0`, which can only come from a malformed ciphertext.
#[inline]
pub fn l_function(x: &BigUint, n: &BigUint) -> Result<BigUint> {
    let shifted = x.checked_sub(&BigUint::one()).ok_or(Error::InvalidCiphertext)?;
    Ok(shifted / n)
}

/// `g^m mod n²` for `g = n + 1`.
///
/// By the binomial theorem `(1 + n)^m ≡ 1 + n·m (mod n²)`, so no
/// exponentiation is needed.
#[inline]
pub fn generator_pow(m: &BigUint, n: &BigUint, n_square: &BigUint) -> BigUint {
    (n * m + BigUint::one()) % n_square
}
