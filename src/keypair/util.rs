// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Probable-prime search and modulus construction for Paillier keys.

use num_bigint_dig::prime::probably_prime;
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::RngCore;
use tracing::debug;

use crate::error::{Error, Result};

/// Small odd primes used to reject candidates before Miller-Rabin.
const SIEVE_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541,
];

/// Upper bound on candidates drawn for a single prime.
const MAX_PRIME_CANDIDATES: usize = 1_000_000;

/// Draw a probable prime with exactly `bits` bits.
///
/// Candidates have their top and bottom bits forced, are sieved against
/// small primes and then tested with `rounds` Miller-Rabin rounds.
pub fn generate_prime<R: RngCore + ?Sized>(
    bits: usize,
    rounds: usize,
    rng: &mut R,
) -> Result<BigUint> {
    if bits < 16 {
        return Err(Error::KeyGenerationFailed(format!("prime size {bits} is too small")));
    }

    for _ in 0..MAX_PRIME_CANDIDATES {
        let candidate = generate_candidate(bits, rng);
        if divisible_by_small_prime(&candidate) {
            continue;
        }
        if probably_prime(&candidate, rounds) {
            return Ok(candidate);
        }
    }

    Err(Error::KeyGenerationFailed(format!("no {bits}-bit prime found")))
}

/// Draw primes `p != q` of `key_size / 2` bits until `n = p * q` has exactly
/// `key_size` bits. Returns `(p, q, n)`.
pub fn generate_modulus<R: RngCore + ?Sized>(
    key_size: usize,
    rounds: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<(BigUint, BigUint, BigUint)> {
    let half = key_size / 2;

    for attempt in 1..=max_attempts {
        let p = generate_prime(half, rounds, rng)?;
        let q = generate_prime(half, rounds, rng)?;
        if p == q {
            continue;
        }

        let n = &p * &q;
        if n.bits() == key_size {
            return Ok((p, q, n));
        }

        debug!(attempt, bits = n.bits(), key_size, "modulus has wrong bit length, redrawing");
    }

    Err(Error::KeyGenerationFailed(format!(
        "no {key_size}-bit modulus after {max_attempts} attempts"
    )))
}

/// Random odd integer with the most significant bit set.
#[inline]
fn generate_candidate<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> BigUint {
    let mut candidate = rng.gen_biguint(bits);
    candidate |= BigUint::one() << (bits - 1);
    candidate |= BigUint::one();
    candidate
}

#[inline]
fn divisible_by_small_prime(n: &BigUint) -> bool {
    SIEVE_PRIMES.iter().any(|&prime| (n % prime).is_zero())
}
