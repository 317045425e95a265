// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signed fixed-point plaintext encoding.
//!
//! A message `m` is scaled by `10^plaintext_dec_place` and truncated toward
//! zero. Negative values wrap around `(max_raw_plaintext + 1) * 10^d`, the
//! same way two's complement wraps around `2^bits`. The wraparound modulus
//! is independent of `n`; it only has to stay below it.

use num_bigint_dig::{BigInt, BigUint, Sign};
use num_traits::Signed;
use tracing::debug;

use crate::error::{Error, Result};
use crate::fraction::BigFraction;
use crate::keypair::PublicKey;

impl PublicKey {
    /// Map a signed fraction to its residue in `[0, n)`.
    ///
    /// Denominators larger than `10^plaintext_dec_place` lose precision
    /// silently; the result is truncated toward zero. Fails with
    /// [`Error::PlaintextTooLarge`] when the truncated magnitude exceeds
    /// [`max_encryptable_value`](PublicKey::max_encryptable_value).
    pub fn encode(&self, message: &BigFraction) -> Result<BigUint> {
        let exp = BigInt::from_biguint(Sign::Plus, self.plaintext_exp.clone());
        if message.denominator() > &exp {
            debug!(
                dec_place = self.plaintext_dec_place,
                "truncating plaintext precision"
            );
        }

        let scaled = (message.numerator() * &exp) / message.denominator();
        let magnitude = scaled.abs().to_biguint().ok_or(Error::PlaintextTooLarge)?;
        if magnitude > self.max_encoded_positive {
            return Err(Error::PlaintextTooLarge);
        }

        if scaled.is_negative() {
            Ok(&self.wrap_modulus - magnitude)
        } else {
            Ok(magnitude)
        }
    }

    /// Encode `message` and `-message` together.
    pub fn encode_with_negation(&self, message: &BigFraction) -> Result<(BigUint, BigUint)> {
        let encoded = self.encode(message)?;
        let encoded_neg = self.encode(&-message)?;
        Ok((encoded, encoded_neg))
    }

    /// Map a residue back into the signed range.
    ///
    /// The residue is first reduced modulo the wraparound modulus, so sums
    /// and scalar multiples of encodings decode to the sum or multiple of
    /// the messages as long as no reduction modulo `n` took place.
    pub fn decode(&self, value: &BigUint) -> BigFraction {
        let reduced = value % &self.wrap_modulus;
        let exp = BigInt::from_biguint(Sign::Plus, self.plaintext_exp.clone());

        let numerator = if reduced > self.max_encoded_positive {
            BigInt::from_biguint(Sign::Plus, reduced)
                - BigInt::from_biguint(Sign::Plus, self.wrap_modulus.clone())
        } else {
            BigInt::from_biguint(Sign::Plus, reduced)
        };

        BigFraction::from_parts(numerator, exp)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use num_traits::One;
    use proptest::prelude::*;

    /// Encoding only needs `n` to be larger than the wraparound modulus.
    fn test_key() -> PublicKey {
        let n = (BigUint::one() << 383usize) + BigUint::from(12_345u32);
        let g = &n + BigUint::one();
        PublicKey::new(n, g, 128, 12).unwrap()
    }

    fn frac(s: &str) -> BigFraction {
        s.parse().unwrap()
    }

    fn max_value(key: &PublicKey) -> BigFraction {
        BigFraction::from(key.max_encryptable_value().clone())
    }

    #[test]
    fn zero() {
        let key = test_key();
        let encoded = key.encode(&frac("0")).unwrap();
        assert_eq!(encoded, BigUint::from(0u32));
        assert_eq!(key.decode(&encoded), frac("0"));
    }

    #[test]
    fn positive_values_are_scaled() {
        let key = test_key();
        assert_eq!(key.encode(&frac("5")).unwrap(), BigUint::from(5_000_000_000_000u64));
        assert_eq!(key.encode(&frac("0.25")).unwrap(), BigUint::from(250_000_000_000u64));
    }

    #[test]
    fn negative_values_wrap() {
        let key = test_key();
        let encoded = key.encode(&frac("-1")).unwrap();
        assert_eq!(encoded, &key.wrap_modulus - BigUint::from(1_000_000_000_000u64));
        assert_eq!(key.decode(&encoded), frac("-1"));
    }

    #[test]
    fn bounds() {
        let key = test_key();
        let max = max_value(&key);
        let one = frac("1");

        let encoded = key.encode(&max).unwrap();
        assert_eq!(key.decode(&encoded), max);

        let encoded = key.encode(&-&max).unwrap();
        assert_eq!(key.decode(&encoded), -&max);

        assert_eq!(key.encode(&(&max + &one)), Err(Error::PlaintextTooLarge));
        assert_eq!(key.encode(&(-&max - &one)), Err(Error::PlaintextTooLarge));
    }

    #[test]
    fn sub_precision_excess_over_bound_is_truncated_away() {
        let key = test_key();
        let max = max_value(&key);
        let nudged = &max + &frac("1/10000000000000");
        assert_eq!(key.decode(&key.encode(&nudged).unwrap()), max);
    }

    #[test]
    fn big_denominator_is_truncated() {
        let key = test_key();
        let exp = BigInt::from(1_000_000_000_000u64);

        // 10000 / (2 * 10^12) is exactly representable after truncation.
        let f = BigFraction::new(BigInt::from(10_000), &exp * BigInt::from(2)).unwrap();
        assert_eq!(key.decode(&key.encode(&f).unwrap()), f);

        // Below the precision floor everything truncates to zero.
        let tiny = BigFraction::new(BigInt::from(-1), &exp * BigInt::from(10)).unwrap();
        assert_eq!(key.encode(&tiny).unwrap(), BigUint::from(0u32));
    }

    #[test]
    fn truncation_rounds_toward_zero() {
        let key = test_key();
        let third = key.decode(&key.encode(&frac("1/3")).unwrap());
        let minus_third = key.decode(&key.encode(&frac("-1/3")).unwrap());

        assert_eq!(third, frac("0.333333333333"));
        assert_eq!(minus_third, frac("-0.333333333333"));
    }

    #[test]
    fn decode_reduces_sums_of_encodings() {
        let key = test_key();
        let a = frac("-765.5");
        let b = frac("123.25");

        let sum = key.encode(&a).unwrap() + key.encode(&b).unwrap();
        assert_eq!(key.decode(&sum), &a + &b);

        let (pos, neg) = key.encode_with_negation(&a).unwrap();
        assert_eq!(key.decode(&(pos + neg)), frac("0"));
    }

    #[test]
    fn decode_reduces_scalar_multiples() {
        let key = test_key();
        let a = frac("-2.5");
        let tripled = key.encode(&a).unwrap() * BigUint::from(3u32);
        assert_eq!(key.decode(&tripled), frac("-7.5"));
    }

    proptest! {
        #[test]
        fn roundtrip_fixed_point(n in any::<i64>(), places in 0usize..=12) {
            let key = test_key();
            let den = num_traits::pow(BigInt::from(10), places);
            let message = BigFraction::new(BigInt::from(n), den).unwrap();

            let encoded = key.encode(&message).unwrap();
            prop_assert!(&encoded < key.n());
            prop_assert_eq!(key.decode(&encoded), message);
        }
    }
}
