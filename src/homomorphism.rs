// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Homomorphic operators on paired ciphertexts.
//!
//! Each operator exists in two forms: a typed method on [`PublicKey`] and a
//! free function over serialized blobs. All arithmetic is modulo `n²`.
//! Results that leave the signed plaintext range wrap around like two's
//! complement integers.

use num_bigint_dig::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

use crate::ciphertext::Ciphertext;
use crate::crypto::util::generator_pow;
use crate::error::Result;
use crate::fraction::BigFraction;
use crate::keypair::PublicKey;

impl PublicKey {
    /// `E(a) · E(b) = E(a + b)`, applied to both halves.
    pub fn add_encrypted(&self, a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
        let n_square = self.n_square();
        Ciphertext::new(
            (a.c() * b.c()) % n_square,
            (a.c_neg() * b.c_neg()) % n_square,
        )
    }

    /// `E(a) · E(-b) = E(a - b)`, using the negated half of `b` in place of
    /// a modular inverse.
    pub fn subtract_encrypted(&self, a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
        let n_square = self.n_square();
        Ciphertext::new(
            (a.c() * b.c_neg()) % n_square,
            (a.c_neg() * b.c()) % n_square,
        )
    }

    /// Add a known fraction to an encrypted value.
    ///
    /// The result carries the randomizer of `ciphertext` unchanged.
    pub fn add_plaintext(&self, ciphertext: &Ciphertext, k: &BigFraction) -> Result<Ciphertext> {
        let (encoded, encoded_neg) = self.encode_with_negation(k)?;
        let n_square = self.n_square();

        let gk = generator_pow(&encoded, self.n(), n_square);
        let gk_neg = generator_pow(&encoded_neg, self.n(), n_square);

        Ok(Ciphertext::new(
            (ciphertext.c() * gk) % n_square,
            (ciphertext.c_neg() * gk_neg) % n_square,
        ))
    }

    /// Subtract a known fraction from an encrypted value.
    pub fn subtract_plaintext(
        &self,
        ciphertext: &Ciphertext,
        k: &BigFraction,
    ) -> Result<Ciphertext> {
        self.add_plaintext(ciphertext, &-k)
    }

    /// Multiply an encrypted value by a known integer.
    ///
    /// Negative factors raise both halves to `|k|` and swap them. A zero
    /// factor yields the trivial encryption of zero `(1, 1)`.
    pub fn multiply_plaintext(&self, ciphertext: &Ciphertext, k: &BigInt) -> Ciphertext {
        let n_square = self.n_square();
        let exponent = k.abs().to_biguint().unwrap_or_else(BigUint::zero);

        let c = ciphertext.c().modpow(&exponent, n_square);
        let c_neg = ciphertext.c_neg().modpow(&exponent, n_square);

        if k.is_negative() {
            Ciphertext::new(c_neg, c)
        } else {
            Ciphertext::new(c, c_neg)
        }
    }

    /// Trivial, unrandomized encryption of zero.
    pub fn encrypted_zero(&self) -> Ciphertext {
        Ciphertext::new(BigUint::one(), BigUint::one())
    }
}

/// Homomorphic addition of two serialized ciphertexts.
pub fn add(pub_key: &PublicKey, a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    let a = Ciphertext::from_bytes(a, pub_key)?;
    let b = Ciphertext::from_bytes(b, pub_key)?;
    pub_key.add_encrypted(&a, &b).to_bytes(pub_key)
}

/// Homomorphic subtraction `a - b` of two serialized ciphertexts.
pub fn subtract(pub_key: &PublicKey, a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    let a = Ciphertext::from_bytes(a, pub_key)?;
    let b = Ciphertext::from_bytes(b, pub_key)?;
    pub_key.subtract_encrypted(&a, &b).to_bytes(pub_key)
}

pub fn plaintext_add(pub_key: &PublicKey, blob: &[u8], k: &BigFraction) -> Result<Vec<u8>> {
    let ciphertext = Ciphertext::from_bytes(blob, pub_key)?;
    pub_key.add_plaintext(&ciphertext, k)?.to_bytes(pub_key)
}

pub fn plaintext_subtract(pub_key: &PublicKey, blob: &[u8], k: &BigFraction) -> Result<Vec<u8>> {
    let ciphertext = Ciphertext::from_bytes(blob, pub_key)?;
    pub_key.subtract_plaintext(&ciphertext, k)?.to_bytes(pub_key)
}

pub fn plaintext_multiply(pub_key: &PublicKey, blob: &[u8], k: &BigInt) -> Result<Vec<u8>> {
    let ciphertext = Ciphertext::from_bytes(blob, pub_key)?;
    pub_key.multiply_plaintext(&ciphertext, k).to_bytes(pub_key)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::crypto::{Decrypt, Encrypt};
    use crate::error::Error;
    use crate::keypair::{KeyPair, KeyPairBuilder};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn create_test_keypair() -> KeyPair {
        KeyPairBuilder::new()
            .bit_length(384)
            .build_with_rng(&mut StdRng::seed_from_u64(4242))
            .unwrap()
    }

    fn frac(s: &str) -> BigFraction {
        s.parse().unwrap()
    }

    #[test]
    fn typed_add_and_subtract() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let a = keypair.encrypt(&frac("12.5")).unwrap();
        let b = keypair.encrypt(&frac("-30.25")).unwrap();

        let sum = public.add_encrypted(&a, &b);
        assert_eq!(keypair.decrypt(&sum).unwrap(), frac("-17.75"));
        assert_eq!(keypair.decrypt(&-sum).unwrap(), frac("17.75"));

        let diff = public.subtract_encrypted(&a, &b);
        assert_eq!(keypair.decrypt(&diff).unwrap(), frac("42.75"));
    }

    #[test]
    fn subtracting_self_gives_zero() {
        let keypair = create_test_keypair();
        let x = keypair.encrypt(&frac("-987654321.123")).unwrap();
        let zero = keypair.public_key().subtract_encrypted(&x, &x);
        assert_eq!(keypair.decrypt(&zero).unwrap(), frac("0"));
    }

    #[test]
    fn plaintext_add_and_subtract() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let a = keypair.encrypt(&frac("5")).unwrap();

        let plus = public.add_plaintext(&a, &frac("-7.5")).unwrap();
        assert_eq!(keypair.decrypt(&plus).unwrap(), frac("-2.5"));
        assert_eq!(keypair.decrypt(&-plus).unwrap(), frac("2.5"));

        let minus = public.subtract_plaintext(&a, &frac("0.001")).unwrap();
        assert_eq!(keypair.decrypt(&minus).unwrap(), frac("4.999"));
    }

    #[test]
    fn plaintext_add_rejects_oversized_scalar() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let a = keypair.encrypt(&frac("1")).unwrap();
        let too_big = BigFraction::from(public.max_encryptable_value().clone()) + frac("1");
        assert_eq!(public.add_plaintext(&a, &too_big), Err(Error::PlaintextTooLarge));
    }

    #[test]
    fn plaintext_multiply_by_signed_integers() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let a = keypair.encrypt(&frac("-3.25")).unwrap();

        for (k, expected) in [(4, "-13"), (-4, "13"), (1, "-3.25"), (0, "0")] {
            let product = public.multiply_plaintext(&a, &BigInt::from(k));
            assert_eq!(keypair.decrypt(&product).unwrap(), frac(expected), "k = {k}");

            let negated = keypair.decrypt(&-product).unwrap();
            assert_eq!(negated, -frac(expected), "k = {k}");
        }
    }

    #[test]
    fn encrypted_zero_is_additive_identity() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let a = keypair.encrypt(&frac("8")).unwrap();

        let sum = public.add_encrypted(&public.encrypted_zero(), &a);
        assert_eq!(keypair.decrypt(&sum).unwrap(), frac("8"));
    }

    #[test]
    fn blob_operators() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let a = keypair.encrypt(&frac("100")).unwrap().to_bytes(public).unwrap();
        let b = keypair.encrypt(&frac("-1")).unwrap().to_bytes(public).unwrap();

        let decrypt = |blob: &[u8]| {
            let ct = Ciphertext::from_bytes(blob, public).unwrap();
            keypair.decrypt(&ct).unwrap()
        };

        assert_eq!(decrypt(&add(public, &a, &b).unwrap()), frac("99"));
        assert_eq!(decrypt(&subtract(public, &a, &b).unwrap()), frac("101"));
        assert_eq!(decrypt(&plaintext_add(public, &a, &frac("0.5")).unwrap()), frac("100.5"));
        assert_eq!(decrypt(&plaintext_subtract(public, &a, &frac("0.5")).unwrap()), frac("99.5"));
        assert_eq!(decrypt(&plaintext_multiply(public, &b, &BigInt::from(-7)).unwrap()), frac("7"));
    }

    #[test]
    fn blob_operators_reject_wrong_length() {
        let keypair = create_test_keypair();
        let public = keypair.public_key();
        let good = keypair.encrypt(&frac("1")).unwrap().to_bytes(public).unwrap();
        let short = &good[..good.len() - 1];

        assert_eq!(add(public, &good, short), Err(Error::InvalidCiphertext));
        assert_eq!(subtract(public, short, &good), Err(Error::InvalidCiphertext));
        assert_eq!(plaintext_add(public, short, &frac("1")), Err(Error::InvalidCiphertext));
        assert_eq!(
            plaintext_multiply(public, short, &BigInt::from(2)),
            Err(Error::InvalidCiphertext)
        );
    }
}
