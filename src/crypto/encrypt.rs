// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Encrypt, util};
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::fraction::BigFraction;
use crate::keypair::PublicKey;

use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::One;
use rand::rngs::StdRng;
use rand::{CryptoRng, RngCore, SeedableRng};

impl Encrypt for PublicKey {
    fn encrypt(&self, message: &BigFraction) -> Result<Ciphertext> {
        self.encryptor().encrypt(message)
    }
}

/// Encryption context bound to a public key.
///
/// Owns the random source used for the per-ciphertext randomizer, so a
/// single context can encrypt many messages without reseeding.
#[derive(Debug)]
pub struct Encryptor<'a, R = StdRng> {
    pub_key: &'a PublicKey,
    rng: R,
}

impl<'a> Encryptor<'a> {
    /// Create an encryptor seeded from operating system entropy.
    pub(crate) fn new(pub_key: &'a PublicKey) -> Self {
        Self { pub_key, rng: StdRng::from_entropy() }
    }
}

impl<'a, R: RngCore + CryptoRng> Encryptor<'a, R> {
    /// Create an encryptor drawing randomizers from `rng`.
    pub fn with_rng(pub_key: &'a PublicKey, rng: R) -> Self {
        Self { pub_key, rng }
    }

    pub fn public_key(&self) -> &PublicKey {
        self.pub_key
    }

    /// Encode `message` and encrypt it together with its negation.
    pub fn encrypt(&mut self, message: &BigFraction) -> Result<Ciphertext> {
        let (m, m_neg) = self.pub_key.encode_with_negation(message)?;
        self.encrypt_encoded(&m, &m_neg)
    }

    /// Encrypt two already encoded residues under a shared randomizer.
    ///
    /// `c = g^m · r^n mod n²` and `c_neg = g^m_neg · r^n mod n²`.
    pub fn encrypt_encoded(&mut self, m: &BigUint, m_neg: &BigUint) -> Result<Ciphertext> {
        let n = self.pub_key.n();
        if m >= n || m_neg >= n {
            return Err(Error::PlaintextTooLarge);
        }

        let n_square = self.pub_key.n_square();
        let rn = self.randomizer().modpow(n, n_square);

        let c = (util::generator_pow(m, n, n_square) * &rn) % n_square;
        let c_neg = (util::generator_pow(m_neg, n, n_square) * &rn) % n_square;

        Ok(Ciphertext::new(c, c_neg))
    }

    /// Uniform draw from `[2, n - 1)`.
    fn randomizer(&mut self) -> BigUint {
        let low = BigUint::from(2u32);
        let high = self.pub_key.n() - BigUint::one();
        self.rng.gen_biguint_range(&low, &high)
    }
}

impl<'a> PublicKey {
    /// Create an encryptor for this key.
    pub fn encryptor(&'a self) -> Encryptor<'a> {
        Encryptor::new(self)
    }
}
