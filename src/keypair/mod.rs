// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod util;

pub mod defaults;

pub use util::{generate_modulus, generate_prime};

use crate::ciphertext::Ciphertext;
use crate::crypto::{Decrypt, Decryptor, Encrypt, Encryptor};
use crate::error::{Error, Result};
use crate::fraction::BigFraction;

use num_bigint_dig::{BigUint, ModInverse};
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::{CryptoRng, RngCore, SeedableRng};
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Public parameters of the cryptosystem together with every constant
/// derived from them.
///
/// The generator is fixed to `g = n + 1`. The signed plaintext range is
/// governed by `max_plaintext_bits` and the fixed-point precision by
/// `plaintext_dec_place`; both travel with the public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) g: BigUint,
    pub(crate) max_plaintext_bits: usize,
    pub(crate) plaintext_dec_place: usize,

    pub(crate) n_square: BigUint,
    pub(crate) n_bit_count: usize,
    pub(crate) n_length: usize,
    pub(crate) n_square_length: usize,

    /// `10^plaintext_dec_place`
    pub(crate) plaintext_exp: BigUint,
    /// `2^max_plaintext_bits - 1`
    pub(crate) max_raw_plaintext: BigUint,
    /// `max_raw_plaintext / 2`
    pub(crate) max_encryptable_value: BigUint,
    /// `(max_raw_plaintext + 1) * plaintext_exp`, the wraparound modulus of encoded values.
    pub(crate) wrap_modulus: BigUint,
    /// `max_encryptable_value * plaintext_exp`
    pub(crate) max_encoded_positive: BigUint,

    pub(crate) ciphertext_blocksize: usize,
    pub(crate) ciphertext_length: usize,
}

impl PublicKey {
    /// Construct a public key and precompute its derived constants.
    ///
    /// `g` must equal `n + 1`, and the scaled plaintext range
    /// `2^max_plaintext_bits * 10^plaintext_dec_place` must fit below `n`.
    pub fn new(
        n: BigUint,
        g: BigUint,
        max_plaintext_bits: usize,
        plaintext_dec_place: usize,
    ) -> Result<Self> {
        if n.is_zero() || max_plaintext_bits < 2 {
            return Err(Error::InvalidPublicKey);
        }
        if g != &n + BigUint::one() {
            return Err(Error::InvalidPublicKey);
        }
        // log2(10) < 4, so both bounds hold for any range that fits below n.
        let n_bits = n.bits();
        if max_plaintext_bits >= n_bits || plaintext_dec_place.saturating_mul(4) >= n_bits {
            return Err(Error::InvalidPublicKey);
        }

        let plaintext_exp = num_traits::pow(BigUint::from(10u32), plaintext_dec_place);
        let wrap_plaintext = BigUint::one() << max_plaintext_bits;
        let max_raw_plaintext = &wrap_plaintext - BigUint::one();
        let max_encryptable_value = &max_raw_plaintext >> 1;
        let wrap_modulus = &wrap_plaintext * &plaintext_exp;
        let max_encoded_positive = &max_encryptable_value * &plaintext_exp;

        if wrap_modulus >= n {
            return Err(Error::InvalidPublicKey);
        }

        let n_square = &n * &n;
        let n_bit_count = n.bits();
        let n_length = (n_bit_count + 7) >> 3;
        let n_square_length = n_length * 2;

        // Each half gets two spare bytes beyond the size of n².
        let ciphertext_blocksize = n_length * 2 + 2;
        let ciphertext_length = ciphertext_blocksize * 2;

        Ok(Self {
            n,
            g,
            max_plaintext_bits,
            plaintext_dec_place,
            n_square,
            n_bit_count,
            n_length,
            n_square_length,
            plaintext_exp,
            max_raw_plaintext,
            max_encryptable_value,
            wrap_modulus,
            max_encoded_positive,
            ciphertext_blocksize,
            ciphertext_length,
        })
    }

    /// Public modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Generator `g = n + 1`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    pub fn n_square(&self) -> &BigUint {
        &self.n_square
    }

    /// Bit length of `n`, i.e. the key size.
    pub fn key_size(&self) -> usize {
        self.n_bit_count
    }

    /// Byte length of `n`.
    pub fn n_length(&self) -> usize {
        self.n_length
    }

    pub fn n_square_length(&self) -> usize {
        self.n_square_length
    }

    pub fn max_plaintext_bits(&self) -> usize {
        self.max_plaintext_bits
    }

    pub fn plaintext_dec_place(&self) -> usize {
        self.plaintext_dec_place
    }

    pub fn plaintext_exp(&self) -> &BigUint {
        &self.plaintext_exp
    }

    pub fn max_raw_plaintext(&self) -> &BigUint {
        &self.max_raw_plaintext
    }

    /// Largest magnitude accepted by encryption.
    pub fn max_encryptable_value(&self) -> &BigUint {
        &self.max_encryptable_value
    }

    /// Serialized size of one ciphertext half.
    pub fn ciphertext_blocksize(&self) -> usize {
        self.ciphertext_blocksize
    }

    /// Serialized size of a full ciphertext pair.
    pub fn ciphertext_length(&self) -> usize {
        self.ciphertext_length
    }
}

/// Secret key material `(lambda, mu)`.
///
/// The prime factors are discarded after key generation; only the classic
/// Paillier private key is kept. Sensitive fields are zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) public_key: PublicKey,

    /// `(p - 1)(q - 1)`
    pub(crate) lambda: BigUint,

    /// `lambda⁻¹ mod n`
    pub(crate) mu: BigUint,
}

impl PrivateKey {
    /// Construct a private key from its components.
    ///
    /// Validates that `mu` is the inverse of `lambda` modulo `n`.
    pub fn new(public_key: PublicKey, lambda: BigUint, mu: BigUint) -> Result<Self> {
        if lambda.is_zero() || mu.is_zero() {
            return Err(Error::InvalidPrivateKey);
        }
        if (&lambda * &mu) % public_key.n() != BigUint::one() {
            return Err(Error::InvalidPrivateKey);
        }

        Ok(Self { public_key, lambda, mu })
    }

    /// Return a reference to the associated public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn lambda(&self) -> &BigUint {
        &self.lambda
    }

    pub fn mu(&self) -> &BigUint {
        &self.mu
    }
}

/// A complete key pair consisting of public and private components.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    public: PublicKey,
    secret: PrivateKey,
}

impl<'a> KeyPair {
    /// Generate a key pair with default parameters.
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom modulus size.
    pub fn generate_with_size(bit_length: usize) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build()
    }

    /// Derive a key pair from two distinct primes using the default
    /// plaintext configuration. The bit length of `p * q` must be a legal
    /// key size.
    pub fn from_primes(p: BigUint, q: BigUint) -> Result<Self> {
        if p == q || p <= BigUint::one() || q <= BigUint::one() {
            return Err(Error::KeyGenerationFailed("Primes must be distinct".into()));
        }

        let n = &p * &q;
        defaults::check_key_size(n.bits())?;

        Self::derive(
            p,
            q,
            n,
            defaults::DEFAULT_MAX_PLAINTEXT_BITS,
            defaults::DEFAULT_PLAINTEXT_DEC_PLACE,
        )
    }

    /// `g = n + 1`, `lambda = (p-1)(q-1)`, `mu = lambda⁻¹ mod n`.
    ///
    /// The factors are wiped before returning.
    fn derive(
        mut p: BigUint,
        mut q: BigUint,
        n: BigUint,
        max_plaintext_bits: usize,
        plaintext_dec_place: usize,
    ) -> Result<Self> {
        let lambda = (&p - BigUint::one()) * (&q - BigUint::one());
        p.zeroize();
        q.zeroize();

        let mu = lambda
            .clone()
            .mod_inverse(&n)
            .and_then(|inv| inv.to_biguint())
            .ok_or_else(|| Error::KeyGenerationFailed("lambda is not invertible mod n".into()))?;

        let g = &n + BigUint::one();
        let public = PublicKey::new(n, g, max_plaintext_bits, plaintext_dec_place)?;
        let secret = PrivateKey::new(public.clone(), lambda, mu)?;

        Ok(KeyPair { public, secret })
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }

    /// Create an encryptor bound to this public key.
    pub fn encryptor(&'a self) -> Encryptor<'a> {
        self.public.encryptor()
    }

    /// Create a decryptor bound to this private key.
    pub fn decryptor(&'a self) -> Decryptor<'a> {
        self.secret.decryptor()
    }
}

impl Encrypt for KeyPair {
    fn encrypt(&self, message: &BigFraction) -> Result<Ciphertext> {
        self.public.encrypt(message)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigFraction> {
        self.secret.decrypt(ciphertext)
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug, Clone)]
pub struct KeyPairBuilder {
    bit_length: usize,
    max_plaintext_bits: usize,
    plaintext_dec_place: usize,
    miller_rabin_rounds: usize,
    max_attempts: usize,
}

impl KeyPairBuilder {
    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            bit_length: defaults::DEFAULT_KEY_SIZE,
            max_plaintext_bits: defaults::DEFAULT_MAX_PLAINTEXT_BITS,
            plaintext_dec_place: defaults::DEFAULT_PLAINTEXT_DEC_PLACE,
            miller_rabin_rounds: defaults::MILLER_RABIN_ROUNDS,
            max_attempts: defaults::MAX_MODULUS_ATTEMPTS,
        }
    }

    /// Set the desired modulus bit length.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Set the signed plaintext magnitude bound, in bits.
    pub fn max_plaintext_bits(mut self, bits: usize) -> Self {
        self.max_plaintext_bits = bits;
        self
    }

    /// Set the number of decimal places kept by the plaintext encoding.
    pub fn plaintext_dec_place(mut self, places: usize) -> Self {
        self.plaintext_dec_place = places;
        self
    }

    pub fn miller_rabin_rounds(mut self, rounds: usize) -> Self {
        self.miller_rabin_rounds = rounds.max(1);
        self
    }

    /// Cap on modulus redraws and on retries after a failed inversion.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Generate the key pair from operating system entropy.
    pub fn build(self) -> Result<KeyPair> {
        let mut rng = StdRng::from_entropy();
        self.build_with_rng(&mut rng)
    }

    /// Generate the key pair drawing all randomness from `rng`.
    pub fn build_with_rng<R: RngCore + CryptoRng>(self, rng: &mut R) -> Result<KeyPair> {
        defaults::check_key_size(self.bit_length)?;
        self.check_plaintext_space()?;

        let rounds = self.miller_rabin_rounds;
        let bit_length = self.bit_length;
        let max_attempts = self.max_attempts;
        self.derive_with_retries(|| generate_modulus(bit_length, rounds, max_attempts, &mut *rng))
    }

    /// Derive keys from successive prime pairs until lambda is invertible,
    /// at most `max_attempts` times.
    fn derive_with_retries<F>(&self, mut draw: F) -> Result<KeyPair>
    where
        F: FnMut() -> Result<(BigUint, BigUint, BigUint)>,
    {
        for attempt in 1..=self.max_attempts {
            let (p, q, n) = draw()?;

            match KeyPair::derive(p, q, n, self.max_plaintext_bits, self.plaintext_dec_place) {
                Ok(key_pair) => {
                    info!(key_size = self.bit_length, attempt, "generated Paillier key pair");
                    return Ok(key_pair);
                }
                Err(Error::KeyGenerationFailed(reason)) => {
                    debug!(attempt, %reason, "discarding prime pair");
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::KeyGenerationFailed(format!(
            "no usable prime pair after {} attempts",
            self.max_attempts
        )))
    }

    /// Rejects plaintext configurations whose scaled range would not fit
    /// below a modulus of the requested size.
    fn check_plaintext_space(&self) -> Result<()> {
        if self.max_plaintext_bits < 2 {
            return Err(Error::InvalidParameters("max_plaintext_bits must be at least 2".into()));
        }
        if self.max_plaintext_bits >= self.bit_length
            || self.plaintext_dec_place.saturating_mul(4) >= self.bit_length
        {
            return Err(plaintext_space_too_large(self.bit_length));
        }

        let exp = num_traits::pow(BigUint::from(10u32), self.plaintext_dec_place);
        let wrap = (BigUint::one() << self.max_plaintext_bits) * exp;
        if wrap.bits() >= self.bit_length {
            return Err(plaintext_space_too_large(self.bit_length));
        }
        Ok(())
    }
}

fn plaintext_space_too_large(bit_length: usize) -> Error {
    Error::InvalidParameters(format!("scaled plaintext range does not fit a {bit_length}-bit key"))
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}
