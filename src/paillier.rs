// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use num_bigint_dig::{BigInt, BigUint};

use crate::ciphertext::Ciphertext;
use crate::crypto::{Decrypt, Encrypt};
use crate::error::{Error, Result};
use crate::fraction::BigFraction;
use crate::homomorphism;
use crate::keypair::{KeyPair, PrivateKey, PublicKey, defaults};
use crate::params::KeyParameters;

/// Byte-level surface of the cryptosystem.
///
/// Ciphertexts enter and leave as flat blobs of
/// [`ciphertext_length`](Paillier::ciphertext_length) bytes. An instance
/// built from public parameters alone can encrypt and evaluate the
/// homomorphic operators but not decrypt.
#[derive(Clone)]
pub struct Paillier {
    public_key: PublicKey,
    private_key: Option<PrivateKey>,
}

impl Paillier {
    /// Generate a fresh key pair of `key_size` bits with default plaintext
    /// settings.
    pub fn new(key_size: usize) -> Result<Self> {
        let key_pair = KeyPair::generate_with_size(key_size)?;
        Ok(Self::from_key_pair(&key_pair))
    }

    pub fn from_key_pair(key_pair: &KeyPair) -> Self {
        Self {
            public_key: key_pair.public_key().clone(),
            private_key: Some(key_pair.private_key().clone()),
        }
    }

    pub fn from_public_key(public_key: PublicKey) -> Self {
        Self { public_key, private_key: None }
    }

    pub fn from_private_key(private_key: PrivateKey) -> Self {
        Self { public_key: private_key.public_key().clone(), private_key: Some(private_key) }
    }

    /// Import exported parameters. The modulus must have a legal key size.
    pub fn from_parameters(params: &KeyParameters) -> Result<Self> {
        defaults::check_key_size(params.n.bits())?;

        let public_key = params.to_public_key()?;
        let private_key = params.to_private_key()?;
        Ok(Self { public_key, private_key })
    }

    /// Import a `PaillierKeyValue` XML document.
    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::from_parameters(&KeyParameters::from_xml(xml)?)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Encrypt `message` into a ciphertext blob.
    pub fn encrypt_data(&self, message: &BigFraction) -> Result<Vec<u8>> {
        self.public_key.encrypt(message)?.to_bytes(&self.public_key)
    }

    /// Decrypt a ciphertext blob.
    ///
    /// Fails with [`Error::MissingPrivateKey`] on a public-only instance.
    pub fn decrypt_data(&self, blob: &[u8]) -> Result<BigFraction> {
        let private_key = self.private_key.as_ref().ok_or(Error::MissingPrivateKey)?;
        let ciphertext = Ciphertext::from_bytes(blob, &self.public_key)?;
        private_key.decrypt(&ciphertext)
    }

    pub fn add(&self, a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
        homomorphism::add(&self.public_key, a, b)
    }

    /// `a - b`
    pub fn subtract(&self, a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
        homomorphism::subtract(&self.public_key, a, b)
    }

    pub fn plaintext_add(&self, blob: &[u8], k: &BigFraction) -> Result<Vec<u8>> {
        homomorphism::plaintext_add(&self.public_key, blob, k)
    }

    pub fn plaintext_subtract(&self, blob: &[u8], k: &BigFraction) -> Result<Vec<u8>> {
        homomorphism::plaintext_subtract(&self.public_key, blob, k)
    }

    pub fn plaintext_multiply(&self, blob: &[u8], k: &BigInt) -> Result<Vec<u8>> {
        homomorphism::plaintext_multiply(&self.public_key, blob, k)
    }

    /// Export the key. Private components are included only when requested
    /// and available.
    pub fn export_parameters(&self, include_private: bool) -> KeyParameters {
        match (&self.private_key, include_private) {
            (Some(private_key), true) => KeyParameters::from_private_key(private_key),
            _ => KeyParameters::from_public_key(&self.public_key),
        }
    }

    pub fn to_xml_string(&self, include_private: bool) -> Result<String> {
        self.export_parameters(include_private).to_xml()
    }

    pub fn key_size(&self) -> usize {
        self.public_key.key_size()
    }

    pub fn max_plaintext_bits(&self) -> usize {
        self.public_key.max_plaintext_bits()
    }

    pub fn max_encryptable_value(&self) -> &BigUint {
        self.public_key.max_encryptable_value()
    }

    pub fn plaintext_exp(&self) -> &BigUint {
        self.public_key.plaintext_exp()
    }

    pub fn plaintext_dec_place(&self) -> usize {
        self.public_key.plaintext_dec_place()
    }

    pub fn ciphertext_blocksize(&self) -> usize {
        self.public_key.ciphertext_blocksize()
    }

    pub fn ciphertext_length(&self) -> usize {
        self.public_key.ciphertext_length()
    }

    pub fn n_square(&self) -> &BigUint {
        self.public_key.n_square()
    }

    pub fn n_square_length(&self) -> usize {
        self.public_key.n_square_length()
    }
}

impl fmt::Debug for Paillier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paillier")
            .field("key_size", &self.key_size())
            .field("has_private_key", &self.has_private_key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::keypair::KeyPairBuilder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn create_test_instance() -> Paillier {
        let key_pair = KeyPairBuilder::new()
            .bit_length(384)
            .build_with_rng(&mut StdRng::seed_from_u64(1984))
            .unwrap();
        Paillier::from_key_pair(&key_pair)
    }

    #[test]
    fn blob_has_fixed_length() {
        let paillier = create_test_instance();
        for s in ["0", "-1", "170141183460469231731687303715884105727"] {
            let blob = paillier.encrypt_data(&s.parse().unwrap()).unwrap();
            assert_eq!(blob.len(), paillier.ciphertext_length());
        }
    }

    #[test]
    fn public_only_instance_cannot_decrypt() {
        let paillier = create_test_instance();
        let public = Paillier::from_public_key(paillier.public_key().clone());
        let blob = public.encrypt_data(&BigFraction::from(5)).unwrap();

        assert_eq!(public.decrypt_data(&blob), Err(Error::MissingPrivateKey));
        assert_eq!(paillier.decrypt_data(&blob).unwrap(), BigFraction::from(5));
    }

    #[test]
    fn export_respects_private_flag() {
        let paillier = create_test_instance();
        assert!(paillier.export_parameters(true).has_private_key());
        assert!(!paillier.export_parameters(false).has_private_key());

        let public = Paillier::from_public_key(paillier.public_key().clone());
        assert!(!public.export_parameters(true).has_private_key());
    }

    #[test]
    fn illegal_imported_key_size_is_rejected() {
        let mut params = create_test_instance().export_parameters(false);
        params.n = BigUint::from(1u32) << 300usize;
        assert!(matches!(
            Paillier::from_parameters(&params),
            Err(Error::InvalidKeySize { actual: 301, .. })
        ));
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let paillier = create_test_instance();
        assert_eq!(format!("{paillier:?}"), "Paillier { key_size: 384, has_private_key: true }");
    }
}
