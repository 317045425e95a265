// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use super::{Decrypt, util};
use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::fraction::BigFraction;
use crate::keypair::PrivateKey;

use num_bigint_dig::BigUint;

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigFraction> {
        self.decryptor().decrypt(ciphertext)
    }
}

/// Decryption context bound to a private key.
pub struct Decryptor<'a> {
    priv_key: &'a PrivateKey,
}

impl<'a> Decryptor<'a> {
    pub(crate) fn new(priv_key: &'a PrivateKey) -> Self {
        Self { priv_key }
    }

    /// Recover the encoded residue of a single ciphertext half.
    ///
    /// `m = L(c^lambda mod n²) · mu mod n`
    pub fn decrypt_raw(&self, c: &BigUint) -> Result<BigUint> {
        let public = self.priv_key.public_key();
        let n = public.n();
        if c >= public.n_square() {
            return Err(Error::InvalidCiphertext);
        }

        let u = c.modpow(self.priv_key.lambda(), public.n_square());
        let l = util::l_function(&u, n)?;

        Ok((l * self.priv_key.mu()) % n)
    }

    /// Decrypt the primary half and decode it into a signed fraction.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigFraction> {
        let m = self.decrypt_raw(ciphertext.c())?;
        Ok(self.priv_key.public_key().decode(&m))
    }
}

impl fmt::Debug for Decryptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decryptor").finish_non_exhaustive()
    }
}

impl<'a> PrivateKey {
    /// Create a decryptor for this key.
    pub fn decryptor(&'a self) -> Decryptor<'a> {
        Decryptor::new(self)
    }
}
