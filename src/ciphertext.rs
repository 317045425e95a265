// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Neg;

use num_bigint_dig::BigUint;

use crate::error::{Error, Result};
use crate::keypair::PublicKey;

/// Paired ciphertext `(E(m), E(-m))`.
///
/// Both halves are encrypted with the same randomizer. Carrying the
/// encryption of the negation lets subtraction be expressed as a product of
/// ciphertexts without computing modular inverses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    c: BigUint,
    c_neg: BigUint,
}

impl Ciphertext {
    pub fn new(c: BigUint, c_neg: BigUint) -> Self {
        Self { c, c_neg }
    }

    /// Encryption of the message.
    pub fn c(&self) -> &BigUint {
        &self.c
    }

    /// Encryption of the negated message.
    pub fn c_neg(&self) -> &BigUint {
        &self.c_neg
    }

    pub fn into_parts(self) -> (BigUint, BigUint) {
        (self.c, self.c_neg)
    }

    /// Serialize as `C || C_neg`, each half big-endian and left-padded with
    /// zeros to the key's ciphertext block size.
    pub fn to_bytes(&self, pub_key: &PublicKey) -> Result<Vec<u8>> {
        let blocksize = pub_key.ciphertext_blocksize();
        let mut out = Vec::with_capacity(pub_key.ciphertext_length());
        write_padded(&mut out, &self.c, blocksize)?;
        write_padded(&mut out, &self.c_neg, blocksize)?;
        Ok(out)
    }

    /// Parse a blob produced by [`Ciphertext::to_bytes`].
    ///
    /// The blob length must equal the key's ciphertext length and both
    /// halves must be residues modulo `n²`.
    pub fn from_bytes(bytes: &[u8], pub_key: &PublicKey) -> Result<Self> {
        if bytes.len() != pub_key.ciphertext_length() {
            return Err(Error::InvalidCiphertext);
        }

        let (first, second) = bytes.split_at(pub_key.ciphertext_blocksize());
        let c = BigUint::from_bytes_be(first);
        let c_neg = BigUint::from_bytes_be(second);
        if &c >= pub_key.n_square() || &c_neg >= pub_key.n_square() {
            return Err(Error::InvalidCiphertext);
        }

        Ok(Self { c, c_neg })
    }
}

fn write_padded(out: &mut Vec<u8>, value: &BigUint, width: usize) -> Result<()> {
    let bytes = value.to_bytes_be();
    if bytes.len() > width {
        return Err(Error::InvalidCiphertext);
    }
    out.resize(out.len() + width - bytes.len(), 0);
    out.extend_from_slice(&bytes);
    Ok(())
}

/// Swapping the halves yields an encryption of `-m`.
impl Neg for Ciphertext {
    type Output = Ciphertext;

    fn neg(self) -> Ciphertext {
        Ciphertext::new(self.c_neg, self.c)
    }
}

impl Neg for &Ciphertext {
    type Output = Ciphertext;

    fn neg(self) -> Ciphertext {
        Ciphertext::new(self.c_neg.clone(), self.c.clone())
    }
}
