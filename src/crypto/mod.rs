// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod decrypt;
mod encrypt;
pub(crate) mod util;

pub use decrypt::Decryptor;
pub use encrypt::Encryptor;

use crate::ciphertext::Ciphertext;
use crate::error::Result;
use crate::fraction::BigFraction;

/// Encrypts signed fractions into paired ciphertexts.
pub trait Encrypt {
    /// Encode `message` and encrypt both it and its negation.
    ///
    /// Fails with [`Error::PlaintextTooLarge`](crate::Error::PlaintextTooLarge)
    /// when the magnitude exceeds the key's encryptable range.
    fn encrypt(&self, message: &BigFraction) -> Result<Ciphertext>;
}

/// Recovers signed fractions from paired ciphertexts.
pub trait Decrypt {
    /// Decrypt the primary half of `ciphertext`.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigFraction>;
}


#[cfg(test)]
mod test_decryption {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::Error;
    use crate::keypair::{KeyPair, KeyPairBuilder};
    use num_bigint_dig::BigUint;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn create_test_keypair(seed: u64) -> KeyPair {
        KeyPairBuilder::new()
            .bit_length(384)
            .build_with_rng(&mut StdRng::seed_from_u64(seed))
            .unwrap()
    }

    #[test]
    fn zero_component_is_rejected() {
        let keypair = create_test_keypair(21);
        let ciphertext = Ciphertext::new(BigUint::from(0u32), BigUint::from(1u32));
        assert_eq!(keypair.decrypt(&ciphertext), Err(Error::InvalidCiphertext));
    }

    #[test]
    fn out_of_range_component_is_rejected() {
        let keypair = create_test_keypair(22);
        let n_square = keypair.public_key().n_square().clone();
        let ciphertext = Ciphertext::new(n_square, BigUint::from(1u32));
        assert_eq!(keypair.decrypt(&ciphertext), Err(Error::InvalidCiphertext));
    }

    #[test]
    fn foreign_key_does_not_recover_plaintext() {
        let alice = create_test_keypair(23);
        let bob = create_test_keypair(24);
        let message = BigFraction::from(1234);

        let ciphertext = alice.encrypt(&message).unwrap();
        match bob.decrypt(&ciphertext) {
            Ok(plaintext) => assert_ne!(plaintext, message),
            Err(e) => assert_eq!(e, Error::InvalidCiphertext),
        }
    }

    #[test]
    fn unit_ciphertext_decrypts_to_zero() {
        let keypair = create_test_keypair(25);
        let one = BigUint::from(1u32);
        let ciphertext = Ciphertext::new(one.clone(), one);
        assert_eq!(keypair.decrypt(&ciphertext).unwrap(), BigFraction::from(0));
    }
}
