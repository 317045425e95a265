// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Paillier Cryptosystem over Signed Fractions
//!
//! Probabilistic public-key encryption with additive homomorphism, based on
//! the decisional composite residuosity assumption modulo n².
//!
//! Reference: [Paillier (1999), EUROCRYPT](https://link.springer.com/chapter/10.1007/3-540-48910-X_16)
//!
//! Plaintexts are arbitrary-precision fractions, scaled to a fixed number
//! of decimal places and wrapped into a signed range. Every ciphertext is a
//! pair `(E(m), E(-m))` sharing one randomizer, so ciphertexts can be
//! added, subtracted, shifted by a known fraction and scaled by a known
//! integer without access to the private key.
//!
//! ## Security
//!
//! Key sizes are restricted to 384..=1088 bits. The private key
//! `(lambda, mu)` is zeroized on drop via the `zeroize` crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use paillier_ext::{BigFraction, Paillier};
//!
//! let paillier = Paillier::new(512).expect("key generation failed");
//!
//! let a = paillier.encrypt_data(&"12.5".parse().unwrap()).unwrap();
//! let b = paillier.encrypt_data(&BigFraction::from(-20)).unwrap();
//! let sum = paillier.add(&a, &b).unwrap();
//!
//! assert_eq!(paillier.decrypt_data(&sum).unwrap(), "-7.5".parse::<BigFraction>().unwrap());
//! ```

mod ciphertext;
mod crypto;
mod encoding;
mod error;
mod fraction;
mod keypair;
mod paillier;
mod params;

pub mod homomorphism;

pub use ciphertext::*;
pub use crypto::*;
pub use error::*;
pub use fraction::*;
pub use keypair::*;
pub use paillier::*;
pub use params::*;
