// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during key handling and cryptographic operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key size: must be {min}..={max} bits in steps of {step}, got {actual}")]
    InvalidKeySize { min: usize, max: usize, step: usize, actual: usize },

    #[error("Plaintext magnitude exceeds maximum encryptable value")]
    PlaintextTooLarge,

    #[error("Ciphertext is invalid or corrupted")]
    InvalidCiphertext,

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Operation requires a private key")]
    MissingPrivateKey,

    /// Malformed key document or unusable builder configuration.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Fraction denominator must be non-zero")]
    InvalidFraction,
}

pub type Result<T> = std::result::Result<T, Error>;
