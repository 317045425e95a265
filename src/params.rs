// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Export and import of key parameters as an XML document.
//!
//! ```xml
//! <PaillierKeyValue>
//!   <N>..</N><G>..</G>
//!   <MaxPlaintextBits>128</MaxPlaintextBits>
//!   <PlaintextDecPlace>12</PlaintextDecPlace>
//!   <Lambda>..</Lambda><Mu>..</Mu>
//! </PaillierKeyValue>
//! ```
//!
//! Big integers are base64 of their unsigned big-endian bytes. `Lambda` and
//! `Mu` appear only in private exports.

use std::fmt;
use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose};
use num_bigint_dig::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::keypair::defaults::{DEFAULT_MAX_PLAINTEXT_BITS, DEFAULT_PLAINTEXT_DEC_PLACE};
use crate::keypair::{PrivateKey, PublicKey};

/// Serialized view of a key.
///
/// Private components are `None` for a public-only export.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyParameters {
    #[zeroize(skip)]
    pub n: BigUint,
    #[zeroize(skip)]
    pub g: BigUint,
    pub max_plaintext_bits: usize,
    pub plaintext_dec_place: usize,
    pub lambda: Option<BigUint>,
    pub mu: Option<BigUint>,
}

/// Wire shape of the XML document.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "PaillierKeyValue")]
struct KeyValueXml {
    #[serde(rename = "N", skip_serializing_if = "Option::is_none")]
    n: Option<String>,
    #[serde(rename = "G", skip_serializing_if = "Option::is_none")]
    g: Option<String>,
    #[serde(rename = "MaxPlaintextBits", skip_serializing_if = "Option::is_none")]
    max_plaintext_bits: Option<usize>,
    #[serde(rename = "PlaintextDecPlace", skip_serializing_if = "Option::is_none")]
    plaintext_dec_place: Option<usize>,
    #[serde(rename = "Lambda", skip_serializing_if = "Option::is_none")]
    lambda: Option<String>,
    #[serde(rename = "Mu", skip_serializing_if = "Option::is_none")]
    mu: Option<String>,
}

impl KeyParameters {
    /// Public-only parameters.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self {
            n: public_key.n().clone(),
            g: public_key.g().clone(),
            max_plaintext_bits: public_key.max_plaintext_bits(),
            plaintext_dec_place: public_key.plaintext_dec_place(),
            lambda: None,
            mu: None,
        }
    }

    /// Parameters including `lambda` and `mu`.
    pub fn from_private_key(private_key: &PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            n: public_key.n().clone(),
            g: public_key.g().clone(),
            max_plaintext_bits: public_key.max_plaintext_bits(),
            plaintext_dec_place: public_key.plaintext_dec_place(),
            lambda: Some(private_key.lambda().clone()),
            mu: Some(private_key.mu().clone()),
        }
    }

    pub fn has_private_key(&self) -> bool {
        self.lambda.is_some() && self.mu.is_some()
    }

    /// Drop the private components.
    pub fn public_only(&self) -> Self {
        Self {
            n: self.n.clone(),
            g: self.g.clone(),
            max_plaintext_bits: self.max_plaintext_bits,
            plaintext_dec_place: self.plaintext_dec_place,
            lambda: None,
            mu: None,
        }
    }

    /// Rebuild the public key, validating every derived constraint.
    pub fn to_public_key(&self) -> Result<PublicKey> {
        PublicKey::new(
            self.n.clone(),
            self.g.clone(),
            self.max_plaintext_bits,
            self.plaintext_dec_place,
        )
    }

    /// Rebuild the private key, or `None` for public-only parameters.
    ///
    /// Exactly one of `lambda` and `mu` being present is an error.
    pub fn to_private_key(&self) -> Result<Option<PrivateKey>> {
        match (&self.lambda, &self.mu) {
            (Some(lambda), Some(mu)) => {
                let public_key = self.to_public_key()?;
                PrivateKey::new(public_key, lambda.clone(), mu.clone()).map(Some)
            }
            (None, None) => Ok(None),
            _ => Err(Error::InvalidParameters("Lambda and Mu must be given together".into())),
        }
    }

    /// Serialize to the `PaillierKeyValue` XML document.
    pub fn to_xml(&self) -> Result<String> {
        let doc = KeyValueXml {
            n: Some(encode_big(&self.n)),
            g: Some(encode_big(&self.g)),
            max_plaintext_bits: Some(self.max_plaintext_bits),
            plaintext_dec_place: Some(self.plaintext_dec_place),
            lambda: self.lambda.as_ref().map(encode_big),
            mu: self.mu.as_ref().map(encode_big),
        };

        quick_xml::se::to_string(&doc).map_err(|e| Error::InvalidParameters(e.to_string()))
    }

    /// Parse a `PaillierKeyValue` XML document.
    ///
    /// `N` and `G` are required. Absent plaintext settings fall back to the
    /// crate defaults. The result is not validated against a key; use
    /// [`to_public_key`](Self::to_public_key) for that.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let doc: KeyValueXml =
            quick_xml::de::from_str(xml).map_err(|e| Error::InvalidParameters(e.to_string()))?;

        let n = doc.n.as_deref().ok_or_else(|| missing("N")).and_then(decode_big)?;
        let g = doc.g.as_deref().ok_or_else(|| missing("G")).and_then(decode_big)?;
        let lambda = doc.lambda.as_deref().map(decode_big).transpose()?;
        let mu = doc.mu.as_deref().map(decode_big).transpose()?;

        Ok(Self {
            n,
            g,
            max_plaintext_bits: doc.max_plaintext_bits.unwrap_or(DEFAULT_MAX_PLAINTEXT_BITS),
            plaintext_dec_place: doc.plaintext_dec_place.unwrap_or(DEFAULT_PLAINTEXT_DEC_PLACE),
            lambda,
            mu,
        })
    }
}

impl FromStr for KeyParameters {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_xml(s)
    }
}

impl fmt::Debug for KeyParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyParameters")
            .field("n", &self.n)
            .field("g", &self.g)
            .field("max_plaintext_bits", &self.max_plaintext_bits)
            .field("plaintext_dec_place", &self.plaintext_dec_place)
            .field("has_private_key", &self.has_private_key())
            .finish()
    }
}

fn missing(element: &str) -> Error {
    Error::InvalidParameters(format!("missing <{element}> element"))
}

fn encode_big(value: &BigUint) -> String {
    general_purpose::STANDARD.encode(value.to_bytes_be())
}

fn decode_big(text: &str) -> Result<BigUint> {
    let bytes = general_purpose::STANDARD
        .decode(text.trim())
        .map_err(|e| Error::InvalidParameters(e.to_string()))?;
    Ok(BigUint::from_bytes_be(&bytes))
}
