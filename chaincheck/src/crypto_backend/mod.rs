// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Signature checks between two certificates.
//!
//! The linker and the path validator both reduce "did `issuer` sign `child`"
//! to [`verify_issued_by`]. It resolves a [`SignatureAlgorithm`] from the
//! child's signature identifier and the issuer's key, then hands raw bytes to
//! a [`CryptoBackend`].

use const_oid::ObjectIdentifier as Oid;
use der::{Any, Reader, SliceReader, TagMode, TagNumber};
use spki::AlgorithmIdentifier;

use crate::certificate::Certificate;
use crate::error::{Error, Result};

#[cfg(feature = "ring-backend")]
mod ring;
#[cfg(feature = "ring-backend")]
pub use self::ring::*;

/// id-ecPublicKey
pub const EC_PUBLIC_KEY: Oid = Oid::new_unwrap("1.2.840.10045.2.1");

const ECDSA_WITH_SHA256: Oid = Oid::new_unwrap("1.2.840.10045.4.3.2");
const ECDSA_WITH_SHA384: Oid = Oid::new_unwrap("1.2.840.10045.4.3.3");
const SHA256_WITH_RSA: Oid = Oid::new_unwrap("1.2.840.113549.1.1.11");
const SHA384_WITH_RSA: Oid = Oid::new_unwrap("1.2.840.113549.1.1.12");
const SHA512_WITH_RSA: Oid = Oid::new_unwrap("1.2.840.113549.1.1.13");
const RSASSA_PSS: Oid = Oid::new_unwrap("1.2.840.113549.1.1.10");
const ED25519: Oid = Oid::new_unwrap("1.3.101.112");

const SECP256R1: Oid = Oid::new_unwrap("1.2.840.10045.3.1.7");
const SECP384R1: Oid = Oid::new_unwrap("1.3.132.0.34");

const SHA256: Oid = Oid::new_unwrap("2.16.840.1.101.3.4.2.1");
const SHA384: Oid = Oid::new_unwrap("2.16.840.1.101.3.4.2.2");
const SHA512: Oid = Oid::new_unwrap("2.16.840.1.101.3.4.2.3");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hash {
    Sha256,
    Sha384,
    Sha512,
}

impl Hash {
    fn from_oid(oid: Oid) -> Option<Self> {
        match oid {
            SHA256 => Some(Hash::Sha256),
            SHA384 => Some(Hash::Sha384),
            SHA512 => Some(Hash::Sha512),
            _ => None,
        }
    }
}

/// Named curve of the issuer's EC key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    P256,
    P384,
}

/// Signature schemes the engine can check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// ECDSA over the issuer key's curve; the hash comes from the signature OID
    Ecdsa(Curve, Hash),
    RsaPkcs1(Hash),
    RsaPss(Hash),
    Ed25519,
}

impl SignatureAlgorithm {
    /// Resolve from the child's signature identifier and the issuer key's
    /// algorithm identifier.
    pub fn resolve(
        signature: &AlgorithmIdentifier<Any>,
        issuer_key: &AlgorithmIdentifier<Any>,
    ) -> Result<Self> {
        match signature.oid {
            ECDSA_WITH_SHA256 => Ok(SignatureAlgorithm::Ecdsa(curve_of(issuer_key)?, Hash::Sha256)),
            ECDSA_WITH_SHA384 => Ok(SignatureAlgorithm::Ecdsa(curve_of(issuer_key)?, Hash::Sha384)),
            SHA256_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1(Hash::Sha256)),
            SHA384_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1(Hash::Sha384)),
            SHA512_WITH_RSA => Ok(SignatureAlgorithm::RsaPkcs1(Hash::Sha512)),
            RSASSA_PSS => pss_hash(signature.parameters.as_ref()).map(SignatureAlgorithm::RsaPss),
            ED25519 => Ok(SignatureAlgorithm::Ed25519),
            other => Err(Error::unsupported_algorithm(format!("signature OID {}", other))),
        }
    }

    /// The algorithm `child` was signed with, checked against `issuer`'s key.
    pub fn for_certificates(child: &Certificate, issuer: &Certificate) -> Result<Self> {
        Self::resolve(
            child.signature_algorithm(),
            &issuer.subject_public_key_info().algorithm,
        )
    }
}

fn curve_of(key: &AlgorithmIdentifier<Any>) -> Result<Curve> {
    if key.oid != EC_PUBLIC_KEY {
        return Err(Error::unsupported_algorithm(format!(
            "ECDSA signature with a {} key",
            key.oid
        )));
    }
    let curve = key
        .parameters
        .as_ref()
        .and_then(|params| params.decode_as::<Oid>().ok());
    match curve {
        Some(SECP256R1) => Ok(Curve::P256),
        Some(SECP384R1) => Ok(Curve::P384),
        Some(other) => Err(Error::unsupported_algorithm(format!("curve {}", other))),
        None => Err(Error::unsupported_algorithm("EC key without a named curve")),
    }
}

/// Hash of `RSASSA-PSS-params`. SHA-1, the DER default, is refused.
fn pss_hash(params: Option<&Any>) -> Result<Hash> {
    let sha1_default = || Error::unsupported_algorithm("RSASSA-PSS with the SHA-1 default");
    let params = params.ok_or_else(sha1_default)?;

    let mut reader = SliceReader::new(params.value())?;
    let hash = reader
        .context_specific::<AlgorithmIdentifier<Any>>(TagNumber::N0, TagMode::Explicit)?
        .ok_or_else(sha1_default)?;
    Hash::from_oid(hash.oid)
        .ok_or_else(|| Error::unsupported_algorithm(format!("RSASSA-PSS hash {}", hash.oid)))
}

/// Verifies one signature with raw subjectPublicKey bytes.
pub trait CryptoBackend {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()>;
}

impl<B: CryptoBackend + ?Sized> CryptoBackend for &B {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        (**self).verify_signature(algorithm, message, signature, public_key)
    }
}

/// Check that `child` carries a valid signature made with `issuer`'s key.
///
/// Names are not compared.
pub fn verify_issued_by<B: CryptoBackend + ?Sized>(
    backend: &B,
    child: &Certificate,
    issuer: &Certificate,
) -> Result<()> {
    let algorithm = SignatureAlgorithm::for_certificates(child, issuer).map_err(|e| {
        log::warn!("cannot check {} against {}: {}", child.subject(), issuer.subject(), e);
        e
    })?;

    log::trace!(
        "verifying {} with the key of {} ({:?})",
        child.subject(),
        issuer.subject(),
        algorithm
    );
    backend.verify_signature(
        algorithm,
        child.tbs_der(),
        child.signature_bytes(),
        issuer.subject_public_key_info().subject_public_key.raw_bytes(),
    )
}
