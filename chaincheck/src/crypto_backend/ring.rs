// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Signature verification with ring.

use super::{CryptoBackend, Curve, Hash, SignatureAlgorithm};
use crate::error::{Error, Result};
use ring::signature::{self, UnparsedPublicKey};

/// [`CryptoBackend`] over ring's `UnparsedPublicKey`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingBackend;

impl CryptoBackend for RingBackend {
    fn verify_signature(
        &self,
        algorithm: SignatureAlgorithm,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        let algo: &dyn signature::VerificationAlgorithm = match algorithm {
            SignatureAlgorithm::Ecdsa(Curve::P256, Hash::Sha256) => &signature::ECDSA_P256_SHA256_ASN1,
            SignatureAlgorithm::Ecdsa(Curve::P256, Hash::Sha384) => &signature::ECDSA_P256_SHA384_ASN1,
            SignatureAlgorithm::Ecdsa(Curve::P384, Hash::Sha256) => &signature::ECDSA_P384_SHA256_ASN1,
            SignatureAlgorithm::Ecdsa(Curve::P384, Hash::Sha384) => &signature::ECDSA_P384_SHA384_ASN1,
            SignatureAlgorithm::Ecdsa(_, Hash::Sha512) => {
                return Err(Error::unsupported_algorithm("ECDSA with SHA-512"))
            }
            SignatureAlgorithm::RsaPkcs1(Hash::Sha256) => &signature::RSA_PKCS1_2048_8192_SHA256,
            SignatureAlgorithm::RsaPkcs1(Hash::Sha384) => &signature::RSA_PKCS1_2048_8192_SHA384,
            SignatureAlgorithm::RsaPkcs1(Hash::Sha512) => &signature::RSA_PKCS1_2048_8192_SHA512,
            SignatureAlgorithm::RsaPss(Hash::Sha256) => &signature::RSA_PSS_2048_8192_SHA256,
            SignatureAlgorithm::RsaPss(Hash::Sha384) => &signature::RSA_PSS_2048_8192_SHA384,
            SignatureAlgorithm::RsaPss(Hash::Sha512) => &signature::RSA_PSS_2048_8192_SHA512,
            SignatureAlgorithm::Ed25519 => &signature::ED25519,
        };

        UnparsedPublicKey::new(algo, public_key)
            .verify(message, signature)
            .map_err(|_| {
                log::debug!("{:?} signature does not verify", algorithm);
                Error::signature_mismatch()
            })
    }
}
