// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 certificate records.
//!
//! A [`Certificate`] is decoded once and never mutated. Besides the parsed
//! fields it keeps the complete DER and the exact TBSCertificate bytes, so
//! signature checks run over what the issuer actually signed and PEM export
//! reproduces the input byte for byte.
//!
//! # Examples
//!
//! ```no_run
//! use chaincheck::certificate::decode_pem_certificates;
//!
//! # fn example(pem: &[u8]) -> chaincheck::Result<()> {
//! for cert in decode_pem_certificates(pem)? {
//!     println!("{} expires {}", cert.subject(), cert.not_after());
//! }
//! # Ok(())
//! # }
//! ```

pub mod extensions;
pub mod name;
mod pem;

pub use self::pem::{decode_der_certificates, decode_pem_certificates, encode_pem_certificates};
pub(crate) use self::pem::decode_pem_bundle_lenient;

use core::fmt;

use der::asn1::{BitString, IntRef, UintRef};
use der::{Decode, DecodeValue, Encode, FixedTag, Header, Reader, Tag, TagMode, TagNumber};
use spki::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::certificate::extensions::{BasicConstraints, Extensions, KeyUsage, KeyUsageBit};
use crate::certificate::name::Name;
use crate::error::{Error, Result};
use crate::time::{Time, Validity};

/// `version` field of the TBSCertificate; absent means v1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    V1,
    V2,
    #[default]
    V3,
}

impl Version {
    fn from_encoded(bytes: Option<&[u8]>) -> der::Result<Self> {
        match bytes {
            None | Some([0]) => Ok(Version::V1),
            Some([1]) => Ok(Version::V2),
            Some([2]) => Ok(Version::V3),
            Some(_) => Err(der::ErrorKind::Value { tag: Tag::Integer }.into()),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = match self {
            Version::V1 => 1,
            Version::V2 => 2,
            Version::V3 => 3,
        };
        write!(f, "v{}", n)
    }
}

/// The signed portion of a certificate (RFC 5280 4.1.2).
///
/// The issuer and subject unique identifiers are skipped.
#[derive(Debug, Clone)]
pub struct TbsCertificate {
    pub version: Version,
    /// Content octets of `serialNumber`, sign byte included
    pub serial_number: Vec<u8>,
    /// Must agree with the outer `signatureAlgorithm`
    pub signature: AlgorithmIdentifier<der::Any>,
    pub issuer: Name,
    pub validity: Validity,
    pub subject: Name,
    pub subject_public_key_info: SubjectPublicKeyInfo<der::Any, BitString>,
    pub extensions: Option<Extensions>,
}

impl<'a> DecodeValue<'a> for TbsCertificate {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |fields| {
            let version = fields.context_specific::<UintRef<'a>>(TagNumber::N0, TagMode::Explicit)?;
            let version = Version::from_encoded(version.as_ref().map(|v| v.as_bytes()))?;

            // IntRef rather than UintRef: negative serials still occur in the wild
            let serial_number = fields.decode::<IntRef<'a>>()?.as_bytes().to_vec();
            let signature = fields.decode()?;
            let issuer = fields.decode()?;
            let validity = fields.decode()?;
            let subject = fields.decode()?;
            let subject_public_key_info = fields.decode()?;

            for unique_id in [TagNumber::N1, TagNumber::N2] {
                fields.context_specific::<BitString>(unique_id, TagMode::Implicit)?;
            }
            let extensions = fields.context_specific(TagNumber::N3, TagMode::Explicit)?;

            Ok(Self {
                version,
                serial_number,
                signature,
                issuer,
                validity,
                subject,
                subject_public_key_info,
                extensions,
            })
        })
    }
}

impl FixedTag for TbsCertificate {
    const TAG: Tag = Tag::Sequence;
}

/// First pass over the outer SEQUENCE: the TBS is captured undecoded so the
/// signature can be checked over its exact bytes.
struct SignedEnvelope {
    tbs_der: Vec<u8>,
    algorithm: AlgorithmIdentifier<der::Any>,
    signature: BitString,
}

impl<'a> DecodeValue<'a> for SignedEnvelope {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |fields| {
            Ok(Self {
                tbs_der: fields.decode::<der::Any>()?.to_der()?,
                algorithm: fields.decode()?,
                signature: fields.decode()?,
            })
        })
    }
}

impl FixedTag for SignedEnvelope {
    const TAG: Tag = Tag::Sequence;
}

/// A decoded X.509 certificate. Equality compares the full DER.
#[derive(Debug, Clone)]
pub struct Certificate {
    der: Vec<u8>,
    tbs_der: Vec<u8>,
    tbs_certificate: TbsCertificate,
    signature_algorithm: AlgorithmIdentifier<der::Any>,
    signature: BitString,
}

impl Certificate {
    /// Decode one certificate; trailing bytes are an error.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let envelope = SignedEnvelope::from_der(bytes)?;
        let tbs_certificate = TbsCertificate::from_der(&envelope.tbs_der)?;

        if envelope.algorithm.oid != tbs_certificate.signature.oid {
            return Err(Error::MalformedCertificate(format!(
                "signatureAlgorithm {} differs from TBSCertificate signature {}",
                envelope.algorithm.oid, tbs_certificate.signature.oid
            )));
        }

        Ok(Self {
            der: bytes.to_vec(),
            tbs_der: envelope.tbs_der,
            tbs_certificate,
            signature_algorithm: envelope.algorithm,
            signature: envelope.signature,
        })
    }

    pub fn to_der(&self) -> &[u8] {
        &self.der
    }

    /// One `CERTIFICATE` block, 64-column base64, LF line endings.
    pub fn to_pem(&self) -> Result<String> {
        Ok(pem_rfc7468::encode_string(
            "CERTIFICATE",
            pem_rfc7468::LineEnding::LF,
            &self.der,
        )?)
    }

    /// The exact TBSCertificate bytes covered by the signature.
    pub fn tbs_der(&self) -> &[u8] {
        &self.tbs_der
    }

    pub fn tbs_certificate(&self) -> &TbsCertificate {
        &self.tbs_certificate
    }

    /// Signature value without the BIT STRING's unused-bits octet.
    pub fn signature_bytes(&self) -> &[u8] {
        self.signature.raw_bytes()
    }

    pub fn signature_algorithm(&self) -> &AlgorithmIdentifier<der::Any> {
        &self.signature_algorithm
    }

    pub fn subject(&self) -> &Name {
        &self.tbs_certificate.subject
    }

    pub fn issuer(&self) -> &Name {
        &self.tbs_certificate.issuer
    }

    pub fn serial_number(&self) -> &[u8] {
        &self.tbs_certificate.serial_number
    }

    pub fn validity(&self) -> &Validity {
        &self.tbs_certificate.validity
    }

    /// The expiry instant reported for every chain position.
    pub fn not_after(&self) -> Time {
        self.tbs_certificate.validity.not_after
    }

    pub fn version(&self) -> Version {
        self.tbs_certificate.version
    }

    pub fn extensions(&self) -> Option<&Extensions> {
        self.tbs_certificate.extensions.as_ref()
    }

    pub fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo<der::Any, BitString> {
        &self.tbs_certificate.subject_public_key_info
    }

    pub fn basic_constraints(&self) -> Option<BasicConstraints> {
        self.extensions()?.basic_constraints()
    }

    pub fn key_usage(&self) -> Option<KeyUsage> {
        self.extensions()?.key_usage()
    }

    /// Basic Constraints asserts cA.
    pub fn is_ca(&self) -> bool {
        self.basic_constraints().is_some_and(|bc| bc.ca)
    }

    /// A CA whose Key Usage, when present, includes keyCertSign.
    pub fn can_sign_certificates(&self) -> bool {
        self.is_ca()
            && self
                .key_usage()
                .map_or(true, |ku| ku.contains(KeyUsageBit::KeyCertSign))
    }

    /// Issuer and subject encode identically.
    pub fn is_self_issued(&self) -> bool {
        self.issuer() == self.subject()
    }
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for Certificate {}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validity = self.validity();
        writeln!(f, "Subject: {}", self.subject())?;
        writeln!(f, "Issuer: {}", self.issuer())?;
        writeln!(f, "Version: {}", self.version())?;
        write!(f, "Serial: ")?;
        for byte in self.serial_number() {
            write!(f, "{:02x}", byte)?;
        }
        writeln!(f)?;
        writeln!(f, "Signature algorithm: {}", self.signature_algorithm.oid)?;
        writeln!(f, "Valid: {} to {}", validity.not_before, validity.not_after)?;
        write!(f, "CA: {}", self.is_ca())
    }
}
