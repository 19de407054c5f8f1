// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 v3 extensions consulted during trust decisions.
//!
//! Basic Constraints decides whether a certificate is a CA, which is what
//! makes it a root candidate in a self-supplied store. Key Usage then limits
//! which CA keys may sign certificates. Every other extension is kept as raw
//! bytes and ignored.

use const_oid::ObjectIdentifier;
use der::asn1::{BitString, OctetString};
use der::{Decode, DecodeValue, FixedTag, Header, Reader, Sequence, Tag};

/// id-ce-basicConstraints
pub const BASIC_CONSTRAINTS: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.19");

/// id-ce-keyUsage
pub const KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.15");

/// One `Extension` SEQUENCE from the TBSCertificate.
#[derive(Debug, Clone, PartialEq, Eq, Sequence)]
pub struct Extension {
    pub oid: ObjectIdentifier,
    #[asn1(default = "Default::default")]
    pub critical: bool,
    pub value: OctetString,
}

impl Extension {
    /// The DER payload wrapped by `extnValue`.
    pub fn payload(&self) -> &[u8] {
        self.value.as_bytes()
    }
}

/// The `[3] EXPLICIT Extensions` list, in certificate order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extensions(Vec<Extension>);

impl Extensions {
    pub fn iter(&self) -> core::slice::Iter<'_, Extension> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First extension with `oid`.
    pub fn get(&self, oid: ObjectIdentifier) -> Option<&Extension> {
        self.0.iter().find(|ext| ext.oid == oid)
    }

    /// Basic Constraints, or `None` when absent or undecodable.
    pub fn basic_constraints(&self) -> Option<BasicConstraints> {
        self.decode_payload(BASIC_CONSTRAINTS)
    }

    /// Key Usage, or `None` when absent or undecodable.
    pub fn key_usage(&self) -> Option<KeyUsage> {
        let ext = self.get(KEY_USAGE)?;
        match BitString::from_der(ext.payload()) {
            Ok(bits) => Some(KeyUsage::from_bit_string(&bits)),
            Err(e) => {
                log::warn!("ignoring malformed key usage: {}", e);
                None
            }
        }
    }

    fn decode_payload<'a, T: Decode<'a>>(&'a self, oid: ObjectIdentifier) -> Option<T> {
        let ext = self.get(oid)?;
        T::from_der(ext.payload())
            .map_err(|e| log::warn!("ignoring malformed extension {}: {}", oid, e))
            .ok()
    }
}

impl<'a> IntoIterator for &'a Extensions {
    type Item = &'a Extension;
    type IntoIter = core::slice::Iter<'a, Extension>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> DecodeValue<'a> for Extensions {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |inner| {
            let mut list = Vec::new();
            while !inner.is_finished() {
                list.push(inner.decode()?);
            }
            Ok(Extensions(list))
        })
    }
}

impl FixedTag for Extensions {
    const TAG: Tag = Tag::Sequence;
}

/// `BasicConstraints ::= SEQUENCE { cA BOOLEAN DEFAULT FALSE, pathLenConstraint INTEGER OPTIONAL }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Sequence)]
pub struct BasicConstraints {
    #[asn1(default = "Default::default")]
    pub ca: bool,
    #[asn1(optional = "true")]
    pub path_len_constraint: Option<u32>,
}

/// Named bits of the Key Usage BIT STRING.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyUsageBit {
    DigitalSignature = 0,
    NonRepudiation = 1,
    KeyEncipherment = 2,
    DataEncipherment = 3,
    KeyAgreement = 4,
    KeyCertSign = 5,
    CrlSign = 6,
    EncipherOnly = 7,
    DecipherOnly = 8,
}

/// Asserted Key Usage bits; bit N of the BIT STRING is bit N here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyUsage(u16);

impl KeyUsage {
    fn from_bit_string(bits: &BitString) -> Self {
        let mut mask = 0u16;
        for (n, set) in bits.bits().take(9).enumerate() {
            if set {
                mask |= 1 << n;
            }
        }
        KeyUsage(mask)
    }

    pub fn contains(&self, bit: KeyUsageBit) -> bool {
        self.0 & (1 << bit as u8) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::Encode;

    fn extensions_with(oid: ObjectIdentifier, payload: &[u8]) -> Extensions {
        Extensions(vec![Extension {
            oid,
            critical: true,
            value: OctetString::new(payload.to_vec()).unwrap(),
        }])
    }

    #[test]
    fn test_basic_constraints_ca_with_path_length() {
        // SEQUENCE { BOOLEAN TRUE, INTEGER 1 }
        let exts = extensions_with(BASIC_CONSTRAINTS, &[0x30, 0x06, 0x01, 0x01, 0xff, 0x02, 0x01, 0x01]);
        let bc = exts.basic_constraints().unwrap();
        assert!(bc.ca);
        assert_eq!(bc.path_len_constraint, Some(1));
    }

    #[test]
    fn test_empty_basic_constraints_is_end_entity() {
        let exts = extensions_with(BASIC_CONSTRAINTS, &[0x30, 0x00]);
        assert_eq!(exts.basic_constraints(), Some(BasicConstraints::default()));
    }

    #[test]
    fn test_malformed_payload_is_ignored() {
        let exts = extensions_with(BASIC_CONSTRAINTS, &[0x04, 0x00]);
        assert_eq!(exts.basic_constraints(), None);
        assert_eq!(exts.key_usage(), None);
    }

    #[test]
    fn test_key_usage_cert_sign() {
        // one unused bit, keyCertSign | cRLSign
        let exts = extensions_with(KEY_USAGE, &[0x03, 0x02, 0x01, 0x06]);
        let ku = exts.key_usage().unwrap();
        assert!(ku.contains(KeyUsageBit::KeyCertSign));
        assert!(ku.contains(KeyUsageBit::CrlSign));
        assert!(!ku.contains(KeyUsageBit::DigitalSignature));
    }

    #[test]
    fn test_key_usage_decipher_only_spills_into_second_byte() {
        let bits = BitString::new(7, vec![0x80, 0x80]).unwrap();
        let exts = extensions_with(KEY_USAGE, &bits.to_der().unwrap());
        let ku = exts.key_usage().unwrap();
        assert!(ku.contains(KeyUsageBit::DigitalSignature));
        assert!(ku.contains(KeyUsageBit::DecipherOnly));
        assert!(!ku.contains(KeyUsageBit::KeyCertSign));
    }
}
