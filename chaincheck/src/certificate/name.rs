// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Distinguished Names.
//!
//! A [`Name`] keeps the exact DER it was decoded from and compares by those
//! bytes, which is how issuer and subject are matched during path building.
//! The decoded attributes only serve display.

use core::fmt;

use const_oid::ObjectIdentifier;
use der::{Decode, DecodeValue, Encode, ErrorKind, FixedTag, Header, Length, Reader, SliceReader, Tag};

pub const COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// Short labels used when rendering names, in RFC 4514 spelling.
const LABELS: &[(ObjectIdentifier, &str)] = &[
    (COMMON_NAME, "CN"),
    (ObjectIdentifier::new_unwrap("2.5.4.5"), "SERIALNUMBER"),
    (ObjectIdentifier::new_unwrap("2.5.4.6"), "C"),
    (ObjectIdentifier::new_unwrap("2.5.4.7"), "L"),
    (ObjectIdentifier::new_unwrap("2.5.4.8"), "ST"),
    (ObjectIdentifier::new_unwrap("2.5.4.9"), "STREET"),
    (ObjectIdentifier::new_unwrap("2.5.4.10"), "O"),
    (ObjectIdentifier::new_unwrap("2.5.4.11"), "OU"),
    (ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.25"), "DC"),
    (ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.1"), "UID"),
    (ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1"), "emailAddress"),
];

const UTF8_STRING: u8 = 0x0c;
const PRINTABLE_STRING: u8 = 0x13;
const TELETEX_STRING: u8 = 0x14;
const IA5_STRING: u8 = 0x16;
const UNIVERSAL_STRING: u8 = 0x1c;
const BMP_STRING: u8 = 0x1e;

/// One `AttributeTypeAndValue`.
///
/// The value is split by hand rather than through [`der::Tag`], which has no
/// UniversalString.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub oid: ObjectIdentifier,
    tag: u8,
    content: Vec<u8>,
}

impl Attribute {
    /// The value as text, for the directory string types.
    pub fn text(&self) -> Option<String> {
        let content = self.content.as_slice();
        match self.tag {
            UTF8_STRING | PRINTABLE_STRING | IA5_STRING => {
                core::str::from_utf8(content).ok().map(str::to_owned)
            }
            TELETEX_STRING => Some(String::from_utf8_lossy(content).into_owned()),
            BMP_STRING if content.len() % 2 == 0 => {
                let units: Vec<u16> = content
                    .chunks_exact(2)
                    .map(|unit| u16::from_be_bytes([unit[0], unit[1]]))
                    .collect();
                String::from_utf16(&units).ok()
            }
            UNIVERSAL_STRING if content.len() % 4 == 0 => content
                .chunks_exact(4)
                .map(|c| char::from_u32(u32::from_be_bytes([c[0], c[1], c[2], c[3]])))
                .collect(),
            _ => None,
        }
    }

    fn label(&self) -> Option<&'static str> {
        LABELS
            .iter()
            .find(|(oid, _)| *oid == self.oid)
            .map(|(_, label)| *label)
    }
}

impl<'a> DecodeValue<'a> for Attribute {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |inner| {
            let oid = ObjectIdentifier::decode(inner)?;
            let tag = inner.read_byte()?;
            let length = Length::decode(inner)?;
            let content = inner.read_vec(length)?;
            Ok(Self { oid, tag, content })
        })
    }
}

impl FixedTag for Attribute {
    const TAG: Tag = Tag::Sequence;
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label)?,
            None => write!(f, "{}", self.oid)?,
        }
        if let Some(text) = self.text() {
            return write!(f, "={}", text);
        }
        // RFC 4514 hex form of the whole TLV
        write!(f, "=#{:02x}", self.tag)?;
        if let Ok(length) = Length::try_from(self.content.len()).and_then(|l| l.to_der()) {
            for byte in length {
                write!(f, "{:02x}", byte)?;
            }
        }
        for byte in &self.content {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// A Distinguished Name: RDNs in encoded order, each a set of attributes.
#[derive(Debug, Clone)]
pub struct Name {
    der: Vec<u8>,
    rdns: Vec<Vec<Attribute>>,
}

impl Name {
    /// The DER encoding, tag and length included.
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Number of relative distinguished names.
    pub fn len(&self) -> usize {
        self.rdns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }

    /// Every attribute, most general RDN first.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.rdns.iter().flatten()
    }

    pub fn common_name(&self) -> Option<String> {
        self.attributes()
            .find(|attr| attr.oid == COMMON_NAME)
            .and_then(Attribute::text)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for Name {}

impl<'a> DecodeValue<'a> for Name {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let body = reader.read_slice(header.length)?;

        let mut rdns = Vec::new();
        let mut inner = SliceReader::new(body)?;
        while !inner.is_finished() {
            let set = Header::decode(&mut inner)?;
            if set.tag != Tag::Set {
                return Err(ErrorKind::TagUnexpected {
                    expected: Some(Tag::Set),
                    actual: set.tag,
                }
                .into());
            }
            let rdn = inner.read_nested(set.length, |members| {
                let mut rdn = Vec::new();
                while !members.is_finished() {
                    rdn.push(members.decode::<Attribute>()?);
                }
                Ok(rdn)
            })?;
            rdns.push(rdn);
        }

        let mut der = header.to_der()?;
        der.extend_from_slice(body);
        Ok(Self { der, rdns })
    }
}

impl FixedTag for Name {
    const TAG: Tag = Tag::Sequence;
}

/// Most specific RDN first, multi-valued RDNs joined with `+`.
impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, rdn) in self.rdns.iter().rev().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            for (m, attr) in rdn.iter().enumerate() {
                if m > 0 {
                    f.write_str("+")?;
                }
                write!(f, "{}", attr)?;
            }
        }
        Ok(())
    }
}
