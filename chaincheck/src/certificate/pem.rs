// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! PEM and DER list decoding for certificates.

use base64ct::{Base64, Encoding};

use crate::certificate::Certificate;
use crate::error::{PemError, Result};

const BEGIN: &[u8] = b"-----BEGIN ";
const END: &[u8] = b"-----END ";
const DASHES: &[u8] = b"-----";
const CERTIFICATE_LABEL: &[u8] = b"CERTIFICATE";

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Iterator over the `CERTIFICATE` blocks of a PEM buffer.
///
/// Yields the body of each block, between its BEGIN line and its END
/// boundary. Blocks with other labels are skipped; text outside blocks is
/// ignored.
struct CertificateBlocks<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for CertificateBlocks<'a> {
    type Item = Result<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = find(self.rest, BEGIN)?;
            let block = &self.rest[start..];

            let label_len = match find(&block[BEGIN.len()..], DASHES) {
                Some(len) => len,
                None => {
                    self.rest = &[];
                    return Some(Err(PemError::Framing("BEGIN boundary is not closed".into()).into()));
                }
            };
            let label = &block[BEGIN.len()..BEGIN.len() + label_len];
            let body_start = BEGIN.len() + label_len + DASHES.len();
            let is_certificate = label == CERTIFICATE_LABEL;

            let end_boundary = [END, label, DASHES].concat();
            let end = match find(&block[body_start..], &end_boundary) {
                Some(end) => body_start + end,
                None if is_certificate => {
                    self.rest = &[];
                    return Some(Err(PemError::Unterminated(
                        String::from_utf8_lossy(label).into_owned(),
                    )
                    .into()));
                }
                None => {
                    log::warn!(
                        "skipping PEM block labelled {} with no END boundary",
                        String::from_utf8_lossy(label)
                    );
                    self.rest = &block[body_start..];
                    continue;
                }
            };
            self.rest = &block[end + end_boundary.len()..];

            if is_certificate {
                return Some(Ok(&block[body_start..end]));
            }
            log::warn!(
                "skipping PEM block labelled {}",
                String::from_utf8_lossy(label)
            );
        }
    }
}

/// Base64-decode a block body. Line width is not checked, and
/// RFC 1421 header lines (`Name: value`) are ignored.
fn decode_block(body: &[u8]) -> Result<Certificate> {
    let text = core::str::from_utf8(body)
        .map_err(|_| PemError::Framing("PEM body is not ASCII".into()))?;
    let base64: String = text
        .lines()
        .filter(|line| !line.contains(':'))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let der = Base64::decode_vec(&base64)
        .map_err(|e| PemError::Framing(format!("PEM Base64 error: {}", e)))?;
    Certificate::from_der(&der)
}

/// Decode every `CERTIFICATE` block in `input`, in order.
///
/// Text between blocks is ignored and blocks with any other label are
/// skipped. A certificate block that does not decode fails the whole call.
pub fn decode_pem_certificates(input: &[u8]) -> Result<Vec<Certificate>> {
    let certificates = CertificateBlocks { rest: input }
        .map(|block| block.and_then(decode_block))
        .collect::<Result<Vec<_>>>()?;
    log::trace!("decoded {} certificates from PEM", certificates.len());
    Ok(certificates)
}

/// Decode the `CERTIFICATE` blocks of a CA bundle, dropping the ones that
/// fail to decode. Returns the certificates and the number dropped.
pub(crate) fn decode_pem_bundle_lenient(input: &[u8]) -> (Vec<Certificate>, usize) {
    let mut certificates = Vec::new();
    let mut dropped = 0;
    let blocks = CertificateBlocks { rest: input };
    for block in blocks {
        match block.and_then(decode_block) {
            Ok(certificate) => certificates.push(certificate),
            Err(e) => {
                log::debug!("dropping bundle entry: {}", e);
                dropped += 1;
            }
        }
    }
    (certificates, dropped)
}

/// Decode a list of DER certificates, such as a TLS peer certificate list.
pub fn decode_der_certificates<T: AsRef<[u8]>>(ders: &[T]) -> Result<Vec<Certificate>> {
    ders.iter()
        .map(|der| Certificate::from_der(der.as_ref()))
        .collect()
}

/// Concatenate the PEM encodings of `certificates`.
pub fn encode_pem_certificates(certificates: &[Certificate]) -> Result<String> {
    let mut out = String::new();
    for certificate in certificates {
        out.push_str(&certificate.to_pem()?);
    }
    Ok(out)
}
