// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use chaincheck::decode_pem_certificates;

use crate::common::*;

fn subjects(relative: &str) -> Vec<String> {
    load_pem(relative)
        .iter()
        .map(|c| c.subject().common_name().unwrap_or_default())
        .collect()
}

#[test]
fn test_n_blocks_in_file_order() {
    init_logger();
    assert_eq!(
        subjects("ecp256/deep_chain.pem"),
        vec![
            "ChainCheck Test Issuing CA",
            "ChainCheck Test Intermediate CA",
            "ChainCheck Test Root CA",
        ]
    );
    assert_eq!(load_pem("rsa2048/bundle.pem").len(), 3);
}

#[test]
fn test_zero_blocks() {
    assert!(decode_pem_certificates(b"").unwrap().is_empty());
    assert!(decode_pem_certificates(b"\n\n# nothing here\n").unwrap().is_empty());
}

#[test]
fn test_mixed_file_keeps_only_certificates() {
    init_logger();
    assert_eq!(
        subjects("ecp256/mixed.pem"),
        vec!["leaf.chaincheck.test", "ChainCheck Test Intermediate CA"]
    );
}

#[test]
fn test_decoding_is_idempotent() {
    let bytes = read_fixture("ecp256/bundle.pem");
    let first = decode_pem_certificates(&bytes).unwrap();
    let second = decode_pem_certificates(&bytes).unwrap();
    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.tbs_der(), b.tbs_der());
        assert_eq!(a.subject(), b.subject());
        assert_eq!(a.validity(), b.validity());
    }
}

#[test]
fn test_corrupt_block_discards_everything() {
    let mut bytes = read_fixture("ecp256/bundle.pem");
    // Flip a byte inside the second certificate's base64 body
    let text = String::from_utf8(bytes.clone()).unwrap();
    let second = text.match_indices("-----BEGIN CERTIFICATE-----").nth(1).unwrap().0;
    let target = second + "-----BEGIN CERTIFICATE-----\n".len() + 4;
    bytes[target] = if bytes[target] == b'A' { b'B' } else { b'A' };

    assert!(decode_pem_certificates(&bytes).is_err());
}

#[test]
fn test_certificate_fields() {
    let leaf = leaf();
    assert_eq!(leaf.subject().to_string(), "CN=leaf.chaincheck.test, O=ChainCheck, C=US");
    assert_eq!(leaf.issuer(), intermediate().subject());
    assert!(!leaf.is_ca());
    assert!(intermediate().is_ca());
    assert!(root().is_self_issued());
    assert_eq!(leaf.validity().not_before, at("2024-01-01"));
    assert_eq!(leaf.not_after(), at("2124-01-01"));
}
