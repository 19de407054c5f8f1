// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use chaincheck::{InvalidReason, PathValidator, TrustStore, ValidationOptions, ValidationVerdict};

use crate::common::*;

fn validate(
    leaf: &chaincheck::Certificate,
    store: &TrustStore,
    options: &ValidationOptions,
) -> ValidationVerdict {
    init_logger();
    PathValidator::new().validate(leaf, store, options).unwrap()
}

#[test]
fn test_valid_path() {
    let store = TrustStore::new(vec![root()], vec![intermediate()]);
    let verdict = validate(&leaf(), &store, &options_2030());
    match verdict {
        ValidationVerdict::Valid { path } => assert_eq!(path.len(), 3),
        other => panic!("expected a valid path, got {}", other),
    }
}

#[test]
fn test_no_trust_anchor() {
    let store = TrustStore::new(vec![], vec![intermediate(), root()]);
    assert_eq!(
        validate(&leaf(), &store, &options_2030()),
        ValidationVerdict::Invalid(InvalidReason::NoTrustAnchor)
    );
}

#[test]
fn test_expired_leaf() {
    let store = TrustStore::new(vec![root()], vec![intermediate()]);
    let expired = load_cert("ecp256/expired_leaf.cert.pem");
    match validate(&expired, &store, &options_2030()) {
        ValidationVerdict::Invalid(InvalidReason::Expired { subject, not_after }) => {
            assert_eq!(subject, "CN=expired.chaincheck.test, O=ChainCheck, C=US");
            assert!(not_after < at("2030-01-01"));
        }
        other => panic!("expected Expired, got {}", other),
    }
}

#[test]
fn test_not_yet_valid() {
    let store = TrustStore::new(vec![root()], vec![intermediate()]);
    let options = ValidationOptions::new().at(at("2023-12-31"));
    assert!(matches!(
        validate(&leaf(), &store, &options),
        ValidationVerdict::Invalid(InvalidReason::NotYetValid { .. })
    ));
}

#[test]
fn test_validity_bounds_are_inclusive() {
    let store = TrustStore::new(vec![root()], vec![intermediate()]);
    let first_second = ValidationOptions::new().at(at("2024-01-01T00:00:00Z"));
    assert!(validate(&leaf(), &store, &first_second).is_valid());
    let last_second = ValidationOptions::new().at(at("2124-01-01T00:00:00Z"));
    assert!(validate(&leaf(), &store, &last_second).is_valid());
    let after = ValidationOptions::new().at(at("2124-01-01T00:00:01Z"));
    assert!(!validate(&leaf(), &store, &after).is_valid());
}

#[test]
fn test_rogue_intermediate_is_a_signature_mismatch() {
    let rogue_inter = load_cert("rogue/inter.cert.pem");
    let store = TrustStore::new(vec![root()], vec![rogue_inter.clone()]);
    assert_eq!(
        validate(&leaf(), &store, &options_2030()),
        ValidationVerdict::Invalid(InvalidReason::SignatureMismatch {
            subject: leaf().subject().to_string(),
            issuer: rogue_inter.subject().to_string(),
        })
    );

    // Every same-named candidate is tried
    let store = TrustStore::new(vec![root()], vec![rogue_inter, intermediate()]);
    assert!(validate(&leaf(), &store, &options_2030()).is_valid());
}

#[test]
fn test_four_certificate_path() {
    let store = TrustStore::new(
        vec![root()],
        vec![load_cert("ecp256/issuing.cert.pem"), intermediate()],
    );
    let deep = load_cert("ecp256/deep_leaf.cert.pem");
    match validate(&deep, &store, &options_2030()) {
        ValidationVerdict::Valid { path } => assert_eq!(path.len(), 4),
        other => panic!("expected a valid path, got {}", other),
    }

    let shallow = options_2030().with_max_chain_depth(3);
    assert_eq!(
        validate(&deep, &store, &shallow),
        ValidationVerdict::Invalid(InvalidReason::PathTooLong { max_depth: 3 })
    );
}

#[test]
fn test_missing_link_names_the_issuer() {
    let store = TrustStore::new(vec![root()], vec![intermediate()]);
    let deep = load_cert("ecp256/deep_leaf.cert.pem");
    assert_eq!(
        validate(&deep, &store, &options_2030()),
        ValidationVerdict::Invalid(InvalidReason::NoPathFound {
            issuer: "CN=ChainCheck Test Issuing CA, O=ChainCheck, C=US".to_string()
        })
    );
}

#[test]
fn test_rsa_path() {
    let store = TrustStore::new(
        vec![load_cert("rsa2048/ca.cert.pem")],
        vec![load_cert("rsa2048/inter.cert.pem")],
    );
    assert!(validate(&load_cert("rsa2048/leaf.cert.pem"), &store, &options_2030()).is_valid());
}

#[test]
fn test_intermediate_anchor_shortens_the_path() {
    // Anchoring at the intermediate is enough
    let store = TrustStore::new(vec![intermediate()], vec![]);
    match validate(&leaf(), &store, &options_2030()) {
        ValidationVerdict::Valid { path } => assert_eq!(path.len(), 2),
        other => panic!("expected a valid path, got {}", other),
    }
}

#[test]
fn test_end_entity_issuer_is_rejected() {
    let store = TrustStore::new(vec![root()], vec![intermediate(), leaf()]);
    let sub = load_cert("ecp256/leaf_signed.cert.pem");
    assert_eq!(
        validate(&sub, &store, &options_2030()),
        ValidationVerdict::Invalid(InvalidReason::IssuerNotCa {
            subject: leaf().subject().to_string()
        })
    );
}

#[test]
fn test_path_len_exceeded_with_sound_links() {
    // Every signature in the chain is good; only the pathLen limit is broken
    let chain = chain_of(&[
        "pathlen/leaf.cert.pem",
        "pathlen/b.cert.pem",
        "pathlen/a.cert.pem",
        "pathlen/ca.cert.pem",
    ]);
    assert_eq!(chain.len(), 4);
    assert!(chaincheck::Linker::new().link(&chain).chain_is_sound);

    let presented: Vec<chaincheck::Certificate> = chain.iter().skip(1).cloned().collect();
    let store = chaincheck::TrustSource::Anchors(vec![load_cert("pathlen/ca.cert.pem")])
        .build(&presented)
        .unwrap();
    match validate(chain.leaf().unwrap(), &store, &options_2030()) {
        ValidationVerdict::Invalid(InvalidReason::PathLenExceeded { path_len, .. }) => {
            assert_eq!(path_len, 0)
        }
        other => panic!("expected a pathLen failure, got {}", other),
    }
}
