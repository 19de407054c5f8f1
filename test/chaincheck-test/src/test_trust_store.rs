// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use chaincheck::{PathValidator, TrustSource, TrustStore};

use crate::common::*;

#[test]
fn test_one_ca_two_leaves() {
    let certs = vec![leaf(), root(), load_cert("ecp256/deep_leaf.cert.pem")];
    let store = TrustStore::from_chain(&certs);
    assert_eq!(store.roots().len(), 1);
    assert_eq!(store.intermediates().len(), 2);
    assert_eq!(store.roots()[0], root());
}

#[test]
fn test_no_ca_means_no_roots() {
    let store = TrustStore::from_chain(&[leaf(), load_cert("ecp256/deep_leaf.cert.pem")]);
    assert!(store.roots().is_empty());
}

#[test]
fn test_self_supplied_matches_partition() {
    let certs = load_pem("ecp256/bundle.pem");
    let store = TrustSource::SelfSupplied.build(&certs).unwrap();
    // Both CA certificates become anchors
    assert_eq!(store.roots().len(), 2);
    assert_eq!(store.intermediates(), &[leaf()]);
}

#[test]
fn test_anchor_source_without_root_in_chain() {
    init_logger();
    // The presented chain stops at the intermediate
    let presented = vec![intermediate()];
    let store = TrustSource::Anchors(vec![root()]).build(&presented).unwrap();
    assert_eq!(store.roots(), &[root()]);
    assert_eq!(store.intermediates(), &[intermediate()]);

    let verdict = PathValidator::new()
        .validate(&leaf(), &store, &options_2030())
        .unwrap();
    assert!(verdict.is_valid(), "{}", verdict);
}

#[test]
fn test_anchor_from_a_different_hierarchy() {
    let store = TrustSource::Anchors(vec![load_cert("rsa2048/ca.cert.pem")])
        .build(&[intermediate(), root()])
        .unwrap();
    let verdict = PathValidator::new()
        .validate(&leaf(), &store, &options_2030())
        .unwrap();
    assert!(!verdict.is_valid());
}
