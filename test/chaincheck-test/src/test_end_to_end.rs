// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! The decode, link, trust and validate pipeline as the CLI drives it.

use chaincheck::{
    decode_pem_certificates, render_json, render_text, Chain, Linker, PathValidator, Report,
    TrustSource, TrustStore,
};

use crate::common::*;

#[test]
fn test_leaf_intermediate_root() {
    init_logger();
    let chain = chain_of(&["ecp256/leaf.cert.pem", "ecp256/inter.cert.pem", "ecp256/ca.cert.pem"]);

    let links = Linker::new().link(&chain);
    assert_eq!(links.links.len(), 2);
    assert!(links.links.iter().all(|l| l.signed_correctly));

    let store = TrustStore::new(vec![root()], vec![intermediate()]);
    let verdict = PathValidator::new()
        .validate(chain.leaf().unwrap(), &store, &options_2030())
        .unwrap();
    assert!(verdict.is_valid());
}

#[test]
fn test_swapped_intermediate_and_root() {
    init_logger();
    let chain = chain_of(&["ecp256/leaf.cert.pem", "ecp256/ca.cert.pem", "ecp256/inter.cert.pem"]);

    // The adjacency walk checks the leaf against the root's key
    let links = Linker::new().link(&chain);
    assert!(!links.link(0).unwrap().signed_correctly);
    assert!(!links.chain_is_sound);

    // Path building is order independent, so the two disagree
    let store = TrustSource::SelfSupplied.build(chain.as_slice()).unwrap();
    let verdict = PathValidator::new()
        .validate(chain.leaf().unwrap(), &store, &options_2030())
        .unwrap();
    assert!(verdict.is_valid());
}

#[test]
fn test_bundle_pipeline_report() {
    init_logger();
    let certs = decode_pem_certificates(&read_fixture("ecp256/bundle.pem")).unwrap();
    let (leaf, chain) = Chain::new(certs).split_leaf(2).unwrap();

    let links = Linker::new().link(&chain);
    let store = TrustSource::SelfSupplied.build(chain.as_slice()).unwrap();
    let verdict = PathValidator::new()
        .validate(&leaf, &store, &options_2030())
        .unwrap();
    let report = Report::new(Some(&leaf), &chain, links, Some(verdict));

    let text = render_text(&report);
    assert!(text.contains("Certificate at position 1 (CN=leaf.chaincheck.test, O=ChainCheck, C=US) expires on: 2124-01-01 00:00:00 UTC"));
    assert!(text.contains("Certificate at position 2 is the root end of the chain (self-signed)"));
    assert!(text.contains("Certificate verification successful."));

    let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
    assert_eq!(json["chain"]["links"].as_array().unwrap().len(), 1);
    assert_eq!(json["validation"]["status"], "valid");
    // The intermediate is a CA, so the self-supplied store anchors it directly
    assert_eq!(json["validation"]["detail"]["path"].as_array().unwrap().len(), 2);
}

#[test]
fn test_remote_style_self_consistency() {
    // validate-remote checks the leaf against the full presented list
    let presented = load_pem("ecp256/bundle.pem");
    let store = TrustSource::SelfSupplied.build(&presented).unwrap();
    let verdict = PathValidator::new()
        .validate(&presented[0], &store, &options_2030())
        .unwrap();
    assert!(verdict.is_valid());
}

#[test]
fn test_root_first_source_is_converted() {
    let mut certs = load_pem("ecp256/bundle.pem");
    certs.reverse();
    let chain = Chain::from_root_first(certs);
    assert_eq!(chain.leaf(), Some(&leaf()));
    assert!(Linker::new().link(&chain).chain_is_sound);
}
