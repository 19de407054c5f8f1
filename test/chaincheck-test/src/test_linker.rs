// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use chaincheck::{Chain, ChainReport, Linker};

use crate::common::*;

fn link(relatives: &[&str]) -> ChainReport {
    init_logger();
    Linker::new().link(&chain_of(relatives))
}

fn verdicts(report: &ChainReport) -> Vec<(usize, usize, bool)> {
    report
        .links
        .iter()
        .map(|l| (l.child_index, l.issuer_index, l.signed_correctly))
        .collect()
}

#[test]
fn test_short_chains_have_no_links() {
    let report = Linker::new().link(&Chain::default());
    assert!(report.links.is_empty());
    assert!(report.chain_is_sound);

    let report = link(&["ecp256/ca.cert.pem"]);
    assert!(report.links.is_empty());
    assert!(report.chain_is_sound);
    assert_eq!(report.root.as_ref().unwrap().index, 0);
}

#[test]
fn test_three_certificate_chain() {
    let report = link(&["ecp256/leaf.cert.pem", "ecp256/inter.cert.pem", "ecp256/ca.cert.pem"]);
    assert_eq!(verdicts(&report), vec![(1, 2, true), (0, 1, true)]);
    assert!(report.chain_is_sound);
    assert_eq!(report.link(0).unwrap().issuer_expiry, intermediate().not_after());
}

#[test]
fn test_four_certificate_chain() {
    let report = link(&[
        "ecp256/deep_leaf.cert.pem",
        "ecp256/issuing.cert.pem",
        "ecp256/inter.cert.pem",
        "ecp256/ca.cert.pem",
    ]);
    assert_eq!(report.links.len(), 3);
    assert!(report.chain_is_sound);
}

#[test]
fn test_foreign_leaf_breaks_only_its_link() {
    // leaf.cert.pem is signed by the intermediate, not by the issuing CA
    let report = link(&[
        "ecp256/leaf.cert.pem",
        "ecp256/issuing.cert.pem",
        "ecp256/inter.cert.pem",
        "ecp256/ca.cert.pem",
    ]);
    assert_eq!(
        verdicts(&report),
        vec![(2, 3, true), (1, 2, true), (0, 1, false)]
    );
    assert!(!report.chain_is_sound);
    assert_eq!(report.broken_links().count(), 1);
}

#[test]
fn test_rogue_leaf() {
    let report = link(&["rogue/leaf.cert.pem", "ecp256/inter.cert.pem", "ecp256/ca.cert.pem"]);
    assert_eq!(verdicts(&report), vec![(1, 2, true), (0, 1, false)]);
    // Names line up; only the signature gives it away
    assert!(report.link(0).unwrap().issuer_name_matches);
    assert!(report.link(0).unwrap().error.is_some());
}

#[test]
fn test_rogue_intermediate_breaks_both_links() {
    let report = link(&["ecp256/leaf.cert.pem", "rogue/inter.cert.pem", "ecp256/ca.cert.pem"]);
    assert_eq!(verdicts(&report), vec![(1, 2, false), (0, 1, false)]);
    assert_eq!(report.broken_links().count(), 2);
}

#[test]
fn test_swapped_order_is_reported() {
    let report = link(&["ecp256/leaf.cert.pem", "ecp256/ca.cert.pem", "ecp256/inter.cert.pem"]);
    assert!(!report.link(0).unwrap().signed_correctly);
    assert!(!report.chain_is_sound);
    // The last certificate is still reported as the root end
    let root = report.root.unwrap();
    assert_eq!(root.index, 2);
    assert_eq!(root.expiry, intermediate().not_after());
    assert!(!root.self_signed);
}

#[test]
fn test_rsa_chain() {
    let report = Linker::new().link(&Chain::new(load_pem("rsa2048/bundle.pem")));
    assert!(report.chain_is_sound);
    assert_eq!(report.links.len(), 2);
}

#[test]
fn test_report_serializes_errors_as_text() {
    let report = link(&["ecp256/leaf.cert.pem", "ecp256/ca.cert.pem"]);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["links"][0]["signed_correctly"], false);
    assert_eq!(json["links"][0]["error"], "signature does not verify");
}
