// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Fixture loading shared by the scenario tests.
//!
//! Fixtures live in `test_key/` at the workspace root:
//! - `ecp256/`: root `ca`, intermediate `inter`, issuing CA `issuing` (signed
//!   by `inter`), `leaf` and `expired_leaf` (signed by `inter`), `deep_leaf`
//!   (signed by `issuing`), `leaf_signed` (signed by the leaf's own key),
//!   `leaf_76col` (the leaf re-wrapped at 76 columns with CRLF)
//! - `rogue/`: a separate root whose `inter` and `leaf` reuse the genuine
//!   intermediate and leaf subject names with different keys
//! - `rsa2048/`: an RSA root, intermediate and leaf
//! - `pathlen/`: root `ca`, `a` (pathlen:0), `b` (CA, signed by `a`) and
//!   `leaf` (signed by `b`), which breaks `a`'s path length constraint
//!
//! Every certificate except `expired_leaf` is valid from 2024-01-01 to 2124-01-01.

use std::path::PathBuf;

use chaincheck::{decode_pem_certificates, Certificate, Chain, Time, ValidationOptions};

pub fn test_key_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test_key")
        .join(relative)
}

pub fn read_fixture(relative: &str) -> Vec<u8> {
    let path = test_key_path(relative);
    std::fs::read(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

/// Every certificate of a PEM fixture, in file order.
pub fn load_pem(relative: &str) -> Vec<Certificate> {
    decode_pem_certificates(&read_fixture(relative))
        .unwrap_or_else(|e| panic!("Failed to decode {}: {}", relative, e))
}

/// The first certificate of a PEM fixture.
pub fn load_cert(relative: &str) -> Certificate {
    load_pem(relative)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("{} holds no certificate", relative))
}

/// Build a leaf-first chain from fixture names.
pub fn chain_of(relatives: &[&str]) -> Chain {
    Chain::new(relatives.iter().map(|r| load_cert(r)).collect())
}

pub fn root() -> Certificate {
    load_cert("ecp256/ca.cert.pem")
}

pub fn intermediate() -> Certificate {
    load_cert("ecp256/inter.cert.pem")
}

pub fn leaf() -> Certificate {
    load_cert("ecp256/leaf.cert.pem")
}

/// Options pinned to 2030-01-01, inside every fixture's window but the expired leaf's.
pub fn options_2030() -> ValidationOptions {
    ValidationOptions::new().at(at("2030-01-01"))
}

pub fn at(date: &str) -> Time {
    Time::parse_rfc3339(date).unwrap_or_else(|e| panic!("bad test date {}: {}", date, e))
}

/// Route engine logs to the test harness.
#[cfg(test)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
