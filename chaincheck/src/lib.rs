// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! X.509 Certificate Chain Inspection
//!
//! Decodes certificate chains, checks each adjacent link for a valid
//! signature and runs path validation of a leaf against a trust store.
//! Uses `der` for ASN.1 parsing and an optional crypto backend for
//! signature checks.
//!
//! # Features
//! - Decode certificates from PEM buffers and DER lists
//! - Link-by-link signature report that never stops at the first break
//! - Path building from a leaf to an anchor with validity and CA checks
//! - Text and JSON reports
//!
//! # Example
//! ```no_run
//! use chaincheck::prelude::*;
//!
//! # fn example(pem: &[u8]) -> chaincheck::Result<()> {
//! let chain = Chain::new(decode_pem_certificates(pem)?);
//! let links = Linker::new().link(&chain);
//!
//! let store = TrustSource::SelfSupplied.build(chain.as_slice())?;
//! if let Some(leaf) = chain.leaf() {
//!     let verdict = PathValidator::new().validate(leaf, &store, &ValidationOptions::new())?;
//!     println!("sound: {}, verdict: {}", links.chain_is_sound, verdict);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod certificate;
pub mod chain;
pub mod crypto_backend;
pub mod error;
pub mod report;
pub mod time;
pub mod trust;
pub mod validator;

pub use certificate::extensions::{BasicConstraints, Extension, Extensions, KeyUsage, KeyUsageBit};
pub use certificate::name::Name;
pub use certificate::{
    decode_der_certificates, decode_pem_certificates, encode_pem_certificates, Certificate,
};
pub use chain::{Chain, ChainReport, LinkVerdict, Linker, RootEntry};
pub use error::{Error, Result};
pub use report::{render_json, render_text, write_report, CertificateSummary, Report};
pub use time::{Time, ValidationTime, Validity};
pub use trust::{TrustSource, TrustStore};
pub use validator::{InvalidReason, PathValidator, ValidationOptions, ValidationVerdict};

/// Re-export commonly used types
pub mod prelude {
    #[cfg(feature = "ring-backend")]
    pub use crate::crypto_backend::RingBackend;
    pub use crate::crypto_backend::CryptoBackend;
    pub use crate::{
        decode_pem_certificates, Certificate, Chain, ChainReport, Error, Linker, PathValidator,
        Result, TrustSource, TrustStore, ValidationOptions, ValidationVerdict,
    };
}
