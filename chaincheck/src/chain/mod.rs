// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate chains and the link-by-link diagnostic walk.
//!
//! A [`Chain`] is always leaf-first: index 0 is the end-entity certificate and
//! the last index is the root-most certificate. Sources that deliver the
//! opposite order go through [`Chain::from_root_first`].
//!
//! The [`Linker`] checks every adjacent pair `(i, i + 1)` for a valid
//! signature and records the outcome of each pair in a [`ChainReport`]. It
//! never stops at the first broken link.

use serde::{Serialize, Serializer};

use crate::certificate::Certificate;
#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;
use crate::crypto_backend::{verify_issued_by, CryptoBackend};
use crate::error::{ChainError, Error, Result};
use crate::time::Time;

// ============================================================================
// Certificate Chain
// ============================================================================

/// A certificate chain, ordered from leaf (end-entity) to root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    certificates: Vec<Certificate>,
}

impl Chain {
    /// Create a chain from leaf-first certificates
    pub fn new(certificates: Vec<Certificate>) -> Self {
        Self { certificates }
    }

    /// Create a chain from root-first certificates
    pub fn from_root_first(mut certificates: Vec<Certificate>) -> Self {
        certificates.reverse();
        Self { certificates }
    }

    /// Get the leaf (end-entity) certificate
    pub fn leaf(&self) -> Option<&Certificate> {
        self.certificates.first()
    }

    /// Get the root-most certificate
    pub fn root(&self) -> Option<&Certificate> {
        self.certificates.last()
    }

    /// Get the certificate at `index`
    pub fn get(&self, index: usize) -> Option<&Certificate> {
        self.certificates.get(index)
    }

    /// Get the chain length
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// Get an iterator over the certificates, leaf first
    pub fn iter(&self) -> core::slice::Iter<'_, Certificate> {
        self.certificates.iter()
    }

    /// The certificates as a leaf-first slice
    pub fn as_slice(&self) -> &[Certificate] {
        &self.certificates
    }

    /// Split into the leaf and the chain above it.
    ///
    /// Requires at least `minimum` certificates in total.
    pub fn split_leaf(mut self, minimum: usize) -> Result<(Certificate, Chain)> {
        if self.certificates.is_empty() {
            return Err(ChainError::Empty.into());
        }
        if self.certificates.len() < minimum {
            return Err(ChainError::TooShort {
                minimum,
                found: self.certificates.len(),
            }
            .into());
        }
        let leaf = self.certificates.remove(0);
        Ok((leaf, self))
    }
}

impl From<Vec<Certificate>> for Chain {
    fn from(certificates: Vec<Certificate>) -> Self {
        Self::new(certificates)
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Certificate;
    type IntoIter = core::slice::Iter<'a, Certificate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Chain Report
// ============================================================================

fn serialize_error<S: Serializer>(error: &Option<Error>, serializer: S) -> core::result::Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.collect_str(e),
        None => serializer.serialize_none(),
    }
}

/// Outcome of checking one adjacent pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkVerdict {
    /// Index of the certificate whose signature was checked
    pub child_index: usize,
    /// Index of the purported issuer (`child_index + 1`)
    pub issuer_index: usize,
    /// The issuer's key verifies the child's signature
    pub signed_correctly: bool,
    /// notAfter of the purported issuer
    pub issuer_expiry: Time,
    /// The child's issuer name equals the issuer's subject name
    pub issuer_name_matches: bool,
    /// Why the signature check failed
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<Error>,
}

/// The root-most certificate of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootEntry {
    pub index: usize,
    pub subject: String,
    pub expiry: Time,
    /// Self-issued and verifiable with its own key
    pub self_signed: bool,
}

/// Link-by-link result for a whole chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    /// Links in the order they were checked, root end first
    pub links: Vec<LinkVerdict>,
    /// Always present for a non-empty chain
    pub root: Option<RootEntry>,
    /// AND of every link's `signed_correctly`
    pub chain_is_sound: bool,
}

impl ChainReport {
    /// The verdict for the link whose child sits at `child_index`
    pub fn link(&self, child_index: usize) -> Option<&LinkVerdict> {
        self.links.iter().find(|l| l.child_index == child_index)
    }

    /// Links whose signature did not verify
    pub fn broken_links(&self) -> impl Iterator<Item = &LinkVerdict> {
        self.links.iter().filter(|l| !l.signed_correctly)
    }
}

// ============================================================================
// Linker
// ============================================================================

/// Adjacency signature checker.
#[derive(Debug, Clone, Default)]
pub struct Linker<B: CryptoBackend> {
    backend: B,
}

#[cfg(feature = "ring-backend")]
impl Linker<RingBackend> {
    /// Create a new Linker with the Ring backend
    pub fn new() -> Self {
        Self::with_backend(RingBackend)
    }
}

impl<B: CryptoBackend> Linker<B> {
    /// Create a new Linker with a specific backend
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Check every adjacent pair of `chain`, walking from the root end.
    pub fn link(&self, chain: &Chain) -> ChainReport {
        let root = chain.root().map(|root| RootEntry {
            index: chain.len() - 1,
            subject: root.subject().to_string(),
            expiry: root.not_after(),
            self_signed: root.is_self_issued()
                && verify_issued_by(&self.backend, root, root).is_ok(),
        });

        let mut links = Vec::with_capacity(chain.len().saturating_sub(1));
        for child_index in (0..chain.len().saturating_sub(1)).rev() {
            let child = &chain.as_slice()[child_index];
            let issuer = &chain.as_slice()[child_index + 1];

            let outcome = verify_issued_by(&self.backend, child, issuer);
            let verdict = LinkVerdict {
                child_index,
                issuer_index: child_index + 1,
                signed_correctly: outcome.is_ok(),
                issuer_expiry: issuer.not_after(),
                issuer_name_matches: child.issuer() == issuer.subject(),
                error: outcome.err(),
            };

            log::debug!(
                "link {} -> {}: {} ({})",
                verdict.child_index,
                verdict.issuer_index,
                if verdict.signed_correctly { "ok" } else { "broken" },
                child.subject()
            );
            links.push(verdict);
        }

        let chain_is_sound = links.iter().all(|l| l.signed_correctly);
        ChainReport {
            links,
            root,
            chain_is_sound,
        }
    }
}
