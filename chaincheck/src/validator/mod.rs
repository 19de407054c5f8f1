// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate path validation.
//!
//! [`PathValidator`] builds a path from a leaf certificate to one of the
//! anchors of a [`TrustStore`]. Unlike the [`Linker`](crate::chain::Linker) it
//! does not care about the order certificates were presented in: candidates
//! are found by issuer name and every same-named candidate is tried.
//!
//! Each step of a path must satisfy:
//! - the issuer's key verifies the child's signature
//! - the issuer is within its validity window at the validation instant
//! - an issuer that is not an anchor is a CA allowed to sign certificates
//! - an issuer with a pathLenConstraint has no more non-self-issued
//!   intermediates below it than the constraint allows

use core::cmp::Ordering;
use core::fmt;

use serde::Serialize;

use crate::certificate::Certificate;
#[cfg(feature = "ring-backend")]
use crate::crypto_backend::RingBackend;
use crate::crypto_backend::{verify_issued_by, CryptoBackend};
use crate::error::Result;
use crate::time::{Time, ValidationTime};
use crate::trust::TrustStore;

// ============================================================================
// Validation Options
// ============================================================================

/// Options for path validation.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// The instant validity windows are checked at
    pub validation_time: ValidationTime,

    /// Whether to check validity windows at all
    pub check_time: bool,

    /// Maximum number of certificates in a path, leaf and anchor included
    pub max_chain_depth: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            validation_time: ValidationTime::Now,
            check_time: true,
            max_chain_depth: 10,
        }
    }
}

impl ValidationOptions {
    /// Create a new ValidationOptions with all checks enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate at a fixed instant instead of the current time
    pub fn at(mut self, time: Time) -> Self {
        self.validation_time = ValidationTime::At(time);
        self
    }

    /// Disable time validation
    pub fn skip_time_validation(mut self) -> Self {
        self.check_time = false;
        self
    }

    /// Set the maximum chain depth
    pub fn with_max_chain_depth(mut self, depth: usize) -> Self {
        self.max_chain_depth = depth;
        self
    }
}

// ============================================================================
// Verdicts
// ============================================================================

/// Why a leaf did not validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InvalidReason {
    /// The trust store has no anchors
    NoTrustAnchor,
    /// No candidate issuer exists for `issuer`
    NoPathFound { issuer: String },
    /// `issuer`'s key does not verify `subject`'s signature
    SignatureMismatch { subject: String, issuer: String },
    /// `subject` expired before the validation instant
    Expired { subject: String, not_after: Time },
    /// `subject` is not valid until after the validation instant
    NotYetValid { subject: String, not_before: Time },
    /// `subject` would issue a certificate but is not a CA
    IssuerNotCa { subject: String },
    /// `subject` has more intermediates below it than its pathLenConstraint allows
    PathLenExceeded { subject: String, path_len: u32 },
    /// Every candidate path exceeds the depth limit
    PathTooLong { max_depth: usize },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::NoTrustAnchor => write!(f, "no trust anchor found"),
            InvalidReason::NoPathFound { issuer } => {
                write!(f, "no path found: issuer {} not in trust store", issuer)
            }
            InvalidReason::SignatureMismatch { subject, issuer } => {
                write!(f, "signature mismatch: {} not signed by {}", subject, issuer)
            }
            InvalidReason::Expired { subject, not_after } => {
                write!(f, "certificate expired: {} (not after {})", subject, not_after)
            }
            InvalidReason::NotYetValid { subject, not_before } => {
                write!(f, "certificate not yet valid: {} (not before {})", subject, not_before)
            }
            InvalidReason::IssuerNotCa { subject } => {
                write!(f, "issuer is not a CA: {}", subject)
            }
            InvalidReason::PathLenExceeded { subject, path_len } => {
                write!(f, "path length constraint {} of {} exceeded", path_len, subject)
            }
            InvalidReason::PathTooLong { max_depth } => {
                write!(f, "path exceeds {} certificates", max_depth)
            }
        }
    }
}

/// Result of validating one leaf against one trust store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ValidationVerdict {
    /// A path exists; subjects from leaf to anchor
    Valid { path: Vec<String> },
    /// No acceptable path exists
    Invalid(InvalidReason),
}

impl ValidationVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationVerdict::Valid { .. })
    }
}

impl fmt::Display for ValidationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationVerdict::Valid { path } => {
                write!(f, "valid ({} certificates to anchor)", path.len())
            }
            ValidationVerdict::Invalid(reason) => write!(f, "invalid: {}", reason),
        }
    }
}

// ============================================================================
// Path Validator
// ============================================================================

/// Path builder and validator.
#[derive(Debug, Clone, Default)]
pub struct PathValidator<B: CryptoBackend> {
    backend: B,
}

#[cfg(feature = "ring-backend")]
impl PathValidator<RingBackend> {
    /// Create a new PathValidator with the Ring backend
    pub fn new() -> Self {
        Self::with_backend(RingBackend)
    }
}

impl<B: CryptoBackend> PathValidator<B> {
    /// Create a new PathValidator with a specific backend
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Validate `leaf` against `store`.
    ///
    /// Only fails when the validation instant cannot be determined; trust
    /// failures are returned as [`ValidationVerdict::Invalid`].
    pub fn validate(
        &self,
        leaf: &Certificate,
        store: &TrustStore,
        options: &ValidationOptions,
    ) -> Result<ValidationVerdict> {
        if store.roots().is_empty() {
            log::debug!("no anchors in trust store");
            return Ok(ValidationVerdict::Invalid(InvalidReason::NoTrustAnchor));
        }

        let now = if options.check_time {
            let now = options.validation_time.resolve()?;
            if let Some(reason) = validity_failure(leaf, &now) {
                return Ok(ValidationVerdict::Invalid(reason));
            }
            Some(now)
        } else {
            None
        };

        if store.is_root(leaf) {
            log::debug!("leaf {} is itself an anchor", leaf.subject());
            return Ok(ValidationVerdict::Valid {
                path: vec![leaf.subject().to_string()],
            });
        }

        let mut search = PathSearch {
            backend: &self.backend,
            store,
            now,
            max_depth: options.max_chain_depth,
            first_failure: None,
            dead_end: None,
        };
        let mut path = vec![leaf];
        if search.extend(&mut path) {
            log::debug!("path found with {} certificates", path.len());
            return Ok(ValidationVerdict::Valid {
                path: path.iter().map(|c| c.subject().to_string()).collect(),
            });
        }

        let reason = search.first_failure.unwrap_or_else(|| InvalidReason::NoPathFound {
            issuer: search
                .dead_end
                .unwrap_or_else(|| leaf.issuer().to_string()),
        });
        log::debug!("no valid path for {}: {}", leaf.subject(), reason);
        Ok(ValidationVerdict::Invalid(reason))
    }
}

fn validity_failure(cert: &Certificate, now: &Time) -> Option<InvalidReason> {
    let validity = cert.validity();
    match validity.locate(now) {
        Ordering::Less => Some(InvalidReason::NotYetValid {
            subject: cert.subject().to_string(),
            not_before: validity.not_before,
        }),
        Ordering::Greater => Some(InvalidReason::Expired {
            subject: cert.subject().to_string(),
            not_after: validity.not_after,
        }),
        Ordering::Equal => None,
    }
}

/// Depth-first search state for one validation.
struct PathSearch<'a, B: CryptoBackend> {
    backend: &'a B,
    store: &'a TrustStore,
    now: Option<Time>,
    max_depth: usize,
    first_failure: Option<InvalidReason>,
    dead_end: Option<String>,
}

impl<'a, B: CryptoBackend> PathSearch<'a, B> {
    fn fail(&mut self, reason: InvalidReason) {
        log::debug!("rejected step: {}", reason);
        if self.first_failure.is_none() {
            self.first_failure = Some(reason);
        }
    }

    /// Try to extend `path` up to an anchor. On success `path` ends at the anchor.
    fn extend(&mut self, path: &mut Vec<&'a Certificate>) -> bool {
        let current = match path.last() {
            Some(current) => *current,
            None => return false,
        };

        let candidates: Vec<&'a Certificate> = self
            .store
            .issuers_of(current)
            .filter(|candidate| !path.contains(candidate))
            .collect();
        if candidates.is_empty() && self.dead_end.is_none() {
            self.dead_end = Some(current.issuer().to_string());
        }

        for candidate in candidates {
            if path.len() >= self.max_depth {
                self.fail(InvalidReason::PathTooLong {
                    max_depth: self.max_depth,
                });
                continue;
            }
            if verify_issued_by(self.backend, current, candidate).is_err() {
                self.fail(InvalidReason::SignatureMismatch {
                    subject: current.subject().to_string(),
                    issuer: candidate.subject().to_string(),
                });
                continue;
            }
            if let Some(reason) = self.now.as_ref().and_then(|now| validity_failure(candidate, now)) {
                self.fail(reason);
                continue;
            }

            let is_anchor = self.store.is_root(candidate);
            if !is_anchor && !candidate.can_sign_certificates() {
                self.fail(InvalidReason::IssuerNotCa {
                    subject: candidate.subject().to_string(),
                });
                continue;
            }

            if let Some(path_len) = candidate
                .basic_constraints()
                .and_then(|bc| bc.path_len_constraint)
            {
                let intermediates = path.iter().skip(1).filter(|c| !c.is_self_issued()).count();
                if intermediates > path_len as usize {
                    self.fail(InvalidReason::PathLenExceeded {
                        subject: candidate.subject().to_string(),
                        path_len,
                    });
                    continue;
                }
            }

            log::trace!("{} issued by {}", current.subject(), candidate.subject());
            path.push(candidate);
            if is_anchor || self.extend(path) {
                return true;
            }
            path.pop();
        }
        false
    }
}
