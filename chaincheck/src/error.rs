// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Engine errors.
//!
//! Decoding and I/O failures are returned as [`Error`] and stop the caller.
//! Signature and trust problems found while inspecting a chain are recorded
//! as data instead (see [`crate::chain::LinkVerdict`] and
//! [`crate::validator::ValidationVerdict`]); a link verdict still carries an
//! [`Error`] to say why the link broke.

use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// DER that does not decode
    Der(String),
    /// DER that decodes but is not a usable certificate
    MalformedCertificate(String),
    Pem(PemError),
    Signature(SignatureError),
    /// Signature or key algorithm outside the supported set
    UnsupportedAlgorithm(String),
    Time(TimeError),
    Chain(ChainError),
    Trust(TrustError),
    /// Report serialization
    Json(String),
    /// File system failure, with the path that failed
    Io { path: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PemError {
    /// Bad boundary, base64 or line structure
    Framing(String),
    /// A BEGIN boundary whose END never comes; holds the label
    Unterminated(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The issuer key does not verify the signature
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// Outside what X.509 time types can carry, or unparsable input
    Unrepresentable(String),
    ClockUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    Empty,
    TooShort { minimum: usize, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustError {
    /// No CA bundle on this host
    NoSystemStore,
    /// An anchor file without certificates; holds the path
    NoAnchors(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Der(msg) => write!(f, "malformed DER: {}", msg),
            Error::MalformedCertificate(msg) => write!(f, "malformed certificate: {}", msg),
            Error::Pem(e) => e.fmt(f),
            Error::Signature(e) => e.fmt(f),
            Error::UnsupportedAlgorithm(what) => write!(f, "unsupported algorithm: {}", what),
            Error::Time(e) => e.fmt(f),
            Error::Chain(e) => e.fmt(f),
            Error::Trust(e) => e.fmt(f),
            Error::Json(msg) => write!(f, "JSON encoding failed: {}", msg),
            Error::Io { path, message } => write!(f, "{}: {}", path, message),
        }
    }
}

impl fmt::Display for PemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PemError::Framing(msg) => write!(f, "invalid PEM: {}", msg),
            PemError::Unterminated(label) => write!(f, "PEM block '{}' has no END boundary", label),
        }
    }
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::Mismatch => f.write_str("signature does not verify"),
        }
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeError::Unrepresentable(msg) => write!(f, "invalid time: {}", msg),
            TimeError::ClockUnavailable => f.write_str("system clock unavailable"),
        }
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::Empty => f.write_str("No certificates found"),
            ChainError::TooShort { minimum, found } => {
                write!(f, "At least {} certificates required, found {}", minimum, found)
            }
        }
    }
}

impl fmt::Display for TrustError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustError::NoSystemStore => f.write_str("No system trust store found"),
            TrustError::NoAnchors(path) => write!(f, "No trust anchor certificates in {}", path),
        }
    }
}

impl std::error::Error for Error {}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Self {
        Error::Der(err.to_string())
    }
}

impl From<pem_rfc7468::Error> for Error {
    fn from(err: pem_rfc7468::Error) -> Self {
        Error::Pem(PemError::Framing(err.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<PemError> for Error {
    fn from(err: PemError) -> Self {
        Error::Pem(err)
    }
}

impl From<TimeError> for Error {
    fn from(err: TimeError) -> Self {
        Error::Time(err)
    }
}

impl From<ChainError> for Error {
    fn from(err: ChainError) -> Self {
        Error::Chain(err)
    }
}

impl From<TrustError> for Error {
    fn from(err: TrustError) -> Self {
        Error::Trust(err)
    }
}

impl Error {
    pub fn signature_mismatch() -> Self {
        Error::Signature(SignatureError::Mismatch)
    }

    pub fn unsupported_algorithm<S: Into<String>>(what: S) -> Self {
        Error::UnsupportedAlgorithm(what.into())
    }

    /// An I/O failure that names the offending path.
    pub fn io<P: fmt::Display>(path: P, err: &std::io::Error) -> Self {
        Error::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}
