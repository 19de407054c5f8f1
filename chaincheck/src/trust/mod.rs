// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Trust anchors for path validation.
//!
//! A [`TrustStore`] is built per validation and thrown away afterwards. Where
//! its anchors come from is decided by a [`TrustSource`], so callers and tests
//! can choose between the presented chain itself, an explicit anchor list and
//! the host's CA bundle.

use std::path::{Path, PathBuf};

use crate::certificate::{decode_pem_bundle_lenient, decode_pem_certificates, Certificate};
use crate::error::{Error, Result, TrustError};

/// Root candidates and intermediates for one validation.
#[derive(Debug, Clone, Default)]
pub struct TrustStore {
    roots: Vec<Certificate>,
    intermediates: Vec<Certificate>,
}

impl TrustStore {
    /// Create a store from explicit root and intermediate sets
    pub fn new(roots: Vec<Certificate>, intermediates: Vec<Certificate>) -> Self {
        Self {
            roots,
            intermediates,
        }
    }

    /// Partition `certificates` by their CA flag.
    ///
    /// CA certificates become roots and every other certificate becomes an
    /// intermediate. Order does not matter and no signatures are checked.
    pub fn from_chain(certificates: &[Certificate]) -> Self {
        let (roots, intermediates): (Vec<_>, Vec<_>) =
            certificates.iter().cloned().partition(Certificate::is_ca);
        log::debug!(
            "trust store from chain: {} roots, {} intermediates",
            roots.len(),
            intermediates.len()
        );
        Self {
            roots,
            intermediates,
        }
    }

    /// Trust anchors
    pub fn roots(&self) -> &[Certificate] {
        &self.roots
    }

    /// Untrusted path candidates
    pub fn intermediates(&self) -> &[Certificate] {
        &self.intermediates
    }

    /// Whether `cert` is one of the anchors
    pub fn is_root(&self, cert: &Certificate) -> bool {
        self.roots.contains(cert)
    }

    /// Add an untrusted path candidate
    pub fn add_intermediate(&mut self, cert: Certificate) {
        if !self.intermediates.contains(&cert) && !self.roots.contains(&cert) {
            self.intermediates.push(cert);
        }
    }

    /// Anchors and intermediates whose subject equals `cert`'s issuer, anchors first.
    pub fn issuers_of<'a>(&'a self, cert: &'a Certificate) -> impl Iterator<Item = &'a Certificate> + 'a {
        self.roots
            .iter()
            .chain(self.intermediates.iter())
            .filter(move |candidate| candidate.subject() == cert.issuer())
    }

    /// Load every certificate of a PEM file as an anchor
    pub fn from_pem_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| Error::io(path.display(), &e))?;
        let roots = decode_pem_certificates(&data)?;
        if roots.is_empty() {
            return Err(TrustError::NoAnchors(path.display().to_string()).into());
        }
        Ok(Self::new(roots, Vec::new()))
    }

    /// Load the host's CA bundle.
    ///
    /// Search order:
    /// 1. `SSL_CERT_FILE`
    /// 2. the bundle reported by `openssl-probe`
    /// 3. well-known distribution bundle paths
    /// 4. `SSL_CERT_DIR`, the probed directory and `/etc/ssl/certs`
    pub fn system() -> Result<Self> {
        let probe = openssl_probe::probe();

        let mut bundle_paths: Vec<PathBuf> = std::env::var_os("SSL_CERT_FILE")
            .map(PathBuf::from)
            .into_iter()
            .collect();
        bundle_paths.extend(probe.cert_file);
        bundle_paths.extend(
            [
                "/etc/ssl/certs/ca-certificates.crt",
                "/etc/pki/tls/certs/ca-bundle.crt",
                "/etc/ssl/ca-bundle.pem",
                "/etc/ssl/cert.pem",
            ]
            .iter()
            .map(PathBuf::from),
        );

        for path in &bundle_paths {
            if let Ok(data) = std::fs::read(path) {
                let (roots, dropped) = decode_pem_bundle_lenient(&data);
                if !roots.is_empty() {
                    log::info!(
                        "loaded {} system anchors from {} ({} skipped)",
                        roots.len(),
                        path.display(),
                        dropped
                    );
                    return Ok(Self::new(roots, Vec::new()));
                }
            }
        }

        let mut dir_paths: Vec<PathBuf> = std::env::var_os("SSL_CERT_DIR")
            .map(PathBuf::from)
            .into_iter()
            .collect();
        dir_paths.extend(probe.cert_dir);
        dir_paths.push(PathBuf::from("/etc/ssl/certs"));

        for dir in &dir_paths {
            let entries = match std::fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(_) => continue,
            };
            let mut roots = Vec::new();
            for path in entries.flatten().map(|entry| entry.path()) {
                let is_pem = path
                    .extension()
                    .map(|e| e == "pem" || e == "crt")
                    .unwrap_or(false);
                if !is_pem {
                    continue;
                }
                if let Ok(data) = std::fs::read(&path) {
                    roots.extend(decode_pem_bundle_lenient(&data).0);
                }
            }
            if !roots.is_empty() {
                log::info!("loaded {} system anchors from {}", roots.len(), dir.display());
                return Ok(Self::new(roots, Vec::new()));
            }
        }

        Err(TrustError::NoSystemStore.into())
    }
}

/// Where the anchors for a validation come from.
#[derive(Debug, Clone, Default)]
pub enum TrustSource {
    /// Partition the presented chain itself: CA certificates become anchors.
    #[default]
    SelfSupplied,
    /// Fixed anchors; the presented chain only contributes intermediates.
    Anchors(Vec<Certificate>),
    /// The host's CA bundle; the presented chain only contributes intermediates.
    System,
}

impl TrustSource {
    /// Build the store for validating against `presented`.
    pub fn build(&self, presented: &[Certificate]) -> Result<TrustStore> {
        let mut store = match self {
            TrustSource::SelfSupplied => return Ok(TrustStore::from_chain(presented)),
            TrustSource::Anchors(anchors) => TrustStore::new(anchors.clone(), Vec::new()),
            TrustSource::System => TrustStore::system()?,
        };
        for cert in presented {
            store.add_intermediate(cert.clone());
        }
        Ok(store)
    }
}
