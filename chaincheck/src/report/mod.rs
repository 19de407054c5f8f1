// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Human and JSON rendering of chain inspection results.
//!
//! Positions are 1-based and follow the chain's leaf-first order.

use core::fmt;

use serde::Serialize;

use crate::certificate::Certificate;
use crate::chain::{Chain, ChainReport};
use crate::error::Result;
use crate::time::Time;
use crate::validator::ValidationVerdict;

/// Identity and validity of one certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateSummary {
    pub position: usize,
    pub subject: String,
    pub issuer: String,
    pub not_before: Time,
    pub not_after: Time,
    pub is_ca: bool,
}

impl CertificateSummary {
    pub fn new(position: usize, cert: &Certificate) -> Self {
        Self {
            position,
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            not_before: cert.validity().not_before,
            not_after: cert.not_after(),
            is_ca: cert.is_ca(),
        }
    }
}

/// Everything one command found out about a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The certificate that was validated, when it is not part of `certificates`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf: Option<CertificateSummary>,
    /// The chain, leaf first
    pub certificates: Vec<CertificateSummary>,
    /// Link-by-link signature checks of `certificates`
    pub chain: ChainReport,
    /// Path validation of the leaf
    pub validation: Option<ValidationVerdict>,
}

impl Report {
    pub fn new(
        leaf: Option<&Certificate>,
        chain: &Chain,
        chain_report: ChainReport,
        validation: Option<ValidationVerdict>,
    ) -> Self {
        Self {
            leaf: leaf.map(|cert| CertificateSummary::new(1, cert)),
            certificates: chain
                .iter()
                .enumerate()
                .map(|(i, cert)| CertificateSummary::new(i + 1, cert))
                .collect(),
            chain: chain_report,
            validation,
        }
    }
}

/// Write the plain-text form of `report` to `out`.
///
/// Sections: the validated leaf's expiry (when present), the chain's
/// expiries, the link walk root end first, then the validation headline.
pub fn write_report<W: fmt::Write>(report: &Report, out: &mut W) -> fmt::Result {
    if let Some(leaf) = &report.leaf {
        writeln!(out, "Certificate Expiry Dates:")?;
        write_expiry(out, leaf)?;
        writeln!(out)?;
    }

    writeln!(out, "Chain Expiry Dates:")?;
    if report.certificates.is_empty() {
        writeln!(out, "  (no certificates)")?;
    }
    for cert in &report.certificates {
        write_expiry(out, cert)?;
    }

    write_links(out, &report.chain)?;

    if let Some(validation) = &report.validation {
        writeln!(out, "\nValidating certificate against the chain:")?;
        match validation {
            ValidationVerdict::Valid { .. } => {
                writeln!(out, "  Certificate verification successful.")?
            }
            ValidationVerdict::Invalid(reason) => {
                writeln!(out, "  Certificate verification FAILED: {}", reason)?
            }
        }
    }
    Ok(())
}

fn write_expiry<W: fmt::Write>(out: &mut W, cert: &CertificateSummary) -> fmt::Result {
    writeln!(
        out,
        "  Certificate at position {} ({}) expires on: {}",
        cert.position, cert.subject, cert.not_after
    )
}

fn write_links<W: fmt::Write>(out: &mut W, chain: &ChainReport) -> fmt::Result {
    writeln!(out, "\nVerifying certificate chain:")?;
    if let Some(root) = &chain.root {
        writeln!(
            out,
            "  Certificate at position {} is the root end of the chain{}. Expires: {}",
            root.index + 1,
            if root.self_signed { " (self-signed)" } else { " (not self-signed)" },
            root.expiry
        )?;
    }
    for link in &chain.links {
        let child = link.child_index + 1;
        let issuer = link.issuer_index + 1;
        if link.signed_correctly {
            writeln!(
                out,
                "  Certificate at position {} is signed by certificate at position {}: OK. Issuer expires: {}",
                child, issuer, link.issuer_expiry
            )?;
        } else {
            let reason = link
                .error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            writeln!(
                out,
                "  Certificate at position {} is NOT signed by certificate at position {}: BROKEN ({}). Issuer expires: {}",
                child, issuer, reason, link.issuer_expiry
            )?;
        }
        if !link.issuer_name_matches {
            writeln!(
                out,
                "    note: issuer name of position {} does not match subject of position {}",
                child, issuer
            )?;
        }
    }

    if chain.chain_is_sound {
        writeln!(out, "Chain links: sound")
    } else {
        writeln!(out, "Chain links: {} broken", chain.broken_links().count())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_report(self, f)
    }
}

/// Render `report` as plain text lines.
pub fn render_text(report: &Report) -> String {
    report.to_string()
}

/// Render `report` as pretty-printed JSON.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
