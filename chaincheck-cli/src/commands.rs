// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Subcommand implementations.
//!
//! Input and connection failures are returned as errors. Broken links and
//! failed validations are reported and folded into an [`Outcome`].

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chaincheck::{
    encode_pem_certificates, render_json, render_text, Certificate, Chain, Linker, PathValidator,
    Report, ValidationOptions,
};

use crate::cli::TrustArg;
use crate::source::{fetch_remote_chain, read_pem_file};

/// Exit code when path validation fails, or a link breaks under `--strict`.
pub const EXIT_VALIDATION_FAILED: u8 = 3;

/// What a command found, for choosing the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    pub chain_is_sound: bool,
    pub validated: bool,
}

impl Outcome {
    const SUCCESS: Outcome = Outcome {
        chain_is_sound: true,
        validated: true,
    };

    pub fn exit_code(&self, strict: bool) -> u8 {
        if !self.validated || (strict && !self.chain_is_sound) {
            EXIT_VALIDATION_FAILED
        } else {
            0
        }
    }
}

/// Settings shared by the inspecting commands.
#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub json: bool,
    pub trust: TrustArg,
    pub validation: ValidationOptions,
}

/// Link-report `chain`, validate `leaf` against the anchors built from
/// `presented`, and print both.
fn inspect(
    leaf: &Certificate,
    show_leaf: bool,
    chain: &Chain,
    presented: &[Certificate],
    options: &InspectOptions,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let links = Linker::new().link(chain);

    let source = options
        .trust
        .to_source()
        .context("Failed to load trust anchors")?;
    let store = source.build(presented)?;
    let verdict = PathValidator::new().validate(leaf, &store, &options.validation)?;

    let outcome = Outcome {
        chain_is_sound: links.chain_is_sound,
        validated: verdict.is_valid(),
    };
    let report = Report::new(show_leaf.then_some(leaf), chain, links, Some(verdict));

    if options.json {
        writeln!(out, "{}", render_json(&report)?)?;
    } else {
        write!(out, "{}", render_text(&report))?;
    }
    Ok(outcome)
}

/// `validate <cert-file> <chain-file>`
pub fn validate(
    cert_file: &Path,
    chain_file: &Path,
    options: &InspectOptions,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let leaf = read_pem_file(cert_file)?
        .into_iter()
        .next()
        .with_context(|| format!("No certificates found in {}", cert_file.display()))?;
    let chain = Chain::new(read_pem_file(chain_file)?);

    inspect(&leaf, true, &chain, chain.as_slice(), options, out)
}

/// `validate-bundle <combined-file>`
pub fn validate_bundle(
    combined_file: &Path,
    options: &InspectOptions,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let (leaf, chain) = Chain::new(read_pem_file(combined_file)?)
        .split_leaf(2)
        .with_context(|| {
            format!(
                "{} must hold the certificate followed by at least one CA certificate",
                combined_file.display()
            )
        })?;

    inspect(&leaf, true, &chain, chain.as_slice(), options, out)
}

/// `validate-remote <host:port>`
pub fn validate_remote(
    target: &str,
    timeout: Duration,
    options: &InspectOptions,
    out: &mut dyn Write,
) -> Result<Outcome> {
    if !options.json {
        writeln!(out, "Fetching certificates from {}", target)?;
    }
    let chain = Chain::new(fetch_remote_chain(target, timeout)?);
    let leaf = match chain.leaf() {
        Some(leaf) => leaf.clone(),
        None => bail!("{} presented no certificates", target),
    };

    inspect(&leaf, false, &chain, chain.as_slice(), options, out)
}

/// `download <host:port> <server-cert-out> <chain-out>`
pub fn download(
    target: &str,
    server_cert_out: &Path,
    chain_out: &Path,
    timeout: Duration,
    out: &mut dyn Write,
) -> Result<Outcome> {
    writeln!(out, "Fetching certificates from {}", target)?;
    let certificates = fetch_remote_chain(target, timeout)?;
    let (leaf, rest) = match certificates.split_first() {
        Some(split) => split,
        None => bail!("{} presented no certificates", target),
    };

    std::fs::write(server_cert_out, leaf.to_pem()?)
        .with_context(|| format!("Failed to write {}", server_cert_out.display()))?;
    writeln!(out, "Certificate saved to: {}", server_cert_out.display())?;

    if rest.is_empty() {
        writeln!(out, "No certificate chain found")?;
    } else {
        std::fs::write(chain_out, encode_pem_certificates(rest)?)
            .with_context(|| format!("Failed to write {}", chain_out.display()))?;
        writeln!(out, "Certificate chain saved to: {}", chain_out.display())?;
    }

    Ok(Outcome::SUCCESS)
}
