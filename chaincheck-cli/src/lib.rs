// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! `chaincheck` command line tool.

#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod source;

use std::io::Write;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::commands::InspectOptions;

/// Run the parsed command, writing the report to `out`. Returns the exit code.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<u8> {
    let options = InspectOptions {
        json: cli.json,
        trust: cli.trust.clone(),
        validation: cli.validation_options(),
    };
    let timeout = cli.command.timeout().unwrap_or_default();

    let outcome = match &cli.command {
        Commands::Validate {
            cert_file,
            chain_file,
        } => commands::validate(cert_file, chain_file, &options, out)?,
        Commands::ValidateBundle { combined_file } => {
            commands::validate_bundle(combined_file, &options, out)?
        }
        Commands::ValidateRemote { target, .. } => {
            commands::validate_remote(target, timeout, &options, out)?
        }
        Commands::Download {
            target,
            server_cert_out,
            chain_out,
            ..
        } => commands::download(target, server_cert_out, chain_out, timeout, out)?,
    };

    Ok(outcome.exit_code(cli.strict))
}
