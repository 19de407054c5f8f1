// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Command line definition.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chaincheck::{Time, TrustSource, TrustStore, ValidationOptions};
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "chaincheck",
    version,
    about = "Inspect and validate X.509 certificate chains",
    after_help = "Exit codes: 0 success, 1 input or connection error, 2 usage error, 3 validation failed"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print the report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Trust anchors: `self` (CA certificates of the presented chain), `system`, or a PEM file
    #[arg(long, global = true, value_name = "self|system|FILE", default_value = "self")]
    pub trust: TrustArg,

    /// Validation instant as RFC 3339 date/time or Unix seconds (default: now)
    #[arg(long, global = true, value_name = "TIME", value_parser = parse_time)]
    pub at: Option<Time>,

    /// Also fail (exit 3) when any chain link is broken
    #[arg(long, global = true)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report on CHAIN_FILE and validate the first certificate of CERT_FILE against it
    Validate {
        cert_file: PathBuf,
        chain_file: PathBuf,
    },
    /// Validate the first certificate of a file against the certificates after it
    ValidateBundle { combined_file: PathBuf },
    /// Fetch a server's chain and validate its leaf against it
    ValidateRemote {
        /// host[:port], port defaults to 443
        target: String,
        /// Connect and read timeout in seconds
        #[arg(long, default_value_t = 10, value_name = "SECS")]
        timeout: u64,
    },
    /// Fetch a server's chain and save it as PEM
    Download {
        /// host[:port], port defaults to 443
        target: String,
        server_cert_out: PathBuf,
        chain_out: PathBuf,
        /// Connect and read timeout in seconds
        #[arg(long, default_value_t = 10, value_name = "SECS")]
        timeout: u64,
    },
}

impl Commands {
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            Commands::ValidateRemote { timeout, .. } | Commands::Download { timeout, .. } => {
                Some(Duration::from_secs(*timeout))
            }
            _ => None,
        }
    }
}

/// Where `--trust` takes anchors from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustArg {
    SelfSupplied,
    System,
    File(PathBuf),
}

impl FromStr for TrustArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err("trust source must not be empty".to_string()),
            "self" => Ok(TrustArg::SelfSupplied),
            "system" => Ok(TrustArg::System),
            path => Ok(TrustArg::File(PathBuf::from(path))),
        }
    }
}

impl TrustArg {
    /// Resolve into an engine trust source, loading anchor files.
    pub fn to_source(&self) -> chaincheck::Result<TrustSource> {
        Ok(match self {
            TrustArg::SelfSupplied => TrustSource::SelfSupplied,
            TrustArg::System => TrustSource::System,
            TrustArg::File(path) => {
                TrustSource::Anchors(TrustStore::from_pem_file(path)?.roots().to_vec())
            }
        })
    }
}

/// Parse `--at`: Unix seconds or an RFC 3339 date/time.
pub fn parse_time(s: &str) -> Result<Time, String> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        let secs = s.parse::<u64>().map_err(|e| e.to_string())?;
        Time::from_unix_secs(secs).map_err(|e| e.to_string())
    } else {
        Time::parse_rfc3339(s).map_err(|e| e.to_string())
    }
}

impl Cli {
    pub fn validation_options(&self) -> ValidationOptions {
        match self.at {
            Some(time) => ValidationOptions::new().at(time),
            None => ValidationOptions::new(),
        }
    }
}
