// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

use std::process::ExitCode;

use chaincheck_cli::cli::Cli;
use clap::Parser;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match chaincheck_cli::run(&cli, &mut out) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            log::debug!("{:?}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
