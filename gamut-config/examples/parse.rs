// Copyright (c) The gamut Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Standalone test-plan parser
//!
//! Useful for manually checking how a config file parses

use camino::Utf8PathBuf;
use clap::Parser;
use gamut_config::TestPlan;

#[derive(Debug, Parser)]
struct Args {
    /// Path to a test-plan config file
    config: Utf8PathBuf,
}

fn main() {
    let args = Args::parse();

    let input = match gamut_config::read_config(&args.config) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("Failed to read config file: {err}");
            std::process::exit(1);
        }
    };

    match TestPlan::parse(&input) {
        Ok(plan) => println!("{plan:#?}"),
        Err(error) => {
            let report = miette::Report::new(error);
            eprintln!("{report:?}");
            std::process::exit(1);
        }
    }
}
