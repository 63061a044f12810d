// Copyright (c) The gamut Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `gamut` binary: parses a test-plan config and prints a plan summary.

use camino::Utf8PathBuf;
use clap::Parser;
use gamut_config::TestPlan;
use std::process::ExitCode;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "gamut", version, about = "Compile a test-plan config into parameter domain trees")]
struct Args {
    /// Path to the test-plan config file
    config: Utf8PathBuf,

    /// Enable debug-level tracing output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match TestPlan::from_path(&args.config) {
        Ok(plan) => {
            print_summary(&plan);
            ExitCode::SUCCESS
        }
        Err(error) => {
            let report = miette::Report::new(error);
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(plan: &TestPlan) {
    println!("function: {}", plan.function_name());
    println!("random samples: {}", plan.num_random());
    println!("parameters: {}", plan.params().len());
    for (index, param) in plan.params().iter().enumerate() {
        println!(
            "  param {index}: {param} (exhaustive: {}, random: {})",
            param.exhaustive_len(),
            param.random_len(),
        );
    }
}
