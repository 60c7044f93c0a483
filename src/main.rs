//! `reqlist` command-line entry point.
//!
//! Prints the install requirements and package metadata for a project.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
