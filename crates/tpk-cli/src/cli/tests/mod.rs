//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

mod rest;

#[test]
fn default_log_filter_matches_binary_targets() {
    let crate_name = module_path!().split("::").next().unwrap();
    let directive = format!("{}=debug", crate_name);
    assert!(tpk_core::logging::DEFAULT_FILTER
        .split(',')
        .any(|d| d == directive));
}
