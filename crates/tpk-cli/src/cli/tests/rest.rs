//! Tests for tree and route subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_tree() {
    match parse(&["tpk", "tree", "tipitaka_toc.xml"]) {
        CliCommand::Tree {
            src,
            dir,
            overwrite,
        } => {
            assert_eq!(src, "tipitaka_toc.xml");
            assert!(dir.is_none());
            assert!(!overwrite);
        }
        _ => panic!("expected Tree"),
    }
}

#[test]
fn cli_parse_tree_requires_src() {
    assert!(Cli::try_parse_from(["tpk", "tree"]).is_err());
}

#[test]
fn cli_parse_route() {
    match parse(&["tpk", "route", "/browse/ā/āpadā/"]) {
        CliCommand::Route { path } => assert_eq!(path, "/browse/ā/āpadā/"),
        _ => panic!("expected Route"),
    }
}

#[test]
fn cli_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["tpk", "add", "https://example.com"]).is_err());
}
