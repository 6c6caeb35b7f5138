//! CLI for the TPK corpus mirror.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tpk_core::config;

use commands::{run_download, run_route, run_tree};

/// Top-level CLI for the TPK corpus mirror.
#[derive(Debug, Parser)]
#[command(name = "tpk")]
#[command(about = "TPK: offline mirror of the Pali Tipitaka XML corpus", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the whole corpus (all TOC documents, texts and stylesheets).
    Download {
        /// Destination directory (default: current directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Re-download files that already exist.
        #[arg(long)]
        overwrite: bool,
        /// Keep going after a failed file and report all failures at the end.
        #[arg(long)]
        continue_on_error: bool,
    },

    /// Fetch and decode one TOC document and print it as JSON.
    Tree {
        /// Document path relative to the corpus URL prefix (e.g. tipitaka_toc.xml).
        src: String,
        /// Directory the document is saved under (default: current directory).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
        /// Re-download the document even if it exists.
        #[arg(long)]
        overwrite: bool,
    },

    /// Show the dictionary page type addressed by a URL path.
    Route {
        /// URL path, e.g. /browse/s/sacca/
        path: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Download {
                dir,
                overwrite,
                continue_on_error,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let dir = dest_dir(dir)?;
                run_download(&cfg, &dir, overwrite, continue_on_error)?;
            }
            CliCommand::Tree {
                src,
                dir,
                overwrite,
            } => {
                let cfg = config::load_or_init()?;
                let dir = dest_dir(dir)?;
                run_tree(&cfg, &src, &dir, overwrite)?;
            }
            CliCommand::Route { path } => run_route(&path),
        }

        Ok(())
    }
}

fn dest_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(d) => Ok(d),
        None => Ok(std::env::current_dir()?),
    }
}

#[cfg(test)]
mod tests;
