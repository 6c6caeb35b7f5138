//! `tpk download` – mirror the whole corpus.

use anyhow::{Context, Result};
use std::path::Path;
use tpk_core::config::TpkConfig;
use tpk_core::{download_corpus_with, CurlClient, ErrorPolicy, Fetcher, WalkError, WalkOptions};

pub fn run_download(
    cfg: &TpkConfig,
    dir: &Path,
    overwrite: bool,
    continue_on_error: bool,
) -> Result<()> {
    let fetcher = Fetcher::new(CurlClient::new(&cfg.http));
    let mut opts = WalkOptions::new(dir, overwrite);
    opts.on_error = if continue_on_error {
        ErrorPolicy::Continue
    } else {
        cfg.on_error
    };

    match download_corpus_with(&fetcher, &cfg.layout(), opts) {
        Ok(stats) => {
            println!(
                "{} documents, {} downloaded, {} already present ({} bytes) in {}",
                stats.documents,
                stats.downloaded,
                stats.skipped,
                stats.bytes,
                dir.display()
            );
            Ok(())
        }
        Err(WalkError::Aggregate(failures)) => {
            for failure in &failures {
                eprintln!("failed: {}", failure);
            }
            anyhow::bail!("{} file(s) failed; run again to retry", failures.len())
        }
        Err(e) => Err(e).context("corpus download aborted; run again to resume"),
    }
}
