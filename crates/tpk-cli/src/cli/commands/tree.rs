//! `tpk tree` – fetch one TOC document and dump it as JSON.

use anyhow::Result;
use std::path::Path;
use tpk_core::config::TpkConfig;
use tpk_core::walk::resolve;
use tpk_core::{download_and_decode, CurlClient, Fetcher};

pub fn run_tree(cfg: &TpkConfig, src: &str, dir: &Path, overwrite: bool) -> Result<()> {
    let fetcher = Fetcher::new(CurlClient::new(&cfg.http));
    let (url, dest) = resolve(&cfg.url_prefix, dir, src)?;
    let (tree, _) = download_and_decode(&fetcher, &url, &dest, overwrite)?;
    tracing::debug!(src, nodes = tree.node_count(), "decoded document");
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}
