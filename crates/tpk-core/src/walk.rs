//! Depth-first walk over table-of-contents trees.
//!
//! Deferred nodes are replaced by the document they point to, leaves are
//! downloaded, branches are walked child by child in document order.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::decode;
use crate::error::WalkError;
use crate::fetch::{FetchOutcome, Fetcher, HttpGet};
use crate::tree::{Node, Tree};

/// What to do when a child fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Stop at the first failure and return it.
    #[default]
    #[serde(rename = "abort")]
    FailFast,
    /// Keep walking siblings and return every failure at the end.
    #[serde(rename = "continue")]
    Continue,
}

#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Local root mirroring the remote layout.
    pub dest_dir: PathBuf,
    /// Re-download files that already exist.
    pub overwrite: bool,
    pub on_error: ErrorPolicy,
}

impl WalkOptions {
    pub fn new(dest_dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dest_dir: dest_dir.into(),
            overwrite,
            on_error: ErrorPolicy::FailFast,
        }
    }
}

/// Counters accumulated over one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// TOC documents decoded.
    pub documents: usize,
    /// Files fetched from the network.
    pub downloaded: usize,
    /// Files left alone because they already existed.
    pub skipped: usize,
    /// Bytes written for downloaded files.
    pub bytes: u64,
}

/// Checks a document-relative path and returns it with `.` segments dropped
/// (`./cscd/a.xml` → `cscd/a.xml`).
///
/// The path must name a file: absolute paths, `..` components, a trailing `/`
/// and paths without any normal segment are rejected.
pub fn normalize(rel: &str) -> Result<String, WalkError> {
    let unsafe_path = || WalkError::UnsafePath {
        path: rel.to_string(),
    };
    if rel.ends_with('/') {
        return Err(unsafe_path());
    }
    let mut segments = Vec::new();
    for component in Path::new(rel).components() {
        match component {
            Component::Normal(s) => segments.push(s.to_string_lossy()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_path())
            }
        }
    }
    if segments.is_empty() {
        return Err(unsafe_path());
    }
    Ok(segments.join("/"))
}

/// Joins a document-relative path onto the URL prefix and the destination directory.
///
/// Both joins are plain concatenation of the path as written; see [`normalize`]
/// for what is rejected.
pub fn resolve(url_prefix: &str, dest_dir: &Path, rel: &str) -> Result<(String, PathBuf), WalkError> {
    normalize(rel)?;
    Ok((format!("{}{}", url_prefix, rel), dest_dir.join(rel)))
}

/// Downloads (unless present) and decodes one TOC document.
pub fn download_and_decode<C: HttpGet>(
    fetcher: &Fetcher<C>,
    url: &str,
    dest: &Path,
    overwrite: bool,
) -> Result<(Tree, FetchOutcome), WalkError> {
    let outcome = fetcher.fetch(url, dest, overwrite)?;
    let bytes = fs::read(dest).map_err(|source| WalkError::Read {
        path: dest.to_path_buf(),
        source,
    })?;
    let tree = decode::decode(&bytes).map_err(|source| WalkError::Decode {
        path: dest.to_path_buf(),
        source,
    })?;
    Ok((tree, outcome))
}

/// Single-threaded walker. Holds the chain of documents being expanded to detect cycles.
pub struct Walker<'a, C> {
    fetcher: &'a Fetcher<C>,
    url_prefix: &'a str,
    opts: WalkOptions,
    ancestors: Vec<String>,
    stats: WalkStats,
}

impl<'a, C: HttpGet> Walker<'a, C> {
    pub fn new(fetcher: &'a Fetcher<C>, url_prefix: &'a str, opts: WalkOptions) -> Self {
        Self {
            fetcher,
            url_prefix,
            opts,
            ancestors: Vec::new(),
            stats: WalkStats::default(),
        }
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Walks one node: follow `Deferred`, download `Leaf`, recurse into `Branch`.
    pub fn walk(&mut self, tree: &Tree) -> Result<(), WalkError> {
        let s = tree.summary();
        tracing::info!(
            text = s.text,
            src = s.src,
            action = s.action,
            children = s.children,
            "tree node"
        );

        match &tree.node {
            Node::Deferred(src) => self.walk_document(src),
            Node::Leaf(action) => self.fetch_resource(action),
            Node::Branch(children) => self.walk_children(children),
        }
    }

    /// Fetches and decodes `src`, then walks the decoded tree in its place.
    pub fn walk_document(&mut self, src: &str) -> Result<(), WalkError> {
        let key = normalize(src)?;
        if let Some(ancestor) = self.ancestors.iter().find(|a| **a == key) {
            return Err(WalkError::Cycle {
                path: ancestor.clone(),
            });
        }
        let (url, dest) = resolve(self.url_prefix, &self.opts.dest_dir, src)?;
        let (tree, outcome) = download_and_decode(self.fetcher, &url, &dest, self.opts.overwrite)?;
        self.record(outcome);
        self.stats.documents += 1;

        self.ancestors.push(key);
        let result = self.walk(&tree);
        self.ancestors.pop();
        result
    }

    /// Downloads one terminal resource relative to the corpus root.
    pub fn fetch_resource(&mut self, rel: &str) -> Result<(), WalkError> {
        let (url, dest) = resolve(self.url_prefix, &self.opts.dest_dir, rel)?;
        let outcome = self.fetcher.fetch(&url, &dest, self.opts.overwrite)?;
        self.record(outcome);
        Ok(())
    }

    fn walk_children(&mut self, children: &[Tree]) -> Result<(), WalkError> {
        match self.opts.on_error {
            ErrorPolicy::FailFast => {
                for child in children {
                    self.walk(child)?;
                }
                Ok(())
            }
            ErrorPolicy::Continue => {
                let mut failures = Vec::new();
                for child in children {
                    if let Err(e) = self.walk(child) {
                        tracing::warn!(text = %child.text, "{}", e);
                        failures.extend(e.into_failures());
                    }
                }
                if failures.is_empty() {
                    Ok(())
                } else {
                    Err(WalkError::Aggregate(failures))
                }
            }
        }
    }

    fn record(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Skipped => self.stats.skipped += 1,
            FetchOutcome::Downloaded(n) => {
                self.stats.downloaded += 1;
                self.stats.bytes += n;
            }
        }
    }
}
