//! Error types for fetching, decoding and walking corpus documents.
//!
//! Every error is fatal to the branch that raised it; resumption is a fresh run
//! that skips files already on disk.

use std::path::PathBuf;

/// Network or local write failure while downloading one resource.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (bad URL, DNS, connect, timeout, ...).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u32 },
    /// Creating directories, writing or renaming the destination failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A downloaded document is not a UTF-16 encoded `<tree>` document.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("document is empty")]
    Empty,
    /// Decoded text holds no element at all (e.g. a non-UTF-16 body).
    #[error("document has no root element")]
    NoRoot,
    #[error("odd byte length {len} for UTF-16 text")]
    OddLength { len: usize },
    #[error("invalid UTF-16 sequence")]
    Encoding,
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("expected root element <tree>, found <{name}>")]
    UnexpectedRoot { name: String },
    #[error("document ended before all elements were closed")]
    Unterminated,
}

/// Failure while walking a table-of-contents tree.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A deferred document refers back to one of the documents being expanded.
    #[error("document {path} references itself through its ancestors")]
    Cycle { path: String },
    /// A relative path from a document would escape the destination directory.
    #[error("refusing unsafe relative path {path:?}")]
    UnsafePath { path: String },
    /// Several failures collected when walking with `ErrorPolicy::Continue`.
    #[error("{}", aggregate_message(.0))]
    Aggregate(Vec<WalkError>),
}

fn aggregate_message(errors: &[WalkError]) -> String {
    match errors.first() {
        Some(first) => format!("{} file(s) failed, first: {}", errors.len(), first),
        None => "no failures".to_string(),
    }
}

impl WalkError {
    /// Flattens nested aggregates into a single list of leaf failures.
    pub fn into_failures(self) -> Vec<WalkError> {
        match self {
            WalkError::Aggregate(errors) => {
                errors.into_iter().flat_map(WalkError::into_failures).collect()
            }
            other => vec![other],
        }
    }
}
