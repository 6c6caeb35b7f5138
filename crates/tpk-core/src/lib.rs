pub mod config;
pub mod logging;

pub mod corpus;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod site_path;
pub mod tree;
pub mod walk;

pub use corpus::{download_corpus, download_corpus_with, CorpusLayout};
pub use error::{DecodeError, FetchError, WalkError};
pub use fetch::{CurlClient, FetchOutcome, Fetcher, HttpGet};
pub use tree::{Node, Tree};
pub use walk::{download_and_decode, ErrorPolicy, WalkOptions, WalkStats, Walker};
