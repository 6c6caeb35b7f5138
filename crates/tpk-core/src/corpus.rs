//! Mirroring the whole Tipitaka corpus.
//!
//! Walks the root table of contents, then fetches the stylesheet and its
//! companion, which no TOC document references.

use std::path::Path;

use crate::error::WalkError;
use crate::fetch::{Fetcher, HttpGet};
use crate::walk::{ErrorPolicy, WalkOptions, WalkStats, Walker};

pub const DEFAULT_URL_PREFIX: &str = "https://www.tipitaka.org/romn/";
pub const DEFAULT_ROOT_TOC: &str = "tipitaka_toc.xml";
pub const DEFAULT_ASSETS: [&str; 2] = ["cscd/tipitaka-latn.xsl", "cscd/tipitaka-latn.css"];

/// Where the corpus lives remotely and which files seed the mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLayout {
    pub url_prefix: String,
    pub root_toc: String,
    pub assets: Vec<String>,
}

impl Default for CorpusLayout {
    fn default() -> Self {
        Self {
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            root_toc: DEFAULT_ROOT_TOC.to_string(),
            assets: DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Downloads every TOC document, every leaf resource and the auxiliary assets
/// into `dest_dir`, stopping at the first failure.
pub fn download_corpus<C: HttpGet>(
    fetcher: &Fetcher<C>,
    layout: &CorpusLayout,
    dest_dir: &Path,
    overwrite: bool,
) -> Result<WalkStats, WalkError> {
    download_corpus_with(fetcher, layout, WalkOptions::new(dest_dir, overwrite))
}

/// Like [`download_corpus`] with explicit options. With `ErrorPolicy::Continue`
/// the assets are attempted even after walk failures, and all failures are
/// returned together.
pub fn download_corpus_with<C: HttpGet>(
    fetcher: &Fetcher<C>,
    layout: &CorpusLayout,
    opts: WalkOptions,
) -> Result<WalkStats, WalkError> {
    let policy = opts.on_error;
    tracing::info!(
        url_prefix = %layout.url_prefix,
        root = %layout.root_toc,
        dest = %opts.dest_dir.display(),
        overwrite = opts.overwrite,
        "downloading corpus"
    );

    let mut walker = Walker::new(fetcher, &layout.url_prefix, opts);
    let mut failures = Vec::new();

    let steps = std::iter::once(Step::Document(&layout.root_toc))
        .chain(layout.assets.iter().map(|a| Step::Asset(a.as_str())));
    for step in steps {
        let result = match step {
            Step::Document(src) => walker.walk_document(src),
            Step::Asset(rel) => walker.fetch_resource(rel),
        };
        if let Err(e) = result {
            match policy {
                ErrorPolicy::FailFast => return Err(e),
                ErrorPolicy::Continue => failures.extend(e.into_failures()),
            }
        }
    }

    if !failures.is_empty() {
        return Err(WalkError::Aggregate(failures));
    }
    let stats = walker.stats();
    tracing::info!(
        documents = stats.documents,
        downloaded = stats.downloaded,
        skipped = stats.skipped,
        bytes = stats.bytes,
        "corpus download complete"
    );
    Ok(stats)
}

enum Step<'a> {
    Document(&'a str),
    Asset(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::encode_utf16le;
    use crate::error::FetchError;
    use crate::fetch::testing::MockHttp;

    const PREFIX: &str = "https://example.com/romn/";

    fn layout() -> CorpusLayout {
        CorpusLayout {
            url_prefix: PREFIX.to_string(),
            ..CorpusLayout::default()
        }
    }

    fn url(rel: &str) -> String {
        format!("{}{}", PREFIX, rel)
    }

    fn corpus() -> MockHttp {
        MockHttp::new()
            .with(
                &url("tipitaka_toc.xml"),
                encode_utf16le(
                    r#"<?xml version="1.0" encoding="UTF-16"?>
<tree>
  <tree text="A" src="sub.xml"/>
  <tree text="B" action="leaf.txt"/>
</tree>"#,
                ),
            )
            .with(
                &url("sub.xml"),
                encode_utf16le(r#"<tree><tree text="C" action="cscd/c.xml"/></tree>"#),
            )
            .with(&url("leaf.txt"), "leaf")
            .with(&url("cscd/c.xml"), "c")
            .with(&url("cscd/tipitaka-latn.xsl"), "xsl")
            .with(&url("cscd/tipitaka-latn.css"), "css")
    }

    #[test]
    fn full_run_fetches_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(corpus());
        let stats = download_corpus(&fetcher, &layout(), dir.path(), false).unwrap();

        assert_eq!(
            fetcher.client().requested(),
            vec![
                url("tipitaka_toc.xml"),
                url("sub.xml"),
                url("cscd/c.xml"),
                url("leaf.txt"),
                url("cscd/tipitaka-latn.xsl"),
                url("cscd/tipitaka-latn.css"),
            ]
        );
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.downloaded, 6);
        assert_eq!(stats.skipped, 0);
        assert_eq!(std::fs::read(dir.path().join("cscd/tipitaka-latn.css")).unwrap(), b"css");
    }

    #[test]
    fn second_run_makes_no_requests() {
        let dir = tempfile::tempdir().unwrap();
        let first = Fetcher::new(corpus());
        download_corpus(&first, &layout(), dir.path(), false).unwrap();

        let second = Fetcher::new(corpus());
        let stats = download_corpus(&second, &layout(), dir.path(), false).unwrap();
        assert!(second.client().requested().is_empty());
        assert_eq!(stats.skipped, 6);
        assert_eq!(stats.documents, 2);
    }

    #[test]
    fn walk_failure_skips_assets() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(corpus().with_status(&url("leaf.txt"), 503));
        let err = download_corpus(&fetcher, &layout(), dir.path(), false).unwrap_err();
        assert!(matches!(
            err,
            WalkError::Fetch(FetchError::Status { status: 503, .. })
        ));
        let requested = fetcher.client().requested();
        assert_eq!(requested.last(), Some(&url("leaf.txt")));
        assert!(!requested.contains(&url("cscd/tipitaka-latn.xsl")));
    }

    #[test]
    fn continue_still_fetches_assets() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(corpus().with_status(&url("sub.xml"), 404));
        let mut opts = WalkOptions::new(dir.path(), false);
        opts.on_error = ErrorPolicy::Continue;

        match download_corpus_with(&fetcher, &layout(), opts) {
            Err(WalkError::Aggregate(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected aggregate, got {:?}", other),
        }
        assert!(dir.path().join("leaf.txt").exists());
        assert!(dir.path().join("cscd/tipitaka-latn.xsl").exists());
        assert!(dir.path().join("cscd/tipitaka-latn.css").exists());
    }
}
