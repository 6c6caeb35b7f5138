//! Conditional download of a single resource.
//!
//! If the destination exists and overwrite is off, nothing is requested.
//! Otherwise one GET is issued and the body is written byte-for-byte. There is
//! no retry; a failed run is resumed by running it again.

mod client;
mod storage;

pub use client::{CurlClient, HttpGet, HttpResponse};
pub use storage::{temp_path, write_atomic, TEMP_SUFFIX};

use std::path::Path;

use crate::error::FetchError;

/// What [`Fetcher::fetch`] did for a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Destination already existed; no request was made.
    Skipped,
    /// Body of the given length was downloaded and written.
    Downloaded(u64),
}

/// Skip-if-exists downloader over an [`HttpGet`] client.
#[derive(Debug, Clone, Default)]
pub struct Fetcher<C> {
    client: C,
}

impl<C: HttpGet> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn fetch(&self, url: &str, dest: &Path, overwrite: bool) -> Result<FetchOutcome, FetchError> {
        if !overwrite && dest.is_file() {
            tracing::debug!(url, dest = %dest.display(), "exists, skipping");
            return Ok(FetchOutcome::Skipped);
        }

        tracing::debug!(url, dest = %dest.display(), "downloading");
        let response = self.client.get(url)?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }

        write_atomic(dest, &response.body)?;
        Ok(FetchOutcome::Downloaded(response.body.len() as u64))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory HTTP double that records every requested URL.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::{HttpGet, HttpResponse};
    use crate::error::FetchError;

    #[derive(Debug, Default)]
    pub struct MockHttp {
        routes: HashMap<String, HttpResponse>,
        pub requests: RefCell<Vec<String>>,
    }

    impl MockHttp {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.routes.insert(
                url.to_string(),
                HttpResponse {
                    status: 200,
                    body: body.into(),
                },
            );
            self
        }

        pub fn with_status(mut self, url: &str, status: u32) -> Self {
            self.routes.insert(
                url.to_string(),
                HttpResponse {
                    status,
                    body: Vec::new(),
                },
            );
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    impl HttpGet for MockHttp {
        fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
            self.requests.borrow_mut().push(url.to_string());
            Ok(self.routes.get(url).cloned().unwrap_or(HttpResponse {
                status: 404,
                body: Vec::new(),
            }))
        }
    }
}
