//! Blocking HTTP GET via libcurl.

use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::FetchError;

/// Status and full body of a GET response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to GET a URL. Implemented by [`CurlClient`]; tests substitute doubles.
pub trait HttpGet {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

impl<T: HttpGet + ?Sized> HttpGet for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        (**self).get(url)
    }
}

/// One curl Easy handle per request, follows redirects.
#[derive(Debug, Clone)]
pub struct CurlClient {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: Option<String>,
}

impl CurlClient {
    pub fn new(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }

    fn perform(&self, url: &str) -> Result<HttpResponse, curl::Error> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(HttpResponse { status, body })
    }
}

impl Default for CurlClient {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl HttpGet for CurlClient {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.perform(url).map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
