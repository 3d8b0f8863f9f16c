use crate::utils::error::{LoaderError, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Issues GET requests against one API host and reassembles paginated result
/// sets by following `Link: <...>; rel="next"` headers. Clones share the
/// underlying client and the in-flight request limit.
#[derive(Clone)]
pub struct RequestDispatcher {
    client: Client,
    base_url: Url,
    limiter: Arc<Semaphore>,
}

impl RequestDispatcher {
    pub fn new(base_url: &str, concurrent_requests: usize) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
            limiter: Arc::new(Semaphore::new(concurrent_requests.max(1))),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn absolute(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get(&self, url: Url, params: &[(String, String)]) -> Result<Response> {
        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|_| LoaderError::ProcessingError {
                message: "request limiter closed".to_string(),
            })?;

        tracing::debug!("GET {}", url);
        let mut request = self.client.get(url.clone());
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(LoaderError::StatusError {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    /// Single unpaginated GET, decoded as JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = self.absolute(path)?;
        let response = self.get(url, params).await?;
        Ok(response.json().await?)
    }

    /// Depaginated GET: all pages concatenated into one result set.
    pub async fn get_depaginated<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Vec<T>> {
        let pages = self.get_pages(path, params).await?;
        Ok(pages.into_iter().flatten().collect())
    }

    /// Same traversal as [`get_depaginated`](Self::get_depaginated), pages
    /// kept separate so callers can deliver them as they see fit.
    pub async fn get_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Vec<Vec<T>>> {
        let mut pages = Vec::new();
        let mut next = Some(self.absolute(path)?);
        let mut first = true;

        while let Some(url) = next.take() {
            // Query params apply to the first request only; the next-page URL
            // from the Link header already carries its own.
            let response = if first {
                self.get(url, params).await?
            } else {
                self.get(url, &[]).await?
            };
            first = false;

            next = next_link(response.headers())?;
            let page: Vec<T> = response.json().await?;
            tracing::debug!("page {} with {} items", pages.len() + 1, page.len());
            pages.push(page);
        }

        Ok(pages)
    }
}

/// Extracts the `rel="next"` target from an RFC 5988 Link header, if any.
fn next_link(headers: &HeaderMap) -> Result<Option<Url>> {
    let Some(value) = headers.get(reqwest::header::LINK) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| LoaderError::PaginationError {
        message: "Link header is not valid UTF-8".to_string(),
    })?;

    for part in value.split(',') {
        let mut segments = part.split(';');
        let target = segments.next().unwrap_or("").trim();
        if !segments.any(|s| s.trim() == r#"rel="next""#) {
            continue;
        }
        let target = target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .ok_or_else(|| LoaderError::PaginationError {
                message: format!("malformed Link target: {}", target),
            })?;
        let url = Url::parse(target).map_err(|e| LoaderError::PaginationError {
            message: format!("invalid next-page URL {}: {}", target, e),
        })?;
        return Ok(Some(url));
    }

    Ok(None)
}
