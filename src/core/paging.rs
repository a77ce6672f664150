//! Continuation over `odata.nextLink` list pages.

pub use crate::domain::models::PagedList;

use crate::core::client::BatchServiceClient;
use crate::domain::options::RequestOptions;
use crate::utils::error::{BatchClientError, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

impl BatchServiceClient {
    /// Fetches the page a previous list response pointed at.
    ///
    /// The link carries its own query string (`$skiptoken`, the original
    /// filter and `api-version`); only request options are added to it.
    pub async fn list_next<T: DeserializeOwned>(
        &self,
        next_link: &str,
        options: &RequestOptions,
    ) -> Result<PagedList<T>> {
        let url = self.resolve_next_link(next_link)?;
        debug!("Following list continuation {}", url.path());
        let response = self.execute(Method::GET, url, options, None).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Follows continuation links from `first_page` and concatenates every page.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        first_page: PagedList<T>,
        options: &RequestOptions,
    ) -> Result<Vec<T>> {
        let mut items = first_page.value;
        let mut next_link = first_page.next_link;
        let mut seen = HashSet::new();
        let mut pages = 1usize;

        while let Some(link) = next_link {
            if !seen.insert(link.clone()) {
                return Err(BatchClientError::PagingError {
                    message: format!("continuation link repeated after {} pages: {}", pages, link),
                });
            }
            let page: PagedList<T> = self.list_next(&link, options).await?;
            pages += 1;
            items.extend(page.value);
            next_link = page.next_link;
        }

        debug!("Collected {} items across {} pages", items.len(), pages);
        Ok(items)
    }

    fn resolve_next_link(&self, next_link: &str) -> Result<Url> {
        let url = match Url::parse(next_link) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => self.base_url().join(next_link)?,
            Err(e) => return Err(e.into()),
        };

        // Credentials are attached to the request, so the link must stay on the account origin.
        if url.scheme() != self.base_url().scheme()
            || url.host_str() != self.base_url().host_str()
            || url.port_or_known_default() != self.base_url().port_or_known_default()
        {
            return Err(BatchClientError::PagingError {
                message: format!(
                    "continuation link {} points outside the account {}",
                    next_link,
                    self.base_url()
                ),
            });
        }
        Ok(url)
    }
}
