//! HTTP adapter for a Sanity-style content store query endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::application::pagination::PageWindow;
use crate::application::store::{ContentStore, StoreError};
use crate::config::StoreSettings;
use crate::domain::entries::CatalogEntry;
use crate::domain::taxonomy::FilterSelection;
use crate::infra::error::InfraError;
use crate::infra::groq;

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Vec<CatalogEntry>,
}

/// [`ContentStore`] backed by the store's HTTP query endpoint.
pub struct HttpContentStore {
    client: Client,
    query_url: Url,
}

impl HttpContentStore {
    pub fn new(settings: &StoreSettings) -> Result<Self, InfraError> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| InfraError::http(err.to_string()))?;
        Ok(Self {
            client,
            query_url: settings.query_url.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("elytra/", env!("CARGO_PKG_VERSION"))
    }

    fn page_url(&self, filter: Option<&FilterSelection>, page: u32) -> Result<Url, StoreError> {
        let query = groq::entries_page(filter, PageWindow::for_page(page));
        let mut url = self.query_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.body);
            for (name, value) in &query.params {
                // The store expects parameters as `$name=<json literal>`.
                let literal =
                    serde_json::to_string(value).map_err(|err| StoreError::decode(err.to_string()))?;
                pairs.append_pair(&format!("${name}"), &literal);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn fetch_page(
        &self,
        filter: Option<&FilterSelection>,
        page: u32,
    ) -> Result<Vec<CatalogEntry>, StoreError> {
        let url = self.page_url(filter, page)?;
        debug!(page, filtered = filter.is_some(), "fetching catalog page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| StoreError::transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let payload: QueryResponse = response
            .json()
            .await
            .map_err(|err| StoreError::decode(err.to_string()))?;
        Ok(payload.result)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::taxonomy::TaxonCategory;

    fn store() -> HttpContentStore {
        let settings = StoreSettings {
            query_url: Url::parse(
                "https://catalog.example.api.sanity.io/v2021-10-21/data/query/production",
            )
            .expect("valid url"),
            request_timeout: Duration::from_secs(5),
        };
        HttpContentStore::new(&settings).expect("client built")
    }

    #[test]
    fn page_url_carries_query_and_bound_parameter() {
        let filter = FilterSelection::new(TaxonCategory::Order, "Coleoptera").expect("valid");
        let url = store().page_url(Some(&filter), 1).expect("built url");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        assert!(
            pairs
                .iter()
                .any(|(name, value)| name == "query" && value.contains("[20...40]"))
        );
        assert!(
            pairs
                .iter()
                .any(|(name, value)| name == "$taxon" && value == "\"Coleoptera\"")
        );
    }

    #[test]
    fn unfiltered_page_url_has_no_taxon_parameter() {
        let url = store().page_url(None, 0).expect("built url");
        assert!(url.query_pairs().all(|(name, _)| name != "$taxon"));
    }
}
