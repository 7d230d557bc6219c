use serde_json::Value;

use super::DatahubClient;
use crate::error::ScraperError;
use crate::links::item_ids_from_search;

const ITEM_SEARCH_ENDPOINT: &str = "item_search_4";

/// Result-page size requested from the search endpoint.
const SEARCH_PAGE_SIZE: u32 = 50;

impl DatahubClient {
    /// Runs a best-selling-first search and returns the raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::EmptySearch`] when `result.resultList` is
    /// missing or empty, or any error from the request.
    pub async fn search(&self, query: &str, size: u32) -> Result<Value, ScraperError> {
        let size = size.to_string();
        let payload = self
            .get_json(
                ITEM_SEARCH_ENDPOINT,
                &[
                    ("q", query),
                    ("page", "1"),
                    ("sort", "total_tranpro_desc"),
                    ("region", self.config.region.as_str()),
                    ("shipTo", self.config.region.as_str()),
                    ("size", size.as_str()),
                ],
            )
            .await?;

        let found = payload
            .pointer("/result/resultList")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        if found == 0 {
            return Err(ScraperError::EmptySearch {
                query: query.to_owned(),
            });
        }
        tracing::info!(query, found, "search returned items");
        Ok(payload)
    }

    /// Searches and returns up to `limit` item ids in result order.
    ///
    /// # Errors
    ///
    /// Same as [`DatahubClient::search`]; also [`ScraperError::EmptySearch`]
    /// when no result entry carries an id.
    pub async fn search_item_ids(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<String>, ScraperError> {
        let payload = self.search(query, SEARCH_PAGE_SIZE).await?;
        let mut ids = item_ids_from_search(&payload);
        if ids.is_empty() {
            return Err(ScraperError::EmptySearch {
                query: query.to_owned(),
            });
        }
        ids.truncate(limit);
        Ok(ids)
    }
}
