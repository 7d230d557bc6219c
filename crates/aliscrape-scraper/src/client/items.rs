use serde_json::Value;

use super::DatahubClient;
use crate::error::ScraperError;
use crate::types::RawItemPair;

const ITEM_DETAIL_ENDPOINT: &str = "item_detail_7";
const ITEM_REVIEW_ENDPOINT: &str = "item_review";

impl DatahubClient {
    /// Fetches the item-detail payload for one item.
    ///
    /// # Errors
    ///
    /// Any error from the request; see [`DatahubClient`].
    pub async fn fetch_item(&self, item_id: &str) -> Result<Value, ScraperError> {
        tracing::debug!(item_id, "fetching item detail");
        self.get_json(
            ITEM_DETAIL_ENDPOINT,
            &[("itemId", item_id), ("region", self.config.region.as_str())],
        )
        .await
    }

    /// Fetches the first page of reviews for one item.
    ///
    /// # Errors
    ///
    /// Any error from the request; see [`DatahubClient`].
    pub async fn fetch_reviews(&self, item_id: &str) -> Result<Value, ScraperError> {
        tracing::debug!(item_id, "fetching item reviews");
        self.get_json(
            ITEM_REVIEW_ENDPOINT,
            &[
                ("itemId", item_id),
                ("page", "1"),
                ("sort", "default"),
                ("filter", "allReviews"),
            ],
        )
        .await
    }

    /// Fetches the item payload and, best-effort, its reviews payload.
    ///
    /// A failed reviews call is logged and yields `reviews: None`.
    ///
    /// # Errors
    ///
    /// Returns the item-detail request's error; review errors never propagate.
    pub async fn fetch_item_pair(&self, item_id: &str) -> Result<RawItemPair, ScraperError> {
        let item = self.fetch_item(item_id).await?;
        let reviews = match self.fetch_reviews(item_id).await {
            Ok(reviews) => Some(reviews),
            Err(e) => {
                tracing::warn!(item_id, error = %e, "reviews unavailable, continuing without");
                None
            }
        };
        Ok(RawItemPair { item, reviews })
    }
}
