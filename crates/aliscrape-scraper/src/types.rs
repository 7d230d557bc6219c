//! Raw payloads returned by the marketplace data API.
//!
//! Both payloads stay untyped `serde_json::Value`: the API shape drifts
//! between endpoint versions and any field may be missing, so the normalizer
//! reads individual paths instead of deserializing into fixed structs.
//!
//! Paths the normalizer reads from the item-detail payload:
//!
//! - `result.item.itemId`: number or string, required
//! - `result.item.{title, itemUrl, wishCount, images}`
//! - `result.item.properties.list[].{name, value}`
//! - `result.item.description.{text, html, images}`
//! - `result.item.sku.def.{price, promotionPrice}`: number, text, or range text
//! - `result.reviews.averageStar`: number or numeric text, required
//! - `result.delivery.shippingList[0].note`: array of display strings
//!
//! From the reviews payload: `result.resultList[].review.reviewImages`.

use serde_json::Value;

/// Item-detail payload plus the optional reviews payload for the same item.
#[derive(Debug, Clone)]
pub struct RawItemPair {
    pub item: Value,
    /// `None` when the reviews call failed or reported an error.
    pub reviews: Option<Value>,
}
