use serde::{Deserialize, Serialize};

/// A marketplace item reshaped into the flat record consumed by the JSON and
/// CSV exporters.
///
/// Every field except `rating` has an empty default; the normalizer only
/// fails a record when the item id or the rating cannot be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizedRecord {
    /// Absolute item page URL, e.g. `"https://www.aliexpress.com/item/1005.html"`.
    pub link: String,
    pub title: String,
    /// Promotion price of the default SKU as the API returned it. May hold a
    /// delimited range such as `"9.99 - 12.99"` or be empty.
    pub discount_price: String,
    /// List price of the default SKU, same shape as `discount_price`.
    pub original_price: String,
    /// Average review star rating.
    pub rating: f64,
    /// Wishlist count.
    pub likes: i64,
    /// First shipping option, `"<summary>\nDelivery: <eta>"`, or empty.
    pub main_delivery_option: String,
    /// Plain-text description with markup and injected script residue removed.
    pub description: String,
    /// `"name: value"` lines from the item property list.
    pub specifications: String,
    pub main_photo_links: Vec<String>,
    pub reviews_photo_links: Vec<String>,
    /// Media-host folders for the main photos and review photos, in that order.
    pub hosting_folder_link: [String; 2],
}

impl NormalizedRecord {
    /// Returns the product body used by the commerce import: specifications
    /// followed by the description, trimmed.
    #[must_use]
    pub fn commerce_body(&self) -> String {
        format!("{}\n{}", self.specifications, self.description)
            .trim()
            .to_string()
    }

    /// Returns `true` if the record has any review photos to upload.
    #[must_use]
    pub fn has_review_photos(&self) -> bool {
        !self.reviews_photo_links.is_empty()
    }
}
