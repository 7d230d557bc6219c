//! Normalization from raw data-API payloads to [`aliscrape_core::NormalizedRecord`].
//!
//! Each field has its own extractor returning `Option`; a `None` degrades to
//! the field's empty value. Only the item id and the rating are required.

use aliscrape_core::{resolve_display_price_values, NormalizedRecord};
use serde_json::Value;

use crate::error::ScraperError;
use crate::text::description_text;

/// Media-host base for the folder links stamped onto each record.
const MEDIA_HOST_BASE: &str = "https://res.cloudinary.com";

/// Folder (under the item id) holding the uploaded main photos.
pub const MAIN_PHOTOS_FOLDER: &str = "MainPhotos";
/// Folder (under the item id) holding the uploaded review photos.
pub const REVIEW_PHOTOS_FOLDER: &str = "PhotoReview";

/// Turns raw item/review payloads into [`NormalizedRecord`]s.
///
/// Holds the media-host account name so hosting folder links can be derived
/// without global configuration.
#[derive(Debug, Clone)]
pub struct Normalizer {
    media_account: String,
}

impl Normalizer {
    #[must_use]
    pub fn new(media_account: impl Into<String>) -> Self {
        Self {
            media_account: media_account.into(),
        }
    }

    /// Normalizes one item-detail payload and its optional reviews payload.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::MissingIdentity`] if `result.item.itemId` or
    /// `result.reviews.averageStar` is absent or unreadable. All other fields
    /// fall back to empty values.
    pub fn normalize(
        &self,
        raw_item: &Value,
        raw_reviews: Option<&Value>,
    ) -> Result<NormalizedRecord, ScraperError> {
        let item_id = item_id(raw_item).ok_or_else(|| ScraperError::MissingIdentity {
            item_id: "<unknown>".to_owned(),
            field: "itemId",
        })?;
        let rating = rating(raw_item).ok_or_else(|| ScraperError::MissingIdentity {
            item_id: item_id.clone(),
            field: "averageStar",
        })?;

        let item = raw_item.pointer("/result/item");
        let description = item.and_then(|i| i.get("description"));
        let promotion_price = raw_item.pointer("/result/item/sku/def/promotionPrice");
        let price = raw_item.pointer("/result/item/sku/def/price");

        tracing::debug!(
            item_id = %item_id,
            rating,
            display_price = resolve_display_price_values(
                promotion_price.unwrap_or(&serde_json::Value::Null),
                price.unwrap_or(&serde_json::Value::Null),
            ),
            "normalizing item"
        );

        Ok(NormalizedRecord {
            link: item
                .and_then(|i| i.get("itemUrl"))
                .and_then(Value::as_str)
                .and_then(absolute_url)
                .unwrap_or_default(),
            title: item
                .and_then(|i| i.get("title"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            discount_price: price_text(promotion_price),
            original_price: price_text(price),
            rating,
            likes: likes(raw_item).unwrap_or_default(),
            main_delivery_option: delivery_option(raw_item).unwrap_or_default(),
            description: description_text(
                description.and_then(|d| d.get("text")).and_then(Value::as_str),
                description.and_then(|d| d.get("html")).and_then(Value::as_str),
            ),
            specifications: specifications(raw_item).unwrap_or_default(),
            main_photo_links: main_photo_links(raw_item),
            reviews_photo_links: raw_reviews.map(review_photo_links).unwrap_or_default(),
            hosting_folder_link: self.hosting_folder_links(&item_id),
        })
    }

    /// Media-host folder URLs for an item's main and review photos.
    #[must_use]
    pub fn hosting_folder_links(&self, item_id: &str) -> [String; 2] {
        [
            format!(
                "{MEDIA_HOST_BASE}/{}/{item_id}/{MAIN_PHOTOS_FOLDER}",
                self.media_account
            ),
            format!(
                "{MEDIA_HOST_BASE}/{}/{item_id}/{REVIEW_PHOTOS_FOLDER}",
                self.media_account
            ),
        ]
    }
}

/// Reads `result.item.itemId` as a string, accepting numeric ids.
#[must_use]
pub fn item_id(raw_item: &Value) -> Option<String> {
    scalar_text(raw_item.pointer("/result/item/itemId")?).filter(|id| !id.is_empty())
}

/// Upload folder names for an item's main photos and review photos.
#[must_use]
pub fn upload_folders(item_id: &str) -> (String, String) {
    (
        format!("{item_id}/{MAIN_PHOTOS_FOLDER}"),
        format!("{item_id}/{REVIEW_PHOTOS_FOLDER}"),
    )
}

/// Prefixes `https:` onto host-relative links. Links that already carry a
/// scheme are kept; blank links yield `None`.
#[must_use]
pub fn absolute_url(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        None
    } else if link.starts_with("//") {
        Some(format!("https:{link}"))
    } else if has_scheme(link) {
        Some(link.to_owned())
    } else {
        Some(format!("https://{link}"))
    }
}

/// `true` when `link` opens with `scheme://`, not merely containing it later.
fn has_scheme(link: &str) -> bool {
    link.split_once("://").is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

fn rating(raw_item: &Value) -> Option<f64> {
    match raw_item.pointer("/result/reviews/averageStar")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|r| r.is_finite())
}

fn likes(raw_item: &Value) -> Option<i64> {
    match raw_item.pointer("/result/item/wishCount")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Renders a raw price field as export text: strings pass through, numbers
/// use their JSON form, arrays join their scalar elements with `", "`.
fn price_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => scalar_text(other).unwrap_or_default(),
        None => String::new(),
    }
}

fn delivery_option(raw_item: &Value) -> Option<String> {
    let note = raw_item
        .pointer("/result/delivery/shippingList/0/note")?
        .as_array()?;
    let summary = note.first()?.as_str()?;
    let eta = note.get(1)?.as_str()?;
    Some(format!("{summary}\nDelivery: {eta}"))
}

fn specifications(raw_item: &Value) -> Option<String> {
    let properties = raw_item
        .pointer("/result/item/properties/list")?
        .as_array()?;
    let lines = properties
        .iter()
        .filter_map(|prop| {
            let name = prop.get("name").and_then(scalar_text).unwrap_or_default();
            let value = prop.get("value").and_then(scalar_text).unwrap_or_default();
            if name.is_empty() && value.is_empty() {
                None
            } else {
                Some(format!("{name}: {value}"))
            }
        })
        .collect::<Vec<_>>();
    Some(lines.join("\n"))
}

/// Description gallery first, item gallery as fallback.
fn main_photo_links(raw_item: &Value) -> Vec<String> {
    let from_description = link_list(raw_item.pointer("/result/item/description/images"));
    if from_description.is_empty() {
        link_list(raw_item.pointer("/result/item/images"))
    } else {
        from_description
    }
}

fn review_photo_links(raw_reviews: &Value) -> Vec<String> {
    raw_reviews
        .pointer("/result/resultList")
        .and_then(Value::as_array)
        .map(|reviews| {
            reviews
                .iter()
                .flat_map(|entry| link_list(entry.pointer("/review/reviewImages")))
                .collect()
        })
        .unwrap_or_default()
}

fn link_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|links| {
            links
                .iter()
                .filter_map(Value::as_str)
                .filter_map(absolute_url)
                .collect()
        })
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
