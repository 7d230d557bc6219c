//! Row type for the Shopify product-import CSV.
//!
//! Field order is column order: the CSV writer emits headers from the serde
//! names below, so reordering fields reorders the export.

use serde::{Deserialize, Serialize};

/// One row of a Shopify product-import file.
///
/// A product spans several rows sharing one `handle`: the first carries every
/// product column, the rest only an extra image and its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommerceRow {
    #[serde(rename = "Handle")]
    pub handle: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Body (HTML)")]
    pub body_html: String,
    #[serde(rename = "Vendor")]
    pub vendor: String,
    #[serde(rename = "Product Category")]
    pub product_category: String,
    #[serde(rename = "Type")]
    pub product_type: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Published")]
    pub published: String,
    #[serde(rename = "Option1 Name")]
    pub option1_name: String,
    #[serde(rename = "Option1 Value")]
    pub option1_value: String,
    #[serde(rename = "Option2 Name")]
    pub option2_name: String,
    #[serde(rename = "Option2 Value")]
    pub option2_value: String,
    #[serde(rename = "Option3 Name")]
    pub option3_name: String,
    #[serde(rename = "Option3 Value")]
    pub option3_value: String,
    #[serde(rename = "Variant SKU")]
    pub variant_sku: String,
    #[serde(rename = "Variant Grams")]
    pub variant_grams: String,
    #[serde(rename = "Variant Inventory Tracker")]
    pub variant_inventory_tracker: String,
    #[serde(rename = "Variant Inventory Qty")]
    pub variant_inventory_qty: String,
    #[serde(rename = "Variant Inventory Policy")]
    pub variant_inventory_policy: String,
    #[serde(rename = "Variant Fulfillment Service")]
    pub variant_fulfillment_service: String,
    #[serde(rename = "Variant Price")]
    pub variant_price: String,
    #[serde(rename = "Variant Compare At Price")]
    pub variant_compare_at_price: String,
    #[serde(rename = "Variant Requires Shipping")]
    pub variant_requires_shipping: String,
    #[serde(rename = "Variant Taxable")]
    pub variant_taxable: String,
    #[serde(rename = "Variant Barcode")]
    pub variant_barcode: String,
    #[serde(rename = "Image Src")]
    pub image_src: String,
    #[serde(rename = "Image Position")]
    pub image_position: String,
    #[serde(rename = "Image Alt Text")]
    pub image_alt_text: String,
    #[serde(rename = "Gift Card")]
    pub gift_card: String,
    #[serde(rename = "SEO Title")]
    pub seo_title: String,
    #[serde(rename = "SEO Description")]
    pub seo_description: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl CommerceRow {
    /// Builds a continuation row that only attaches another image to the
    /// product identified by `handle`.
    #[must_use]
    pub fn image_only(handle: &str, image_src: &str, image_position: usize) -> Self {
        Self {
            handle: handle.to_owned(),
            image_src: image_src.to_owned(),
            image_position: image_position.to_string(),
            ..Self::default()
        }
    }

    /// Returns `true` if every column except `Handle`, `Image Src` and
    /// `Image Position` is empty.
    #[must_use]
    pub fn is_image_only(&self) -> bool {
        let blank = Self {
            handle: self.handle.clone(),
            image_src: self.image_src.clone(),
            image_position: self.image_position.clone(),
            ..Self::default()
        };
        *self == blank
    }
}
