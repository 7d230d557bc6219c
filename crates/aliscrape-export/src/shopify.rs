//! Projection of normalized records onto Shopify product-import rows.

use aliscrape_core::{format_price, resolve_display_price, CommerceRow, NormalizedRecord};

const PRODUCT_CATEGORY: &str = "Uncategorized";
const PUBLISHED: &str = "FALSE";
const INVENTORY_TRACKER: &str = "shopify";
const INVENTORY_QTY: &str = "100";
const INVENTORY_POLICY: &str = "continue";
const FULFILLMENT_SERVICE: &str = "manual";
/// Imported products land as drafts for review before publishing.
const STATUS: &str = "draft";

/// Maps one record and its hosted photo URLs onto import rows.
///
/// The first row carries every product column plus the first photo (or an
/// empty `Image Src` when there are none). Each further photo gets an
/// image-only row with its 1-based position. Every row carries `handle`.
#[must_use]
pub fn project(
    record: &NormalizedRecord,
    hosted_photo_urls: &[String],
    handle: &str,
) -> Vec<CommerceRow> {
    let product = CommerceRow {
        handle: handle.to_owned(),
        title: record.title.clone(),
        body_html: record.commerce_body(),
        product_category: PRODUCT_CATEGORY.to_owned(),
        tags: record.title.clone(),
        published: PUBLISHED.to_owned(),
        variant_inventory_tracker: INVENTORY_TRACKER.to_owned(),
        variant_inventory_qty: INVENTORY_QTY.to_owned(),
        variant_inventory_policy: INVENTORY_POLICY.to_owned(),
        variant_fulfillment_service: FULFILLMENT_SERVICE.to_owned(),
        variant_price: format_price(resolve_display_price(record)),
        image_src: hosted_photo_urls.first().cloned().unwrap_or_default(),
        image_position: "1".to_owned(),
        status: STATUS.to_owned(),
        ..CommerceRow::default()
    };

    std::iter::once(product)
        .chain(
            hosted_photo_urls
                .iter()
                .enumerate()
                .skip(1)
                .map(|(idx, url)| CommerceRow::image_only(handle, url, idx + 1)),
        )
        .collect()
}

/// Projects several products into one import, assigning handles `1, 2, 3, ...`
/// in input order.
#[must_use]
pub fn project_batch<'a, I>(products: I) -> Vec<CommerceRow>
where
    I: IntoIterator<Item = (&'a NormalizedRecord, &'a [String])>,
{
    products
        .into_iter()
        .enumerate()
        .flat_map(|(idx, (record, urls))| project(record, urls, &(idx + 1).to_string()))
        .collect()
}
