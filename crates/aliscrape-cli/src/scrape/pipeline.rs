//! Per-item pipeline: fetch, normalize, upload, ready for projection.

use aliscrape_core::NormalizedRecord;
use aliscrape_scraper::normalize::upload_folders;

use super::ScrapeContext;

/// One successfully scraped item.
pub(super) struct ScrapedItem {
    pub record: NormalizedRecord,
    /// Hosted main-photo URLs in gallery order, or the source links when
    /// uploads are off.
    pub hosted_photos: Vec<String>,
}

/// Fetches, normalizes and uploads one item.
///
/// # Errors
///
/// Fails when the item payload cannot be fetched or lacks its id or rating.
/// Reviews and individual photo uploads fail soft.
pub(super) async fn scrape_item(
    ctx: &ScrapeContext,
    item_id: &str,
) -> anyhow::Result<ScrapedItem> {
    let pair = ctx.datahub.fetch_item_pair(item_id).await?;
    let record = ctx.normalizer.normalize(&pair.item, pair.reviews.as_ref())?;
    let (main_folder, review_folder) = upload_folders(item_id);

    let hosted_photos = match &ctx.uploader {
        Some(uploader) => {
            uploader
                .upload_photos(&record.main_photo_links, &main_folder)
                .await
        }
        None => record.main_photo_links.clone(),
    };

    if ctx.options.review_photos && record.has_review_photos() {
        if let Some(uploader) = &ctx.uploader {
            let uploaded = uploader
                .upload_photos(&record.reviews_photo_links, &review_folder)
                .await;
            tracing::info!(
                item_id,
                uploaded = uploaded.len(),
                requested = record.reviews_photo_links.len(),
                "review photos uploaded"
            );
        }
    }

    tracing::info!(item_id, photos = hosted_photos.len(), "item scraped");
    Ok(ScrapedItem {
        record,
        hosted_photos,
    })
}

/// Scrapes items one after another, skipping failures.
///
/// Items run sequentially because the data API is rate limited; the client
/// paces the requests.
pub(super) async fn scrape_items(ctx: &ScrapeContext, item_ids: &[String]) -> Vec<ScrapedItem> {
    let mut items = Vec::with_capacity(item_ids.len());
    let mut failed: usize = 0;

    for item_id in item_ids {
        match scrape_item(ctx, item_id).await {
            Ok(item) => items.push(item),
            Err(e) => {
                failed += 1;
                tracing::error!(item_id = %item_id, error = %format!("{e:#}"), "skipping item");
            }
        }
    }

    if failed > 0 {
        tracing::warn!(
            failed,
            succeeded = items.len(),
            total = item_ids.len(),
            "some items failed"
        );
    }
    items
}
