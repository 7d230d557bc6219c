//! Scrape command handlers.
//!
//! Each handler resolves the item ids to scrape, runs every item through the
//! pipeline and writes one export bundle. Per-item failures are logged and
//! skipped; a run fails only when no item succeeds.

mod pipeline;

use std::path::PathBuf;

use aliscrape_core::{AppConfig, NormalizedRecord};
use aliscrape_export::{export_bundle, project, project_batch, ExportPaths};
use aliscrape_media::{CloudinaryClient, CloudinaryConfig};
use aliscrape_scraper::{
    item_id_from_url, search_query_from_input, split_links, DatahubClient, DatahubConfig,
    Normalizer,
};
use anyhow::Context;
use chrono::NaiveDateTime;

/// Run-wide switches taken from the command line.
#[derive(Debug, Clone)]
pub(crate) struct ScrapeOptions {
    pub out_dir: PathBuf,
    /// Upload main photos to the media host; otherwise export source links.
    pub upload: bool,
    /// Also upload review photos into each item's review folder.
    pub review_photos: bool,
}

/// Clients and settings shared by every item in a run.
pub(crate) struct ScrapeContext {
    datahub: DatahubClient,
    normalizer: Normalizer,
    uploader: Option<CloudinaryClient>,
    options: ScrapeOptions,
}

impl ScrapeContext {
    pub(crate) fn new(
        datahub: DatahubClient,
        normalizer: Normalizer,
        uploader: Option<CloudinaryClient>,
        options: ScrapeOptions,
    ) -> Self {
        Self {
            datahub,
            normalizer,
            uploader,
            options,
        }
    }

    /// Builds the clients from configuration.
    ///
    /// Uploads are disabled with a warning when the media-host credentials
    /// are not configured.
    pub(crate) fn from_config(config: &AppConfig, options: ScrapeOptions) -> anyhow::Result<Self> {
        let datahub = DatahubClient::new(DatahubConfig::from_app_config(config))
            .context("building data API client")?;
        let normalizer = Normalizer::new(config.cloudinary_cloud_name.clone());

        let uploader = if !options.upload {
            None
        } else if config.uploads_enabled() {
            CloudinaryConfig::from_app_config(config)
                .map(CloudinaryClient::new)
                .transpose()
                .context("building media upload client")?
        } else {
            tracing::warn!(
                "CLOUDINARY_API_KEY / CLOUDINARY_API_SECRET not set; exporting source photo links"
            );
            None
        };

        Ok(Self::new(datahub, normalizer, uploader, options))
    }
}

/// Scrapes one item; export files are named after its id.
///
/// # Errors
///
/// Fails when the link carries no item id, the item cannot be scraped, or
/// the export cannot be written.
pub(crate) async fn run_single(ctx: &ScrapeContext, link: &str) -> anyhow::Result<ExportPaths> {
    let item_id =
        item_id_from_url(link).with_context(|| format!("no item id found in link '{link}'"))?;
    let item = pipeline::scrape_item(ctx, &item_id)
        .await
        .with_context(|| format!("scraping item {item_id}"))?;

    let rows = project(&item.record, &item.hosted_photos, "1");
    write_exports(ctx, &item_id, &[item.record], &rows)
}

/// Searches and scrapes the first `limit` results.
///
/// # Errors
///
/// Fails when the query is blank, the search returns nothing, every item
/// fails, or the export cannot be written.
pub(crate) async fn run_query(
    ctx: &ScrapeContext,
    query: &str,
    limit: usize,
) -> anyhow::Result<ExportPaths> {
    let search = search_query_from_input(query).context("search query is empty")?;
    tracing::info!(query = %search, limit, "searching");
    let item_ids = ctx
        .datahub
        .search_item_ids(&search, limit)
        .await
        .with_context(|| format!("searching for '{search}'"))?;
    run_batch(ctx, &item_ids).await
}

/// Scrapes every item in a comma-separated list of links.
///
/// # Errors
///
/// Fails when no link carries an item id, every item fails, or the export
/// cannot be written.
pub(crate) async fn run_multiple(ctx: &ScrapeContext, links: &str) -> anyhow::Result<ExportPaths> {
    let item_ids = item_ids_from_links(&split_links(links));
    if item_ids.is_empty() {
        anyhow::bail!("no item ids found in '{links}'");
    }
    run_batch(ctx, &item_ids).await
}

async fn run_batch(ctx: &ScrapeContext, item_ids: &[String]) -> anyhow::Result<ExportPaths> {
    let items = pipeline::scrape_items(ctx, item_ids).await;
    if items.is_empty() {
        anyhow::bail!("all {} items failed", item_ids.len());
    }

    let rows = project_batch(
        items
            .iter()
            .map(|item| (&item.record, item.hosted_photos.as_slice())),
    );
    let records: Vec<NormalizedRecord> = items.into_iter().map(|item| item.record).collect();
    let stem = batch_stem(chrono::Local::now().naive_local());
    write_exports(ctx, &stem, &records, &rows)
}

fn write_exports(
    ctx: &ScrapeContext,
    stem: &str,
    records: &[NormalizedRecord],
    rows: &[aliscrape_core::CommerceRow],
) -> anyhow::Result<ExportPaths> {
    export_bundle(&ctx.options.out_dir, stem, records, rows).with_context(|| {
        format!(
            "writing exports '{stem}' to {}",
            ctx.options.out_dir.display()
        )
    })
}

/// Item ids for each link, in order; links without an id are logged and
/// dropped.
fn item_ids_from_links(links: &[String]) -> Vec<String> {
    links
        .iter()
        .filter_map(|link| {
            let id = item_id_from_url(link);
            if id.is_none() {
                tracing::warn!(link = %link, "skipping link without an item id");
            }
            id
        })
        .collect()
}

/// File stem for multi-item exports, e.g. `items_20250314_093000`.
fn batch_stem(now: NaiveDateTime) -> String {
    format!("items_{}", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
