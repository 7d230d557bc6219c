//! JSON and CSV export files.
//!
//! Each export run writes three files sharing one stem: `<stem>.json` with
//! the full records, `<stem>.csv` with the same records flattened, and
//! `<stem>_shopify.csv` with the import rows.

use std::path::{Path, PathBuf};

use aliscrape_core::{CommerceRow, NormalizedRecord};
use serde::Serialize;

use crate::error::ExportError;

/// Files written by [`export_bundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub json: PathBuf,
    pub records_csv: PathBuf,
    pub shopify_csv: PathBuf,
}

/// Flat CSV shape of a [`NormalizedRecord`]: list fields are encoded as JSON
/// arrays so each stays in a single cell.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RecordCsvRow<'a> {
    link: &'a str,
    title: &'a str,
    discount_price: &'a str,
    original_price: &'a str,
    rating: f64,
    likes: i64,
    main_delivery_option: &'a str,
    description: &'a str,
    specifications: &'a str,
    main_photo_links: String,
    reviews_photo_links: String,
    hosting_folder_link: String,
}

impl<'a> RecordCsvRow<'a> {
    fn from_record(record: &'a NormalizedRecord) -> Result<Self, ExportError> {
        Ok(Self {
            link: &record.link,
            title: &record.title,
            discount_price: &record.discount_price,
            original_price: &record.original_price,
            rating: record.rating,
            likes: record.likes,
            main_delivery_option: &record.main_delivery_option,
            description: &record.description,
            specifications: &record.specifications,
            main_photo_links: serde_json::to_string(&record.main_photo_links)?,
            reviews_photo_links: serde_json::to_string(&record.reviews_photo_links)?,
            hosting_folder_link: serde_json::to_string(&record.hosting_folder_link)?,
        })
    }
}

/// Pretty-printed JSON with non-ASCII text kept as-is.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if `value` cannot be serialized.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes [`render_json`] output to `path`.
///
/// # Errors
///
/// Returns [`ExportError::Json`] on serialization failure or
/// [`ExportError::Io`] if the file cannot be written.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExportError> {
    std::fs::write(path, render_json(value)?)?;
    tracing::info!(path = %path.display(), "JSON export written");
    Ok(())
}

/// Records as CSV with a header row. An empty slice renders as an empty
/// string.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] or [`ExportError::Json`] if a row cannot be
/// serialized.
pub fn render_records_csv(records: &[NormalizedRecord]) -> Result<String, ExportError> {
    let rows = records
        .iter()
        .map(RecordCsvRow::from_record)
        .collect::<Result<Vec<_>, _>>()?;
    render_csv(&rows)
}

/// Writes [`render_records_csv`] output to `path`.
///
/// # Errors
///
/// See [`render_records_csv`]; also [`ExportError::Io`] on write failure.
pub fn save_records_csv(path: &Path, records: &[NormalizedRecord]) -> Result<(), ExportError> {
    std::fs::write(path, render_records_csv(records)?)?;
    tracing::info!(path = %path.display(), records = records.len(), "records CSV written");
    Ok(())
}

/// Import rows as CSV, headers in Shopify column order.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if a row cannot be serialized.
pub fn render_commerce_csv(rows: &[CommerceRow]) -> Result<String, ExportError> {
    render_csv(rows)
}

/// Writes [`render_commerce_csv`] output to `path`.
///
/// # Errors
///
/// See [`render_commerce_csv`]; also [`ExportError::Io`] on write failure.
pub fn save_commerce_csv(path: &Path, rows: &[CommerceRow]) -> Result<(), ExportError> {
    std::fs::write(path, render_commerce_csv(rows)?)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Shopify CSV written");
    Ok(())
}

/// Writes `<stem>.json`, `<stem>.csv` and `<stem>_shopify.csv` under `dir`,
/// creating `dir` if needed.
///
/// # Errors
///
/// Returns the first [`ExportError`] hit; files written before it are left
/// in place.
pub fn export_bundle(
    dir: &Path,
    stem: &str,
    records: &[NormalizedRecord],
    rows: &[CommerceRow],
) -> Result<ExportPaths, ExportError> {
    std::fs::create_dir_all(dir)?;
    let paths = ExportPaths {
        json: dir.join(format!("{stem}.json")),
        records_csv: dir.join(format!("{stem}.csv")),
        shopify_csv: dir.join(format!("{stem}_shopify.csv")),
    };

    save_json(&paths.json, records)?;
    save_records_csv(&paths.records_csv, records)?;
    save_commerce_csv(&paths.shopify_csv, rows)?;
    Ok(paths)
}

fn render_csv<T: Serialize>(rows: &[T]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
