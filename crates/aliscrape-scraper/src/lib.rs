pub mod client;
pub mod error;
pub mod links;
pub mod normalize;
mod rate_limit;
pub mod text;
pub mod types;

pub use client::{DatahubClient, DatahubConfig};
pub use error::ScraperError;
pub use links::{item_id_from_url, item_ids_from_search, search_query_from_input, split_links};
pub use normalize::Normalizer;
pub use types::RawItemPair;
