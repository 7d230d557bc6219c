use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by data API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The API answered 200 but flagged the payload as an error.
    #[error("data API error from {endpoint}: {message}")]
    Api { endpoint: String, message: String },

    #[error("search for \"{query}\" returned no items")]
    EmptySearch { query: String },

    /// The item id or rating is absent or unreadable; the item must be skipped.
    #[error("item {item_id} is missing required field {field}")]
    MissingIdentity { item_id: String, field: &'static str },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
