pub mod app_config;
pub mod commerce;
pub mod config;
pub mod price;
pub mod record;

pub use app_config::{AppConfig, SignatureAlgorithm};
pub use commerce::CommerceRow;
pub use config::{load_app_config, load_app_config_from_env};
pub use price::{
    format_price, resolve_display_price, resolve_display_price_values, resolve_price_range,
    PriceRange,
};
pub use record::NormalizedRecord;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
