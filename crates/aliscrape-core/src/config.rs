use crate::app_config::{AppConfig, SignatureAlgorithm};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let rapid_api_key = require("RAPID_API_KEY")?;
    let cloudinary_cloud_name = require("CLOUDINARY_CLOUD_NAME")?;

    let rapid_api_host = or_default(
        "ALISCRAPE_RAPID_API_HOST",
        "aliexpress-datahub.p.rapidapi.com",
    );
    let region = or_default("ALISCRAPE_REGION", "US");
    let cloudinary_api_key = optional("CLOUDINARY_API_KEY");
    let cloudinary_api_secret = optional("CLOUDINARY_API_SECRET");
    let cloudinary_signature_algorithm: SignatureAlgorithm = parse_var(
        "CLOUDINARY_SIGNATURE_ALGORITHM",
        &or_default,
        SignatureAlgorithm::default(),
    )?;
    let log_level = or_default("ALISCRAPE_LOG_LEVEL", "info");

    let request_timeout_secs: u64 = parse_var("ALISCRAPE_REQUEST_TIMEOUT_SECS", &or_default, 30)?;
    let max_retries: u32 = parse_var("ALISCRAPE_MAX_RETRIES", &or_default, 3)?;
    let retry_backoff_base_ms: u64 =
        parse_var("ALISCRAPE_RETRY_BACKOFF_BASE_MS", &or_default, 5_000)?;
    let inter_request_delay_ms: u64 =
        parse_var("ALISCRAPE_INTER_REQUEST_DELAY_MS", &or_default, 3_000)?;
    let upload_concurrency: usize = parse_var("ALISCRAPE_UPLOAD_CONCURRENCY", &or_default, 4)?;

    if upload_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ALISCRAPE_UPLOAD_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        rapid_api_key,
        rapid_api_host,
        region,
        cloudinary_cloud_name,
        cloudinary_api_key,
        cloudinary_api_secret,
        cloudinary_signature_algorithm,
        log_level,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        inter_request_delay_ms,
        upload_concurrency,
    })
}

/// Parses `var` (falling back to `default` when unset) into `T`.
fn parse_var<T>(
    var: &str,
    or_default: &dyn Fn(&str, &str) -> String,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + ToString,
    T::Err: std::fmt::Display,
{
    or_default(var, &default.to_string())
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
