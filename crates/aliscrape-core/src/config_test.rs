use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("RAPID_API_KEY", "test-rapid-key");
    m.insert("CLOUDINARY_CLOUD_NAME", "demo-cloud");
    m
}

#[test]
fn build_app_config_fails_without_rapid_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "RAPID_API_KEY"),
        "expected MissingEnvVar(RAPID_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_key_as_missing() {
    let mut map = full_env();
    map.insert("RAPID_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "RAPID_API_KEY"),
        "expected MissingEnvVar(RAPID_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_cloud_name() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("RAPID_API_KEY", "test-rapid-key");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "CLOUDINARY_CLOUD_NAME"),
        "expected MissingEnvVar(CLOUDINARY_CLOUD_NAME), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.rapid_api_key, "test-rapid-key");
    assert_eq!(cfg.rapid_api_host, "aliexpress-datahub.p.rapidapi.com");
    assert_eq!(cfg.region, "US");
    assert_eq!(cfg.cloudinary_cloud_name, "demo-cloud");
    assert!(cfg.cloudinary_api_key.is_none());
    assert!(cfg.cloudinary_api_secret.is_none());
    assert!(!cfg.uploads_enabled());
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.max_retries, 3);
    assert_eq!(cfg.retry_backoff_base_ms, 5000);
    assert_eq!(cfg.inter_request_delay_ms, 3000);
    assert_eq!(cfg.upload_concurrency, 4);
}

#[test]
fn uploads_enabled_requires_key_and_secret() {
    let mut map = full_env();
    map.insert("CLOUDINARY_API_KEY", "123");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.uploads_enabled());

    map.insert("CLOUDINARY_API_SECRET", "shh");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.uploads_enabled());
}

#[test]
fn max_retries_override() {
    let mut map = full_env();
    map.insert("ALISCRAPE_MAX_RETRIES", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_retries, 0);
}

#[test]
fn max_retries_invalid() {
    let mut map = full_env();
    map.insert("ALISCRAPE_MAX_RETRIES", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ALISCRAPE_MAX_RETRIES"),
        "expected InvalidEnvVar(ALISCRAPE_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("ALISCRAPE_REQUEST_TIMEOUT_SECS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ALISCRAPE_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ALISCRAPE_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn upload_concurrency_zero_is_rejected() {
    let mut map = full_env();
    map.insert("ALISCRAPE_UPLOAD_CONCURRENCY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ALISCRAPE_UPLOAD_CONCURRENCY"),
        "expected InvalidEnvVar(ALISCRAPE_UPLOAD_CONCURRENCY), got: {result:?}"
    );
}

#[test]
fn region_and_host_overrides() {
    let mut map = full_env();
    map.insert("ALISCRAPE_REGION", "DE");
    map.insert("ALISCRAPE_RAPID_API_HOST", "mirror.example.com");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.region, "DE");
    assert_eq!(cfg.rapid_api_host, "mirror.example.com");
}

#[test]
fn debug_redacts_secrets() {
    let mut map = full_env();
    map.insert("CLOUDINARY_API_KEY", "key-123");
    map.insert("CLOUDINARY_API_SECRET", "secret-456");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-rapid-key"));
    assert!(!rendered.contains("key-123"));
    assert!(!rendered.contains("secret-456"));
    assert!(rendered.contains("demo-cloud"));
}

#[test]
fn signature_algorithm_defaults_to_sha1() {
    let cfg = build_app_config(lookup_from_map(&full_env())).unwrap();
    assert_eq!(cfg.cloudinary_signature_algorithm, SignatureAlgorithm::Sha1);
}

#[test]
fn signature_algorithm_override() {
    let mut map = full_env();
    map.insert("CLOUDINARY_SIGNATURE_ALGORITHM", "SHA256");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.cloudinary_signature_algorithm, SignatureAlgorithm::Sha256);
}

#[test]
fn signature_algorithm_rejects_unknown_digest() {
    let mut map = full_env();
    map.insert("CLOUDINARY_SIGNATURE_ALGORITHM", "md5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CLOUDINARY_SIGNATURE_ALGORITHM"),
        "expected InvalidEnvVar(CLOUDINARY_SIGNATURE_ALGORITHM), got: {result:?}"
    );
}
