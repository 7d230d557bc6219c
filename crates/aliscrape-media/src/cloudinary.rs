//! Signed image uploads to the Cloudinary upload API.
//!
//! The host fetches each photo from its source URL itself, so an upload is a
//! single form POST carrying the source link, the target folder and a
//! signature over both.

use std::time::Duration;

use aliscrape_core::{AppConfig, SignatureAlgorithm};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Deserialize;

use crate::error::MediaError;
use crate::signature::sign_params;

const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";

/// Format every upload is converted to.
const UPLOAD_FORMAT: &str = "jpg";

/// Credentials and limits for [`CloudinaryClient`].
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Must match the account's signature setting.
    pub signature_algorithm: SignatureAlgorithm,
    pub timeout_secs: u64,
    /// Uploads in flight at once within one [`CloudinaryClient::upload_photos`] call.
    pub concurrency: usize,
}

impl CloudinaryConfig {
    /// Builds the uploader config, or `None` when either credential is unset.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Option<Self> {
        Some(Self {
            cloud_name: config.cloudinary_cloud_name.clone(),
            api_key: config.cloudinary_api_key.clone()?,
            api_secret: config.cloudinary_api_secret.clone()?,
            signature_algorithm: config.cloudinary_signature_algorithm,
            timeout_secs: config.request_timeout_secs,
            concurrency: config.upload_concurrency,
        })
    }
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &"[redacted]")
            .field("api_secret", &"[redacted]")
            .field("signature_algorithm", &self.signature_algorithm)
            .field("timeout_secs", &self.timeout_secs)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Uploads photos by source URL and returns their hosted URLs.
pub struct CloudinaryClient {
    client: Client,
    config: CloudinaryConfig,
    upload_url: String,
}

impl CloudinaryClient {
    /// Creates a client pointed at the production upload API.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(config: CloudinaryConfig, base_url: &str) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("aliscrape/0.1")
            .build()?;
        let upload_url = format!(
            "{}/v1_1/{}/image/upload",
            base_url.trim_end_matches('/'),
            config.cloud_name
        );
        Ok(Self {
            client,
            config,
            upload_url,
        })
    }

    /// Uploads one photo into `folder` and returns its `secure_url`.
    ///
    /// # Errors
    ///
    /// - [`MediaError::Upload`] when the host rejects the upload with a message.
    /// - [`MediaError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`MediaError::Http`] on network or TLS failure.
    /// - [`MediaError::Deserialize`] when the success body lacks `secure_url`.
    pub async fn upload_photo(&self, source_url: &str, folder: &str) -> Result<String, MediaError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[
                ("folder", folder),
                ("format", UPLOAD_FORMAT),
                ("timestamp", timestamp.as_str()),
            ],
            &self.config.api_secret,
            self.config.signature_algorithm,
        );
        let form = [
            ("file", source_url),
            ("folder", folder),
            ("format", UPLOAD_FORMAT),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.config.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = self.client.post(&self.upload_url).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(rejected) => MediaError::Upload {
                    source_url: source_url.to_owned(),
                    status: status.as_u16(),
                    message: rejected.error.message,
                },
                Err(_) => MediaError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: self.upload_url.clone(),
                },
            });
        }

        let uploaded: UploadResponse =
            serde_json::from_str(&body).map_err(|e| MediaError::Deserialize {
                context: format!("upload response for {source_url}"),
                source: e,
            })?;
        Ok(uploaded.secure_url)
    }

    /// Uploads every link into `folder`, returning hosted URLs in input order.
    ///
    /// Blank links are skipped and host-relative links get `https:`. Failed
    /// uploads are logged and dropped, so the result may be shorter than the
    /// input but never padded.
    pub async fn upload_photos(&self, links: &[String], folder: &str) -> Vec<String> {
        let sources: Vec<String> = links.iter().filter_map(|l| source_url(l)).collect();
        let requested = sources.len();
        if requested == 0 {
            return Vec::new();
        }

        let results = stream::iter(sources.into_iter().map(|source| async move {
            let result = self.upload_photo(&source, folder).await;
            (source, result)
        }))
        .buffered(self.config.concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

        let uploaded: Vec<String> = results
            .into_iter()
            .filter_map(|(source, result)| match result {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!(folder, source = %source, error = %e, "photo upload failed");
                    None
                }
            })
            .collect();

        tracing::info!(folder, requested, uploaded = uploaded.len(), "photos uploaded");
        uploaded
    }
}

fn source_url(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        None
    } else if link.starts_with("//") {
        Some(format!("https:{link}"))
    } else {
        Some(link.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: "demo".to_owned(),
            api_key: "key-123".to_owned(),
            api_secret: "secret-456".to_owned(),
            signature_algorithm: SignatureAlgorithm::Sha1,
            timeout_secs: 5,
            concurrency: 2,
        }
    }

    #[test]
    fn upload_url_includes_cloud_name() {
        let client = CloudinaryClient::with_base_url(test_config(), "http://127.0.0.1:1/")
            .expect("client construction");
        assert_eq!(client.upload_url, "http://127.0.0.1:1/v1_1/demo/image/upload");
    }

    #[test]
    fn source_url_prefixes_host_relative_links() {
        assert_eq!(
            source_url("//ae01.alicdn.com/a.jpg").as_deref(),
            Some("https://ae01.alicdn.com/a.jpg")
        );
        assert_eq!(
            source_url(" https://x/a.jpg ").as_deref(),
            Some("https://x/a.jpg")
        );
        assert_eq!(source_url("   "), None);
    }

    #[test]
    fn config_debug_redacts_credentials() {
        let rendered = format!("{:?}", test_config());
        assert!(!rendered.contains("key-123"));
        assert!(!rendered.contains("secret-456"));
        assert!(rendered.contains("demo"));
    }
}
