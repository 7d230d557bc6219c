/// Digest used to sign media uploads. Must match the account's
/// signature setting; accounts verify SHA-1 unless switched over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        })
    }
}

impl std::str::FromStr for SignatureAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            other => Err(format!("expected sha1 or sha256, got '{other}'")),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub rapid_api_key: String,
    pub rapid_api_host: String,
    pub region: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: Option<String>,
    pub cloudinary_api_secret: Option<String>,
    pub cloudinary_signature_algorithm: SignatureAlgorithm,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub inter_request_delay_ms: u64,
    pub upload_concurrency: usize,
}

impl AppConfig {
    /// Returns `true` when both Cloudinary credentials are configured.
    #[must_use]
    pub fn uploads_enabled(&self) -> bool {
        self.cloudinary_api_key.is_some() && self.cloudinary_api_secret.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("rapid_api_key", &"[redacted]")
            .field("rapid_api_host", &self.rapid_api_host)
            .field("region", &self.region)
            .field("cloudinary_cloud_name", &self.cloudinary_cloud_name)
            .field(
                "cloudinary_api_key",
                &self.cloudinary_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "cloudinary_api_secret",
                &self.cloudinary_api_secret.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "cloudinary_signature_algorithm",
                &self.cloudinary_signature_algorithm,
            )
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("upload_concurrency", &self.upload_concurrency)
            .finish()
    }
}
