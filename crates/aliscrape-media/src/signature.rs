//! Request signing for authenticated uploads.

use aliscrape_core::SignatureAlgorithm;
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Signs upload parameters: `k=v` pairs sorted by key, joined with `&`, with
/// the API secret appended, hashed with `algorithm` and hex encoded.
///
/// Empty values are left out, matching how the host rebuilds the string.
pub(crate) fn sign_params(
    params: &[(&str, &str)],
    api_secret: &str,
    algorithm: SignatureAlgorithm,
) -> String {
    let mut signed: Vec<&(&str, &str)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    signed.sort_by(|a, b| a.0.cmp(b.0));
    let to_sign = signed
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let payload = format!("{to_sign}{api_secret}");
    match algorithm {
        SignatureAlgorithm::Sha1 => format!("{:x}", Sha1::digest(payload.as_bytes())),
        SignatureAlgorithm::Sha256 => format!("{:x}", Sha256::digest(payload.as_bytes())),
    }
}
