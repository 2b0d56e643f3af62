//! OAuth 1.0a request signing (HMAC-SHA1)
//!
//! Only the signing half of OAuth1 lives here. Obtaining user access tokens
//! is done out of band.

use crate::error::{Error, Result};
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;

/// OAuth1 consumer and token credentials
#[derive(Clone, Copy)]
pub struct OAuth1Credentials<'a> {
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub token: &'a str,
    pub token_secret: &'a str,
}

/// Per-request values that must be unique
#[derive(Debug, Clone)]
pub struct OAuth1Nonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl OAuth1Nonce {
    /// Fresh nonce and current timestamp
    pub fn generate() -> Self {
        Self {
            nonce: uuid::Uuid::new_v4().simple().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// RFC 3986 percent-encoding (unreserved characters kept)
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build the `Authorization` header value for a request.
///
/// `extra_params` are form-encoded body parameters; JSON bodies are not
/// part of the signature, so callers sending JSON pass an empty slice.
pub fn authorization_header(
    method: &reqwest::Method,
    url: &Url,
    extra_params: &[(String, String)],
    credentials: OAuth1Credentials<'_>,
    nonce: &OAuth1Nonce,
) -> Result<String> {
    let timestamp = nonce.timestamp.to_string();
    let oauth_params: Vec<(&str, &str)> = vec![
        ("oauth_consumer_key", credentials.consumer_key),
        ("oauth_nonce", nonce.nonce.as_str()),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.token),
        ("oauth_version", "1.0"),
    ];

    let params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .chain(extra_params.iter().cloned())
        .chain(
            oauth_params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
        )
        .collect();

    let base = signature_base_string(method, url, &params);
    let signature = sign(&base, credentials.consumer_secret, credentials.token_secret)?;

    let mut header_params: Vec<(&str, &str)> = oauth_params;
    header_params.push(("oauth_signature", signature.as_str()));
    header_params.sort_unstable();

    let fields = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {fields}"))
}

/// Signature base string: `METHOD&base_url&normalized_params`
pub fn signature_base_string(
    method: &reqwest::Method,
    url: &Url,
    params: &[(String, String)],
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    // Origin drops default ports and the query, which is signed as params
    let base_url = format!("{}{}", url.origin().ascii_serialization(), url.path());

    format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        encode(&base_url),
        encode(&normalized)
    )
}

/// HMAC-SHA1 over the base string, base64 encoded
pub fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> Result<String> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|e| Error::auth(format!("Invalid signing key: {e}")))?;
    mac.update(base.as_bytes());
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}
