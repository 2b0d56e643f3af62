//! Tests for the auth module

use super::oauth1::{self, OAuth1Credentials, OAuth1Nonce};
use super::*;
use base64::Engine;
use reqwest::Method;
use url::Url;

fn apply(auth: &Authenticator, method: Method, url: &str) -> reqwest::Request {
    let client = reqwest::Client::new();
    let url = Url::parse(url).unwrap();
    let req = client.request(method.clone(), url.clone());
    auth.apply(&method, &url, req).unwrap().build().unwrap()
}

// Published example from the Twitter OAuth1 signing guide
const EXAMPLE_CREDENTIALS: OAuth1Credentials<'static> = OAuth1Credentials {
    consumer_key: "xvz1evFS4wEEPTGEFPHBog",
    consumer_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
    token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
    token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
};

fn example_nonce() -> OAuth1Nonce {
    OAuth1Nonce {
        nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".to_string(),
        timestamp: 1_318_622_958,
    }
}

#[test]
fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let built = apply(&auth, Method::GET, "https://example.com/api");
    assert!(built.headers().get("Authorization").is_none());
}

#[test]
fn test_basic_auth() {
    let auth = Authenticator::new(AuthConfig::Basic {
        username: "user".to_string(),
        password: "pass".to_string(),
    });

    let built = apply(&auth, Method::GET, "https://example.com/api");
    let auth_header = built
        .headers()
        .get("Authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(auth_header.starts_with("Basic "));

    // Verify base64 encoding
    let encoded = auth_header.strip_prefix("Basic ").unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), "user:pass");
}

#[test]
fn test_bearer_auth() {
    let auth = Authenticator::new(AuthConfig::Bearer {
        token: "my-bearer-token".to_string(),
    });

    let built = apply(&auth, Method::POST, "https://example.com/api");
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-bearer-token"
    );
}

#[test]
fn test_oauth1_header_shape() {
    let auth = Authenticator::new(AuthConfig::OAuth1 {
        consumer_key: "ck".to_string(),
        consumer_secret: "cs".to_string(),
        token: "at".to_string(),
        token_secret: "ats".to_string(),
    });

    let built = apply(
        &auth,
        Method::POST,
        "https://data-api.twitter.com/insights/engagement/28hr",
    );
    let header = built
        .headers()
        .get("Authorization")
        .unwrap()
        .to_str()
        .unwrap();

    assert!(header.starts_with("OAuth "));
    for field in [
        "oauth_consumer_key=\"ck\"",
        "oauth_token=\"at\"",
        "oauth_signature_method=\"HMAC-SHA1\"",
        "oauth_version=\"1.0\"",
        "oauth_nonce=",
        "oauth_timestamp=",
        "oauth_signature=",
    ] {
        assert!(header.contains(field), "missing {field} in {header}");
    }
}

#[test]
fn test_oauth1_nonce_is_unique() {
    let a = OAuth1Nonce::generate();
    let b = OAuth1Nonce::generate();
    assert_ne!(a.nonce, b.nonce);
    assert_eq!(a.nonce.len(), 32);
}

#[test]
fn test_oauth1_signature_base_string() {
    let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json").unwrap();
    let params = vec![
        ("status".to_string(), "Hello Ladies + Gentlemen".to_string()),
        ("include_entities".to_string(), "true".to_string()),
    ];
    let base = oauth1::signature_base_string(&Method::POST, &url, &params);
    assert_eq!(
        base,
        "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
         include_entities%3Dtrue%26status%3DHello%2520Ladies%2520%252B%2520Gentlemen"
    );
}

#[test]
fn test_oauth1_known_signature() {
    let url =
        Url::parse("https://api.twitter.com/1.1/statuses/update.json?include_entities=true")
            .unwrap();
    let body = vec![(
        "status".to_string(),
        "Hello Ladies + Gentlemen, a signed OAuth request!".to_string(),
    )];

    let header = oauth1::authorization_header(
        &Method::POST,
        &url,
        &body,
        EXAMPLE_CREDENTIALS,
        &example_nonce(),
    )
    .unwrap();

    assert!(
        header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""),
        "unexpected header: {header}"
    );
    assert!(header.contains("oauth_timestamp=\"1318622958\""));
}

#[test]
fn test_oauth1_default_port_dropped() {
    let with_port = Url::parse("https://example.com:443/path").unwrap();
    let without = Url::parse("https://example.com/path").unwrap();
    assert_eq!(
        oauth1::signature_base_string(&Method::GET, &with_port, &[]),
        oauth1::signature_base_string(&Method::GET, &without, &[])
    );
}
