//! Keyserver lookup over HTTP.
//!
//! This module fetches armored public keys from an HKP-style lookup
//! endpoint (ProtonMail's by default) and wires the fetched material into
//! the metadata extractor. One blocking GET per call; no retries.

use log::debug;

use crate::error::{Error, Result};
use crate::extract::extract_key_report;
use crate::types::KeyReport;

/// The keyserver queried when none is given.
pub const DEFAULT_KEYSERVER: &str = "https://mail-api.proton.me";

/// Substring that must appear in a lookup response body for it to count
/// as an armored public key.
const ARMOR_MARKER: &str = "BEGIN PGP PUBLIC KEY BLOCK";

/// Look up an email address and summarize the key it resolves to.
///
/// Chains [`fetch_key_by_email`] and
/// [`extract_key_report`](crate::extract_key_report) against the default
/// keyserver.
///
/// # Example
/// ```ignore
/// let report = lookup("user@proton.me")?;
/// println!("{}", report);
/// ```
pub fn lookup(email: &str) -> Result<KeyReport> {
    let armored = fetch_key_by_email(email, None)?;
    extract_key_report(armored.as_bytes())
}

/// Fetch an armored public key from a keyserver by email address.
///
/// # Arguments
/// * `email` - Email address to look up
/// * `keyserver` - Optional keyserver URL (defaults to ProtonMail's)
///
/// # Returns
/// The armored key text. Fails with [`Error::Fetch`] when the server
/// answers anything other than a 200 response whose body contains an
/// armored public key block, and with [`Error::Network`] when the
/// request itself cannot be completed.
pub fn fetch_key_by_email(email: &str, keyserver: Option<&str>) -> Result<String> {
    validate_email(email)?;

    let url = lookup_url(keyserver.unwrap_or(DEFAULT_KEYSERVER), email);
    debug!("fetching key via {}", url);

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| Error::Network(e.to_string()))?;

    let response = client
        .get(&url)
        .send()
        .map_err(|e| Error::Network(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.text().map_err(|e| Error::Network(e.to_string()))?;

    validate_lookup_response(status, body)
}

/// Cheap sanity check before any network traffic.
fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() || !email.contains('@') {
        return Err(Error::InvalidInput(format!(
            "Invalid email address: {}",
            email
        )));
    }
    Ok(())
}

/// Build the HKP lookup URL for an email address.
fn lookup_url(keyserver: &str, email: &str) -> String {
    format!(
        "{}/pks/lookup?op=get&search={}",
        keyserver.trim_end_matches('/'),
        email
    )
}

/// Accept the body only for an exact 200 response that contains the
/// armor marker.
fn validate_lookup_response(status: u16, body: String) -> Result<String> {
    if status != 200 || !body.contains(ARMOR_MARKER) {
        return Err(Error::Fetch);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARMORED_BODY: &str = "-----BEGIN PGP PUBLIC KEY BLOCK-----\n...\n-----END PGP PUBLIC KEY BLOCK-----\n";

    #[test]
    fn test_lookup_url() {
        let url = lookup_url(DEFAULT_KEYSERVER, "user@example.com");
        assert_eq!(
            url,
            "https://mail-api.proton.me/pks/lookup?op=get&search=user@example.com"
        );

        // Trailing slashes on the server don't double up
        let url = lookup_url("https://keys.example.org/", "user@example.com");
        assert_eq!(
            url,
            "https://keys.example.org/pks/lookup?op=get&search=user@example.com"
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-address").is_err());
    }

    #[test]
    fn test_validate_lookup_response_accepts_armored_200() {
        let body = validate_lookup_response(200, ARMORED_BODY.to_string()).unwrap();
        assert!(body.contains("BEGIN PGP PUBLIC KEY BLOCK"));
    }

    #[test]
    fn test_validate_lookup_response_rejects_404() {
        let result = validate_lookup_response(404, ARMORED_BODY.to_string());
        assert!(matches!(result, Err(Error::Fetch)));
    }

    #[test]
    fn test_validate_lookup_response_rejects_missing_marker() {
        let result = validate_lookup_response(200, "No key found".to_string());
        assert!(matches!(result, Err(Error::Fetch)));
    }

    #[test]
    fn test_validate_lookup_response_rejects_empty_body() {
        let result = validate_lookup_response(200, String::new());
        assert!(matches!(result, Err(Error::Fetch)));
    }

    #[test]
    fn test_fetch_error_message_is_stable() {
        let err = validate_lookup_response(500, String::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to retrieve a valid PGP public key from ProtonMail."
        );
    }
}
