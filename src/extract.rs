//! Key metadata extraction.
//!
//! This module turns raw OpenPGP key material into a [`KeyReport`]: a flat
//! summary of the primary key's identity, capabilities, and algorithm
//! preferences, plus one entry per bound subkey. Everything is read as
//! asserted by the key's self-signatures; nothing is cryptographically
//! verified.

use std::path::Path;
use std::time::SystemTime;

use log::debug;
use pgp::composed::{SignedPublicKey, SignedPublicSubKey};
use pgp::packet::Signature;
use pgp::types::PublicKeyTrait;

use crate::error::Result;
use crate::internal::{
    compression_algorithm_name, fingerprint_to_hex, format_timestamp, get_algorithm_name,
    get_key_bit_size, get_key_expiration, get_subkey_expiration, hash_algorithm_name,
    is_primary_revoked, is_subkey_revoked, key_flag_names, key_id_from_fingerprint,
    latest_binding_signature, latest_self_certification, parse_public_key,
    symmetric_algorithm_name,
};
use crate::types::{KeyReport, Preferences, PrimaryKeyInfo, SubkeyInfo, UNKNOWN_CAPABILITIES};

/// How many user IDs are read into the report. The user ID walk stops
/// after this many entries: only the first user ID's string is listed and
/// only its self-signature feeds capabilities and preferences.
pub const MAX_UIDS_CONSIDERED: usize = 1;

/// Extract a metadata report from raw key material (armored or binary).
///
/// # Arguments
/// * `data` - Public key data; secret key data is accepted and reduced to
///   its public parts.
///
/// # Returns
/// The [`KeyReport`] for the key, or [`Error::Parse`](crate::Error::Parse)
/// if the material is not a recognizable OpenPGP key.
///
/// # Example
/// ```ignore
/// let armored = std::fs::read("key.asc")?;
/// let report = extract_key_report(&armored)?;
/// println!("Fingerprint: {}", report.primary_key.fingerprint);
/// ```
pub fn extract_key_report(data: &[u8]) -> Result<KeyReport> {
    let public_key = parse_public_key(data)?;
    Ok(extract_from_key(&public_key))
}

/// Extract a metadata report from a key file (armored or binary).
pub fn extract_key_report_file(path: impl AsRef<Path>) -> Result<KeyReport> {
    let data = std::fs::read(path.as_ref())?;
    extract_key_report(&data)
}

/// Build the report from an already-parsed certificate.
pub(crate) fn extract_from_key(public_key: &SignedPublicKey) -> KeyReport {
    let fingerprint = fingerprint_to_hex(&public_key.primary_key);
    let creation_time: SystemTime = (*public_key.primary_key.created_at()).into();

    let mut primary_key = PrimaryKeyInfo {
        key_id: key_id_from_fingerprint(&fingerprint),
        fingerprint,
        algorithm: get_algorithm_name(&public_key.primary_key),
        created: format_timestamp(creation_time),
        expires: format_expiration(get_key_expiration(public_key)),
        key_size: get_key_bit_size(
            &public_key.primary_key,
            public_key.primary_key.public_params(),
        ),
        is_revoked: is_primary_revoked(public_key),
        user_ids: Vec::new(),
        capabilities: UNKNOWN_CAPABILITIES.to_string(),
        preferences: Preferences::default(),
    };

    for user in public_key.details.users.iter().take(MAX_UIDS_CONSIDERED) {
        primary_key
            .user_ids
            .push(String::from_utf8_lossy(user.id.id()).to_string());

        if let Some(sig) = latest_self_certification(user) {
            if let Some(capabilities) = capabilities_from_signature(sig) {
                primary_key.capabilities = capabilities;
            }
            primary_key.preferences = preferences_from_signature(sig);
        }
    }

    let subkeys: Vec<SubkeyInfo> = public_key
        .public_subkeys
        .iter()
        .map(extract_subkey_info)
        .collect();

    debug!(
        "extracted report for {}: {} user id(s), {} subkey(s)",
        primary_key.fingerprint,
        primary_key.user_ids.len(),
        subkeys.len()
    );

    KeyReport {
        primary_key,
        subkeys,
    }
}

/// Build the report entry for a single subkey.
fn extract_subkey_info(subkey: &SignedPublicSubKey) -> SubkeyInfo {
    let fingerprint = fingerprint_to_hex(&subkey.key);
    let creation_time: SystemTime = (*subkey.key.created_at()).into();

    let capabilities = latest_binding_signature(subkey)
        .and_then(capabilities_from_signature)
        .unwrap_or_else(|| UNKNOWN_CAPABILITIES.to_string());

    SubkeyInfo {
        key_id: key_id_from_fingerprint(&fingerprint),
        fingerprint,
        algorithm: get_algorithm_name(&subkey.key),
        created: format_timestamp(creation_time),
        expires: format_expiration(get_subkey_expiration(subkey)),
        key_size: get_key_bit_size(&subkey.key, subkey.key.public_params()),
        is_revoked: is_subkey_revoked(subkey),
        capabilities,
    }
}

/// Comma-joined usage flag names from a self-signature, or `None` when the
/// signature declares no flags.
fn capabilities_from_signature(sig: &Signature) -> Option<String> {
    let names = key_flag_names(&sig.key_flags());
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Algorithm preferences from a self-signature. Categories that are absent
/// or empty on the signature stay `None`.
fn preferences_from_signature(sig: &Signature) -> Preferences {
    let mut preferences = Preferences::default();

    let symmetric: Vec<String> = sig
        .preferred_symmetric_algs()
        .iter()
        .map(|algo| symmetric_algorithm_name(*algo))
        .collect();
    if !symmetric.is_empty() {
        preferences.symmetric = Some(symmetric);
    }

    let hash: Vec<String> = sig
        .preferred_hash_algs()
        .iter()
        .map(|algo| hash_algorithm_name(*algo))
        .collect();
    if !hash.is_empty() {
        preferences.hash = Some(hash);
    }

    let compression: Vec<String> = sig
        .preferred_compression_algs()
        .iter()
        .map(|algo| compression_algorithm_name(*algo))
        .collect();
    if !compression.is_empty() {
        preferences.compression = Some(compression);
    }

    preferences
}

/// "Never" for keys without an expiration, otherwise the timestamp.
fn format_expiration(expiration: Option<SystemTime>) -> String {
    match expiration {
        Some(st) => format_timestamp(st),
        None => "Never".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> Vec<u8> {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("files")
            .join(name);
        std::fs::read(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {}", path, e))
    }

    fn parsed(name: &str) -> SignedPublicKey {
        parse_public_key(&fixture(name)).unwrap()
    }

    #[test]
    fn test_first_uid_without_self_signature_reads_unknown() {
        let mut key = parsed("tess.asc");
        for user in &mut key.details.users {
            user.signatures.clear();
        }

        let report = extract_from_key(&key);
        assert_eq!(report.primary_key.capabilities, UNKNOWN_CAPABILITIES);
        assert!(report.primary_key.preferences.is_empty());
        // The first user ID's string is still collected
        assert_eq!(report.primary_key.user_ids.len(), MAX_UIDS_CONSIDERED);
    }

    #[test]
    fn test_uid_walk_stops_after_first_uid() {
        let key = parsed("tess.asc");
        assert_eq!(key.details.users.len(), 2);

        let report = extract_from_key(&key);
        assert_eq!(
            report.primary_key.user_ids,
            vec!["Tess Vault (work) <tess@work.example>".to_string()]
        );
    }

    #[test]
    fn test_latest_self_certification_drives_expiration() {
        // tess's self-certifications carry no expiration
        let donor = parsed("tess.asc");
        let no_expiry_sig = donor.details.users[0].signatures.last().unwrap().clone();

        let mut key = parsed("evan-expiring.asc");
        let baseline = extract_from_key(&key).primary_key.expires.clone();
        assert_ne!(baseline, "Never");

        // An older certification without expiration doesn't mask the newer one
        key.details.users[0]
            .signatures
            .insert(0, no_expiry_sig.clone());
        assert_eq!(extract_from_key(&key).primary_key.expires, baseline);

        // A newer certification without expiration supersedes it
        key.details.users[0].signatures.push(no_expiry_sig);
        assert_eq!(extract_from_key(&key).primary_key.expires, "Never");
    }

    #[test]
    fn test_second_uid_signatures_do_not_affect_output() {
        let baseline = extract_from_key(&parsed("tess.asc"));

        let mut key = parsed("tess.asc");
        assert!(key.details.users.len() > 1);
        key.details.users[1].signatures.clear();

        let modified = extract_from_key(&key);
        assert_eq!(modified.primary_key.capabilities, baseline.primary_key.capabilities);
        assert_eq!(modified.primary_key.preferences, baseline.primary_key.preferences);
        assert_eq!(modified.primary_key.user_ids, baseline.primary_key.user_ids);
    }

    #[test]
    fn test_primary_revocation_is_fail_open() {
        let mut key = parsed("rita-revoked.asc");
        assert!(extract_from_key(&key).primary_key.is_revoked);

        // Without any attached signatures the key reads as not-revoked
        key.details.revocation_signatures.clear();
        key.details.direct_signatures.clear();
        assert!(!extract_from_key(&key).primary_key.is_revoked);
    }

    #[test]
    fn test_subkey_without_binding_signature_reads_unknown() {
        let mut key = parsed("tess.asc");
        for subkey in &mut key.public_subkeys {
            subkey.signatures.clear();
        }

        let report = extract_from_key(&key);
        assert_eq!(report.subkeys.len(), 2);
        for subkey in &report.subkeys {
            assert_eq!(subkey.capabilities, UNKNOWN_CAPABILITIES);
            assert_eq!(subkey.expires, "Never");
            assert!(!subkey.is_revoked);
        }
    }

    #[test]
    fn test_extract_rejects_non_pgp_text() {
        let result = extract_key_report(b"hello world");
        assert!(matches!(result, Err(crate::Error::Parse(_))));
    }
}
