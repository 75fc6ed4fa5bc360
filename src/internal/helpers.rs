//! Internal helper functions.

use std::io::Cursor;

use pgp::composed::{Deserializable, SignedPublicKey, SignedSecretKey};
use pgp::crypto::hash::HashAlgorithm;
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::packet::KeyFlags;
use pgp::types::{CompressionAlgorithm, KeyDetails, PublicParams};

use crate::error::{Error, Result};

/// Parse a secret key from bytes (armored or binary).
pub(crate) fn parse_secret_key(data: &[u8]) -> Result<SignedSecretKey> {
    // Try armored first, then binary
    let cursor = Cursor::new(data);
    match SignedSecretKey::from_armor_single(cursor) {
        Ok((key, _headers)) => Ok(key),
        Err(_) => {
            let cursor = Cursor::new(data);
            SignedSecretKey::from_bytes(cursor).map_err(|e| Error::Parse(e.to_string()))
        }
    }
}

/// Parse a public key from bytes (armored or binary).
/// Also handles secret key data by extracting the public key.
pub(crate) fn parse_public_key(data: &[u8]) -> Result<SignedPublicKey> {
    // Try armored public key first
    let cursor = Cursor::new(data);
    if let Ok((key, _headers)) = SignedPublicKey::from_armor_single(cursor) {
        return Ok(key);
    }

    // Try binary public key
    let cursor = Cursor::new(data);
    if let Ok(key) = SignedPublicKey::from_bytes(cursor) {
        return Ok(key);
    }

    // Maybe it's a secret key - try to extract public key from it
    if let Ok(secret_key) = parse_secret_key(data) {
        return Ok(secret_key.signed_public_key());
    }

    Err(Error::Parse("no matching packet found".to_string()))
}

/// Get the fingerprint as a hex string (uppercase, no spaces).
pub(crate) fn fingerprint_to_hex(key: &impl KeyDetails) -> String {
    hex::encode_upper(key.fingerprint().as_bytes())
}

/// Derive the short key ID from a hex fingerprint (its trailing 16 characters).
pub(crate) fn key_id_from_fingerprint(fingerprint: &str) -> String {
    let start = fingerprint.len().saturating_sub(16);
    fingerprint[start..].to_string()
}

/// Convert a SystemTime to chrono DateTime.
pub(crate) fn system_time_to_datetime(st: std::time::SystemTime) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from(st)
}

/// Render a timestamp for display (e.g. "2024-01-02 03:04:05 UTC").
pub(crate) fn format_timestamp(st: std::time::SystemTime) -> String {
    system_time_to_datetime(st).to_string()
}

/// Get a normalized algorithm name for display.
/// Converts rpgp's internal naming to common OpenPGP names.
pub(crate) fn get_algorithm_name(key: &impl KeyDetails) -> String {
    use pgp::crypto::public_key::PublicKeyAlgorithm;

    match key.algorithm() {
        PublicKeyAlgorithm::RSA => "RSA".to_string(),
        PublicKeyAlgorithm::RSAEncrypt => "RSA".to_string(),
        PublicKeyAlgorithm::RSASign => "RSA".to_string(),
        PublicKeyAlgorithm::EdDSALegacy | PublicKeyAlgorithm::Ed25519 => "EdDSA".to_string(),
        PublicKeyAlgorithm::ECDH => "ECDH".to_string(),
        PublicKeyAlgorithm::ECDSA => "ECDSA".to_string(),
        PublicKeyAlgorithm::X25519 => "X25519".to_string(),
        PublicKeyAlgorithm::X448 => "X448".to_string(),
        PublicKeyAlgorithm::Ed448 => "Ed448".to_string(),
        PublicKeyAlgorithm::DSA => "DSA".to_string(),
        PublicKeyAlgorithm::Elgamal => "Elgamal".to_string(),
        algo => format!("{:?}", algo),
    }
}

/// Get the bit size for a key.
///
/// RSA sizes come from the actual modulus; curve and legacy algorithms
/// fall back to a fixed per-algorithm table. Returns 0 if the bit size
/// cannot be determined.
pub(crate) fn get_key_bit_size(key: &impl KeyDetails, params: &PublicParams) -> usize {
    use pgp::crypto::public_key::PublicKeyAlgorithm;

    match key.algorithm() {
        PublicKeyAlgorithm::RSA | PublicKeyAlgorithm::RSAEncrypt | PublicKeyAlgorithm::RSASign => {
            rsa_modulus_bits(params).unwrap_or(2048)
        }
        PublicKeyAlgorithm::EdDSALegacy | PublicKeyAlgorithm::Ed25519 => 256,
        PublicKeyAlgorithm::X25519 => 256,
        PublicKeyAlgorithm::X448 => 448,
        PublicKeyAlgorithm::Ed448 => 448,
        PublicKeyAlgorithm::ECDH => {
            // Could be 256 (Curve25519) or other sizes
            256
        }
        PublicKeyAlgorithm::ECDSA => 256,
        PublicKeyAlgorithm::DSA => 2048,
        PublicKeyAlgorithm::Elgamal => 2048,
        _ => 0,
    }
}

/// Bit length of the RSA modulus, when the key material carries one.
fn rsa_modulus_bits(params: &PublicParams) -> Option<usize> {
    use rsa::traits::PublicKeyParts;

    match params {
        PublicParams::RSA(rsa_params) => {
            // to_bytes_be yields the minimal big-endian encoding
            let n = rsa_params.key.n().to_bytes_be();
            let first = n.first()?;
            Some(n.len() * 8 - first.leading_zeros() as usize)
        }
        _ => None,
    }
}

/// Names of the usage flags set on a self-signature, in a fixed order.
pub(crate) fn key_flag_names(flags: &KeyFlags) -> Vec<&'static str> {
    let mut names = Vec::new();
    if flags.certify() {
        names.push("Certify");
    }
    if flags.sign() {
        names.push("Sign");
    }
    if flags.encrypt_comms() {
        names.push("Encrypt Communications");
    }
    if flags.encrypt_storage() {
        names.push("Encrypt Storage");
    }
    if flags.authentication() {
        names.push("Authenticate");
    }
    names
}

/// Display name for a symmetric cipher algorithm.
pub(crate) fn symmetric_algorithm_name(algo: SymmetricKeyAlgorithm) -> String {
    match algo {
        SymmetricKeyAlgorithm::AES128 => "AES128".to_string(),
        SymmetricKeyAlgorithm::AES192 => "AES192".to_string(),
        SymmetricKeyAlgorithm::AES256 => "AES256".to_string(),
        SymmetricKeyAlgorithm::TripleDES => "3DES".to_string(),
        algo => format!("{:?}", algo),
    }
}

/// Display name for a hash algorithm.
pub(crate) fn hash_algorithm_name(algo: HashAlgorithm) -> String {
    match algo {
        HashAlgorithm::Sha1 => "SHA1".to_string(),
        HashAlgorithm::Sha224 => "SHA224".to_string(),
        HashAlgorithm::Sha256 => "SHA256".to_string(),
        HashAlgorithm::Sha384 => "SHA384".to_string(),
        HashAlgorithm::Sha512 => "SHA512".to_string(),
        algo => format!("{:?}", algo),
    }
}

/// Display name for a compression algorithm.
pub(crate) fn compression_algorithm_name(algo: CompressionAlgorithm) -> String {
    match algo {
        CompressionAlgorithm::Uncompressed => "Uncompressed".to_string(),
        CompressionAlgorithm::ZIP => "ZIP".to_string(),
        CompressionAlgorithm::ZLIB => "ZLIB".to_string(),
        CompressionAlgorithm::BZip2 => "BZip2".to_string(),
        algo => format!("{:?}", algo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_id_from_fingerprint() {
        let fpr = "C744DD8C2D2738B57CB7B0AA13E2E3E50EF7363B";
        assert_eq!(key_id_from_fingerprint(fpr), "13E2E3E50EF7363B");
    }

    #[test]
    fn test_key_id_from_short_fingerprint() {
        // Shorter than 16 characters: the whole string is the key ID
        assert_eq!(key_id_from_fingerprint("ABCD"), "ABCD");
    }

    #[test]
    fn test_format_timestamp() {
        let epoch = std::time::UNIX_EPOCH + std::time::Duration::from_secs(1_704_164_645);
        assert_eq!(format_timestamp(epoch), "2024-01-02 03:04:05 UTC");
    }
}
