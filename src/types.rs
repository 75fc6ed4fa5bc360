//! Public type definitions for the protonkey library.
//!
//! These structures hold the flat, display-ready summary derived from a
//! parsed OpenPGP certificate. Timestamps are kept as strings (with the
//! literal `"Never"` for keys that do not expire) so a report can be
//! printed or serialized without further formatting decisions.

use std::fmt;

/// Capability string used when a self-signature carries no key flags.
pub const UNKNOWN_CAPABILITIES: &str = "Unknown";

/// Algorithm preferences asserted by a self-signature.
///
/// A category that is absent from the signature stays `None`; an empty
/// preference list is treated the same as an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Preferred symmetric cipher algorithms, most preferred first
    pub symmetric: Option<Vec<String>>,
    /// Preferred hash algorithms, most preferred first
    pub hash: Option<Vec<String>>,
    /// Preferred compression algorithms, most preferred first
    pub compression: Option<Vec<String>>,
}

impl Preferences {
    /// True if no preference category was present on the self-signature.
    pub fn is_empty(&self) -> bool {
        self.symmetric.is_none() && self.hash.is_none() && self.compression.is_none()
    }
}

/// Metadata for the primary key of a certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyInfo {
    /// Full fingerprint as an uppercase hex string
    pub fingerprint: String,
    /// Short key ID: always the trailing 16 hex characters of the fingerprint
    pub key_id: String,
    /// Algorithm name (e.g., "RSA", "EdDSA", "ECDH")
    pub algorithm: String,
    /// Creation timestamp, stringified
    pub created: String,
    /// Expiration timestamp, stringified, or `"Never"`
    pub expires: String,
    /// Key size in bits
    pub key_size: usize,
    /// Whether a revocation signature is attached to the primary key
    pub is_revoked: bool,
    /// User ID strings, capped at
    /// [`MAX_UIDS_CONSIDERED`](crate::MAX_UIDS_CONSIDERED) entries
    pub user_ids: Vec<String>,
    /// Comma-joined key usage flag names, or `"Unknown"`
    pub capabilities: String,
    /// Algorithm preferences from the first user ID's self-signature
    pub preferences: Preferences,
}

/// Metadata for a subkey bound to the primary key.
///
/// Same shape as [`PrimaryKeyInfo`] minus user IDs and preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubkeyInfo {
    /// Full fingerprint as an uppercase hex string
    pub fingerprint: String,
    /// Short key ID: always the trailing 16 hex characters of the fingerprint
    pub key_id: String,
    /// Algorithm name
    pub algorithm: String,
    /// Creation timestamp, stringified
    pub created: String,
    /// Expiration timestamp, stringified, or `"Never"`
    pub expires: String,
    /// Key size in bits
    pub key_size: usize,
    /// Whether the subkey itself has been revoked
    pub is_revoked: bool,
    /// Comma-joined key usage flag names, or `"Unknown"`
    pub capabilities: String,
}

/// The full metadata summary for one certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReport {
    /// Primary key metadata
    pub primary_key: PrimaryKeyInfo,
    /// Subkeys in the order they are stored in the certificate
    pub subkeys: Vec<SubkeyInfo>,
}

impl fmt::Display for KeyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pk = &self.primary_key;
        writeln!(f, "Primary Key")?;
        writeln!(f, "  Fingerprint:  {}", pk.fingerprint)?;
        writeln!(f, "  Key ID:       {}", pk.key_id)?;
        writeln!(f, "  Algorithm:    {} ({} bits)", pk.algorithm, pk.key_size)?;
        writeln!(f, "  Created:      {}", pk.created)?;
        writeln!(f, "  Expires:      {}", pk.expires)?;
        writeln!(f, "  Revoked:      {}", if pk.is_revoked { "yes" } else { "no" })?;
        writeln!(f, "  Capabilities: {}", pk.capabilities)?;
        for uid in &pk.user_ids {
            writeln!(f, "  User ID:      {}", uid)?;
        }
        if let Some(algos) = &pk.preferences.symmetric {
            writeln!(f, "  Symmetric:    {}", algos.join(", "))?;
        }
        if let Some(algos) = &pk.preferences.hash {
            writeln!(f, "  Hash:         {}", algos.join(", "))?;
        }
        if let Some(algos) = &pk.preferences.compression {
            writeln!(f, "  Compression:  {}", algos.join(", "))?;
        }
        for subkey in &self.subkeys {
            writeln!(f, "Subkey")?;
            writeln!(f, "  Fingerprint:  {}", subkey.fingerprint)?;
            writeln!(f, "  Key ID:       {}", subkey.key_id)?;
            writeln!(
                f,
                "  Algorithm:    {} ({} bits)",
                subkey.algorithm, subkey.key_size
            )?;
            writeln!(f, "  Created:      {}", subkey.created)?;
            writeln!(f, "  Expires:      {}", subkey.expires)?;
            writeln!(f, "  Revoked:      {}", if subkey.is_revoked { "yes" } else { "no" })?;
            writeln!(f, "  Capabilities: {}", subkey.capabilities)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_is_empty() {
        let prefs = Preferences::default();
        assert!(prefs.is_empty());

        let prefs = Preferences {
            hash: Some(vec!["SHA256".to_string()]),
            ..Default::default()
        };
        assert!(!prefs.is_empty());
    }
}
