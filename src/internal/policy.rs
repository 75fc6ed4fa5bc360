//! Revocation and expiration policy helpers.
//!
//! rpgp doesn't have a policy system like sequoia, so the revocation and
//! expiration state of a certificate is derived here by inspecting its
//! signature lists directly. No cryptographic verification is performed;
//! signatures are read as asserted.

use std::time::SystemTime;

use pgp::composed::{SignedPublicKey, SignedPublicSubKey};
use pgp::packet::{Signature, SignatureType};
use pgp::types::{PublicKeyTrait, SignedUser};

/// Check if the primary key carries a revocation signature.
///
/// Scans every signature attached directly to the primary key; an empty
/// signature list reads as not-revoked (fail-open).
pub(crate) fn is_primary_revoked(key: &SignedPublicKey) -> bool {
    key.details
        .revocation_signatures
        .iter()
        .chain(key.details.direct_signatures.iter())
        .any(|sig| sig.typ() == Some(SignatureType::KeyRevocation))
}

/// Check if a subkey is revoked.
pub(crate) fn is_subkey_revoked(subkey: &SignedPublicSubKey) -> bool {
    subkey
        .signatures
        .iter()
        .any(|sig| sig.typ() == Some(SignatureType::SubkeyRevocation))
}

/// The most recent self-certification on a user ID, if any.
pub(crate) fn latest_self_certification(user: &SignedUser) -> Option<&Signature> {
    user.signatures.iter().rev().find(|sig| sig.is_certification())
}

/// The most recent binding signature on a subkey, if any.
pub(crate) fn latest_binding_signature(subkey: &SignedPublicSubKey) -> Option<&Signature> {
    subkey
        .signatures
        .iter()
        .rev()
        .find(|sig| sig.typ() == Some(SignatureType::SubkeyBinding))
}

/// Get the expiration time for a primary key, read from the first user
/// ID's most recent self-certification. Returns `None` for keys that do
/// not expire.
pub(crate) fn get_key_expiration(key: &SignedPublicKey) -> Option<SystemTime> {
    let user = key.details.users.first()?;
    let sig = latest_self_certification(user)?;
    sig.key_expiration_time()
        .map(|validity| (*key.primary_key.created_at() + *validity).into())
}

/// Get the expiration time for a subkey from its most recent binding
/// signature. Returns `None` for subkeys that do not expire.
pub(crate) fn get_subkey_expiration(subkey: &SignedPublicSubKey) -> Option<SystemTime> {
    latest_binding_signature(subkey).and_then(|sig| {
        sig.key_expiration_time()
            .map(|validity| (*subkey.key.created_at() + *validity).into())
    })
}
