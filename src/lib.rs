//! # protonkey
//!
//! Fetch an OpenPGP public key from ProtonMail's keyserver for an email
//! address and summarize its cryptographic metadata using [rpgp](https://docs.rs/pgp).
//!
//! The summary covers:
//!
//! - **Identity**: fingerprint, derived key ID, algorithm, key size
//! - **Lifecycle**: creation and expiration timestamps, revocation state
//! - **Capabilities**: key usage flags from the first user ID's self-signature
//! - **Preferences**: symmetric, hash, and compression algorithm lists
//! - **Subkeys**: the same identity and capability data per bound subkey
//!
//! Capability and preference data is read as asserted by the key's
//! self-signatures; no signature verification is performed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use protonkey::lookup;
//!
//! let report = lookup("user@proton.me").unwrap();
//! println!("{}", report.primary_key.fingerprint);
//! for subkey in &report.subkeys {
//!     println!("subkey {} [{}]", subkey.key_id, subkey.capabilities);
//! }
//! ```
//!
//! Key material that is already at hand can be summarized without the
//! network round trip via [`extract_key_report`].
//!
//! ## Features
//!
//! - `network` (default): enable keyserver lookups (requires `reqwest`)

// Modules
mod error;
mod types;
mod internal;

mod extract;

#[cfg(feature = "network")]
mod network;

// Re-export error types
pub use error::{Error, Result};

// Re-export all public types
pub use types::{
    KeyReport,
    Preferences,
    PrimaryKeyInfo,
    SubkeyInfo,
    UNKNOWN_CAPABILITIES,
};

// Re-export extraction functions
pub use extract::{
    extract_key_report,
    extract_key_report_file,
    MAX_UIDS_CONSIDERED,
};

// Re-export network functions when feature is enabled
#[cfg(feature = "network")]
pub use network::{
    fetch_key_by_email,
    lookup,
    DEFAULT_KEYSERVER,
};
