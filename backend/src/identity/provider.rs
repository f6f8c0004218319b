//! Identity collaborator seam
//!
//! The storefront never talks to the profile service directly; it goes
//! through `IdentityProvider` so the demo can run fully offline and tests
//! can script both the found and the not-found paths.

use crate::models::profile::AvatarSet;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from identifier handling and identity lookups
#[derive(Debug, Error, PartialEq)]
pub enum IdentityError {
    #[error("unrecognized identifier format: {input:?}")]
    InvalidFormat { input: String },

    #[error("vanity name {name:?} not found")]
    VanityNotFound { name: String },

    #[error("no profile for account key {id64}")]
    ProfileNotFound { id64: u64 },

    #[error("identity service unavailable: {message}")]
    Unavailable { message: String },
}

/// Raw profile attributes as the collaborator returns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSummary {
    pub persona_name: String,
    pub avatar: AvatarSet,
    pub profile_url: String,
    /// Numeric presence code (0..=6)
    pub persona_state: u8,
    pub country: Option<String>,
    pub last_log_off: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// External identity service.
///
/// Implementations may perform network I/O; every call site treats failure
/// as recoverable (fallback to a synthetic identity).
pub trait IdentityProvider {
    /// Resolve a vanity profile name to its SteamID64.
    fn resolve_vanity(&mut self, name: &str) -> Result<u64, IdentityError>;

    /// Fetch the profile summary for an account key.
    fn player_summary(&mut self, steam_id64: u64) -> Result<PlayerSummary, IdentityError>;

    /// Fetch the account's profile level.
    fn player_level(&mut self, steam_id64: u64) -> Result<u32, IdentityError>;
}

/// Provider used when no identity service is reachable (the demo default).
///
/// Every call fails with `Unavailable`, which pushes the resolver onto its
/// deterministic fallback path, exactly how the original behaved without
/// a production API key.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineIdentityProvider;

impl IdentityProvider for OfflineIdentityProvider {
    fn resolve_vanity(&mut self, _name: &str) -> Result<u64, IdentityError> {
        Err(IdentityError::Unavailable {
            message: "offline demo mode".to_string(),
        })
    }

    fn player_summary(&mut self, _steam_id64: u64) -> Result<PlayerSummary, IdentityError> {
        Err(IdentityError::Unavailable {
            message: "offline demo mode".to_string(),
        })
    }

    fn player_level(&mut self, _steam_id64: u64) -> Result<u32, IdentityError> {
        Err(IdentityError::Unavailable {
            message: "offline demo mode".to_string(),
        })
    }
}
