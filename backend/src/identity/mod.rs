//! Identifier resolution
//!
//! Turns whatever the visitor typed (SteamID64, legacy `STEAM_x:y:z`
//! triplet, or a vanity profile name) into a canonical account key, and
//! fetches a display profile for it. Vanity names go through the external
//! identity collaborator; any lookup failure degrades to a deterministic
//! synthetic identity instead of surfacing an error.

pub mod demo;
pub mod provider;
pub mod resolver;
pub mod steam_id;

pub use demo::DemoProfileGenerator;
pub use provider::{IdentityError, IdentityProvider, OfflineIdentityProvider, PlayerSummary};
pub use resolver::IdentifierResolver;
pub use steam_id::SteamIdentifier;
