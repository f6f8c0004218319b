//! Identifier resolver
//!
//! Front door of the identity component: validate the raw input, produce
//! the canonical account key, and fetch (or synthesize) the display
//! profile. The only hard failure is a malformed identifier; lookup
//! problems always degrade to the deterministic fallback.

use crate::core::clock::{Clock, SystemClock};
use crate::identity::demo::{fallback_id64, DemoProfileGenerator};
use crate::identity::provider::{IdentityError, IdentityProvider};
use crate::identity::steam_id::{render_legacy, SteamIdentifier};
use crate::models::profile::{PersonaState, PlayerProfile};
use tracing::{info, warn};

/// Resolves visitor-supplied identifiers into account keys and profiles.
///
/// # Example
/// ```
/// use topup_simulator_core_rs::{IdentifierResolver, OfflineIdentityProvider};
///
/// let mut resolver = IdentifierResolver::new(Box::new(OfflineIdentityProvider), 12345);
/// let key = resolver.resolve("STEAM_0:1:12345").unwrap();
/// assert_eq!(key, "76561197960290419");
/// assert!(resolver.resolve("definitely not valid!").is_err());
/// ```
pub struct IdentifierResolver {
    provider: Box<dyn IdentityProvider>,
    demo: DemoProfileGenerator,
    clock: Box<dyn Clock>,
}

impl IdentifierResolver {
    /// Create a resolver over the given identity collaborator.
    ///
    /// `seed` drives the synthetic parts of fallback profiles.
    pub fn new(provider: Box<dyn IdentityProvider>, seed: u64) -> Self {
        Self {
            provider,
            demo: DemoProfileGenerator::new(seed),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the time source (tests pin `fetched_at` this way).
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Resolve an identifier to its canonical account key.
    ///
    /// Direct forms resolve locally; vanity names ask the collaborator and
    /// fall back to the deterministic synthetic key on any lookup failure.
    /// Fails only with [`IdentityError::InvalidFormat`].
    pub fn resolve(&mut self, identifier: &str) -> Result<String, IdentityError> {
        Ok(self.resolve_id64(identifier)?.to_string())
    }

    /// Fetch the display profile for an identifier.
    ///
    /// Lookup failures synthesize a demo profile rather than erroring; a
    /// failed level lookup alone degrades to a random demo level.
    pub fn profile(&mut self, identifier: &str) -> Result<PlayerProfile, IdentityError> {
        let id64 = self.resolve_id64(identifier)?;
        let now = self.clock.now();

        let summary = match self.provider.player_summary(id64) {
            Ok(summary) => summary,
            Err(err) => {
                warn!(id64, error = %err, "profile lookup failed, using demo profile");
                return Ok(self.demo.generate(id64, now));
            }
        };

        let level = match self.provider.player_level(id64) {
            Ok(level) => level,
            Err(err) => {
                warn!(id64, error = %err, "level lookup failed, using demo level");
                self.demo.level()
            }
        };

        info!(id64, nickname = %summary.persona_name, "profile resolved");

        Ok(PlayerProfile {
            steam_id: render_legacy(id64),
            steam_id64: id64.to_string(),
            nickname: summary.persona_name,
            avatar: summary.avatar,
            profile_url: summary.profile_url,
            status: PersonaState::from_code(summary.persona_state),
            level,
            // The profile API never exposes wallet balances.
            balance: 0,
            country: summary.country.unwrap_or_else(|| "Unspecified".to_string()),
            is_demo: false,
            fetched_at: now,
            last_log_off: summary.last_log_off,
            created_at: summary.created_at,
        })
    }

    fn resolve_id64(&mut self, identifier: &str) -> Result<u64, IdentityError> {
        let parsed = SteamIdentifier::parse(identifier)?;

        if let Some(id64) = parsed.to_id64() {
            return Ok(id64);
        }

        let SteamIdentifier::Vanity(name) = parsed else {
            unreachable!("non-vanity identifiers resolve locally");
        };

        match self.provider.resolve_vanity(&name) {
            Ok(id64) => Ok(id64),
            Err(err) => {
                let id64 = fallback_id64(&name);
                warn!(
                    name = %name,
                    fallback = id64,
                    error = %err,
                    "vanity resolution failed, using deterministic fallback key"
                );
                Ok(id64)
            }
        }
    }
}
