//! Deterministic fallback identities
//!
//! When the identity collaborator cannot resolve a vanity name or serve a
//! profile, the storefront still needs something to display. The synthetic
//! account key is a pure function of the name (stable across sessions and
//! restarts); the rest of the demo profile is drawn from the seeded RNG.

use crate::identity::steam_id::render_legacy;
use crate::models::profile::{AvatarSet, PersonaState, PlayerProfile};
use crate::rng::SeededRng;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Nickname pool for synthesized profiles.
const DEMO_NICKNAMES: [&str; 8] = [
    "CyberPlayer",
    "SteamWarrior",
    "GameMaster",
    "ProGamer",
    "DigitalNinja",
    "CodeHunter",
    "VirtualHero",
    "TechWizard",
];

/// Presence states a synthesized profile can report.
const DEMO_STATES: [PersonaState; 3] = [
    PersonaState::Offline,
    PersonaState::Online,
    PersonaState::DoNotDisturb,
];

/// Deterministic synthetic account key for an unresolvable name.
///
/// Shape matches genuine keys (`7656119` + 10 digits) but the value sits
/// below the legacy base offset, so it can never collide with a real
/// account. The digits come from a SHA-256 content hash, making repeated
/// lookups of the same name stable within and across runs.
///
/// # Example
/// ```
/// use topup_simulator_core_rs::identity::demo::fallback_id64;
///
/// let a = fallback_id64("some-custom-name");
/// let b = fallback_id64("some-custom-name");
/// assert_eq!(a, b);
/// assert_eq!(a.to_string().len(), 17);
/// assert!(a.to_string().starts_with("7656119"));
/// ```
pub fn fallback_id64(name: &str) -> u64 {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    let hash = u64::from_be_bytes(bytes);

    let tail = 1_000_000_000 + hash % 1_000_000_000;
    7_656_119 * 10_000_000_000 + tail
}

/// Synthesizes display profiles when the identity lookup fails.
#[derive(Debug, Clone)]
pub struct DemoProfileGenerator {
    rng: SeededRng,
}

impl DemoProfileGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeededRng::new(seed),
        }
    }

    /// Build a demo profile for the given account key.
    ///
    /// Profile fields (nickname, level, status, balance) are random but
    /// reproducible under a fixed seed.
    pub fn generate(&mut self, steam_id64: u64, now: DateTime<Utc>) -> PlayerProfile {
        let status = *self.rng.pick(&DEMO_STATES);
        let level = self.rng.range(1, 101) as u32;
        let balance = self.rng.range(0, 5_000_00);
        let nickname = format!(
            "{}_{}",
            self.rng.pick(&DEMO_NICKNAMES),
            self.rng.range(0, 1000)
        );

        PlayerProfile {
            steam_id: render_legacy(steam_id64),
            steam_id64: steam_id64.to_string(),
            nickname,
            avatar: AvatarSet::placeholder(),
            profile_url: format!("https://steamcommunity.com/profiles/{}", steam_id64),
            status,
            level,
            balance,
            country: "RU".to_string(),
            is_demo: true,
            fetched_at: now,
            last_log_off: None,
            created_at: None,
        }
    }

    /// Random demo level, used when only the level lookup failed.
    pub fn level(&mut self) -> u32 {
        self.rng.range(1, 101) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::steam_id::STEAM_ID64_BASE;

    #[test]
    fn test_fallback_key_is_stable() {
        assert_eq!(fallback_id64("gabelogan"), fallback_id64("gabelogan"));
        assert_ne!(fallback_id64("gabelogan"), fallback_id64("gabelogaN"));
    }

    #[test]
    fn test_fallback_key_shape() {
        for name in ["a", "someone_else", "x-y-z", "1234"] {
            let key = fallback_id64(name).to_string();
            assert_eq!(key.len(), 17, "key for {:?} should have 17 digits", name);
            assert!(key.starts_with("7656119"));
        }
    }

    #[test]
    fn test_fallback_key_below_real_account_range() {
        assert!(fallback_id64("anything") < STEAM_ID64_BASE);
    }

    #[test]
    fn test_generated_profile_is_marked_demo() {
        let mut gen = DemoProfileGenerator::new(42);
        let profile = gen.generate(fallback_id64("name"), Utc::now());

        assert!(profile.is_demo);
        assert!((1..=100).contains(&profile.level));
        assert!((0..5_000_00).contains(&profile.balance));
        assert!(DEMO_NICKNAMES
            .iter()
            .any(|n| profile.nickname.starts_with(n)));
    }

    #[test]
    fn test_same_seed_same_profile() {
        let id64 = fallback_id64("name");
        let now = Utc::now();
        let a = DemoProfileGenerator::new(7).generate(id64, now);
        let b = DemoProfileGenerator::new(7).generate(id64, now);
        assert_eq!(a, b);
    }
}
