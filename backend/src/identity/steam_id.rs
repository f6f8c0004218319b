//! Steam identifier formats and conversion
//!
//! Three lexical forms are accepted:
//!
//! - SteamID64: `7656119` followed by exactly 10 more digits
//! - Legacy triplet: `STEAM_{0|1}:{0|1}:{digits}`
//! - Vanity name: letters, digits, hyphen, underscore
//!
//! Conversion between the first two:
//! `id64 = z * 2 + BASE + y`, with `BASE = 76561197960265728`; the inverse
//! recovers `y` from the parity of `id64 - BASE` and `z` from the halved
//! remainder. Triplets always render with universe `STEAM_0:`.

use crate::identity::provider::IdentityError;

/// Offset between legacy account numbers and the 64-bit key space.
pub const STEAM_ID64_BASE: u64 = 76_561_197_960_265_728;

/// Leading digits every genuine SteamID64 shares.
pub const STEAM_ID64_PREFIX: &str = "7656119";

/// A parsed visitor-supplied identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SteamIdentifier {
    /// Canonical 17-digit key
    Id64(u64),

    /// Legacy `STEAM_x:y:z` triplet (universe `x` is accepted and discarded)
    Legacy { y: u8, z: u64 },

    /// Custom profile name, resolved via the identity collaborator
    Vanity(String),
}

impl SteamIdentifier {
    /// Parse a raw identifier string.
    ///
    /// Fails with [`IdentityError::InvalidFormat`] when the input matches
    /// none of the three lexical forms.
    ///
    /// # Example
    /// ```
    /// use topup_simulator_core_rs::SteamIdentifier;
    ///
    /// assert!(matches!(
    ///     SteamIdentifier::parse("76561197960435530"),
    ///     Ok(SteamIdentifier::Id64(76561197960435530))
    /// ));
    /// assert!(matches!(
    ///     SteamIdentifier::parse("STEAM_0:1:12345"),
    ///     Ok(SteamIdentifier::Legacy { y: 1, z: 12345 })
    /// ));
    /// assert!(matches!(
    ///     SteamIdentifier::parse("gabe-n_1"),
    ///     Ok(SteamIdentifier::Vanity(_))
    /// ));
    /// assert!(SteamIdentifier::parse("not valid!").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, IdentityError> {
        let input = input.trim();

        if let Some(id64) = parse_id64(input) {
            return Ok(SteamIdentifier::Id64(id64));
        }

        if let Some((y, z)) = parse_legacy(input) {
            return Ok(SteamIdentifier::Legacy { y, z });
        }

        if is_vanity(input) {
            return Ok(SteamIdentifier::Vanity(input.to_string()));
        }

        Err(IdentityError::InvalidFormat {
            input: input.to_string(),
        })
    }

    /// The canonical 64-bit key, when it can be computed locally.
    ///
    /// `None` for vanity names, which need the identity collaborator.
    pub fn to_id64(&self) -> Option<u64> {
        match self {
            SteamIdentifier::Id64(id64) => Some(*id64),
            SteamIdentifier::Legacy { y, z } => Some(steam_id64(*y, *z)),
            SteamIdentifier::Vanity(_) => None,
        }
    }
}

/// Convert a legacy `(y, z)` pair into a SteamID64.
pub fn steam_id64(y: u8, z: u64) -> u64 {
    z * 2 + STEAM_ID64_BASE + y as u64
}

/// Recover the legacy `(y, z)` pair from a SteamID64.
///
/// Returns `None` for keys below the base offset (synthetic demo keys fall
/// in that range and have no triplet form).
pub fn to_legacy(id64: u64) -> Option<(u8, u64)> {
    if id64 < STEAM_ID64_BASE {
        return None;
    }
    let diff = id64 - STEAM_ID64_BASE;
    let y = (diff % 2) as u8;
    let z = diff / 2;
    Some((y, z))
}

/// Render a SteamID64 as the legacy triplet, or the `STEAM_{id64}` fallback
/// label when no triplet form exists.
pub fn render_legacy(id64: u64) -> String {
    match to_legacy(id64) {
        Some((y, z)) => format!("STEAM_0:{}:{}", y, z),
        None => format!("STEAM_{}", id64),
    }
}

fn parse_id64(input: &str) -> Option<u64> {
    if input.len() != 17
        || !input.starts_with(STEAM_ID64_PREFIX)
        || !input.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    input.parse().ok()
}

fn parse_legacy(input: &str) -> Option<(u8, u64)> {
    let rest = input.strip_prefix("STEAM_")?;
    let mut parts = rest.split(':');

    let universe = parts.next()?;
    let y = parts.next()?;
    let z = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    if !matches!(universe, "0" | "1") || !matches!(y, "0" | "1") {
        return None;
    }
    if z.is_empty() || !z.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let y: u8 = y.parse().ok()?;
    let z: u64 = z.parse().ok()?;
    // Keep the computed id64 inside u64 range.
    if z > (u64::MAX - STEAM_ID64_BASE - 1) / 2 {
        return None;
    }
    Some((y, z))
}

fn is_vanity(input: &str) -> bool {
    !input.is_empty()
        && input
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
