//! Player profile model
//!
//! Display data for the visitor's account, fetched from the identity
//! collaborator or synthesized by the demo fallback when the lookup fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persona presence states, by wire code 0..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaState {
    Offline,
    Online,
    Busy,
    DoNotDisturb,
    Away,
    LookingToTrade,
    LookingToPlay,
    Unknown,
}

impl PersonaState {
    /// Map the numeric wire code to a state; unknown codes degrade to
    /// `Unknown` rather than failing the profile fetch.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => PersonaState::Offline,
            1 => PersonaState::Online,
            2 => PersonaState::Busy,
            3 => PersonaState::DoNotDisturb,
            4 => PersonaState::Away,
            5 => PersonaState::LookingToTrade,
            6 => PersonaState::LookingToPlay,
            _ => PersonaState::Unknown,
        }
    }

    /// Display text for the status line.
    pub fn text(&self) -> &'static str {
        match self {
            PersonaState::Offline => "Offline",
            PersonaState::Online => "Online",
            PersonaState::Busy => "Busy",
            PersonaState::DoNotDisturb => "Do Not Disturb",
            PersonaState::Away => "Away",
            PersonaState::LookingToTrade => "Looking to Trade",
            PersonaState::LookingToPlay => "Looking to Play",
            PersonaState::Unknown => "Unknown",
        }
    }

    /// CSS class the web UI attached to the status element.
    pub fn css_class(&self) -> &'static str {
        match self {
            PersonaState::Online | PersonaState::LookingToTrade | PersonaState::LookingToPlay => {
                "status-online"
            }
            PersonaState::Busy => "status-busy",
            PersonaState::DoNotDisturb => "status-dnd",
            PersonaState::Away => "status-away",
            PersonaState::Offline | PersonaState::Unknown => "status-offline",
        }
    }
}

/// Avatar image URLs in the three sizes the profile API serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarSet {
    pub small: String,
    pub medium: String,
    pub large: String,
}

impl AvatarSet {
    /// Placeholder used by synthesized demo profiles.
    pub fn placeholder() -> Self {
        let url = "images/steam-avatar-placeholder.svg".to_string();
        Self {
            small: url.clone(),
            medium: url.clone(),
            large: url,
        }
    }

    /// Best available image, largest first.
    pub fn best(&self) -> &str {
        if !self.large.is_empty() {
            &self.large
        } else if !self.medium.is_empty() {
            &self.medium
        } else {
            &self.small
        }
    }
}

/// Full profile shown in the account panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Legacy triplet rendering (`STEAM_0:y:z`)
    pub steam_id: String,

    /// Canonical 17-digit account key
    pub steam_id64: String,

    pub nickname: String,
    pub avatar: AvatarSet,
    pub profile_url: String,
    pub status: PersonaState,
    pub level: u32,

    /// Displayed wallet balance (minor units); synthetic for demo profiles
    pub balance: i64,

    pub country: String,

    /// True when the profile was synthesized by the fallback generator
    pub is_demo: bool,

    pub fetched_at: DateTime<Utc>,

    pub last_log_off: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_state_codes() {
        assert_eq!(PersonaState::from_code(0), PersonaState::Offline);
        assert_eq!(PersonaState::from_code(1), PersonaState::Online);
        assert_eq!(PersonaState::from_code(6), PersonaState::LookingToPlay);
        assert_eq!(PersonaState::from_code(42), PersonaState::Unknown);
    }

    #[test]
    fn test_css_classes_match_ui_styles() {
        assert_eq!(PersonaState::Online.css_class(), "status-online");
        assert_eq!(PersonaState::LookingToTrade.css_class(), "status-online");
        assert_eq!(PersonaState::DoNotDisturb.css_class(), "status-dnd");
        assert_eq!(PersonaState::Unknown.css_class(), "status-offline");
    }

    #[test]
    fn test_avatar_best_prefers_large() {
        let mut avatar = AvatarSet::placeholder();
        assert_eq!(avatar.best(), "images/steam-avatar-placeholder.svg");

        avatar.large = String::new();
        avatar.medium = "medium.jpg".to_string();
        assert_eq!(avatar.best(), "medium.jpg");
    }
}
