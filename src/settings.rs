//! Roster configuration
//!
//! Storage keys, count bounds and the user API endpoint. Any field missing
//! from a JSON override keeps its default.

use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === User API ===
    /// Base URL of the random user API
    pub api_base: String,
    /// Gender filter sent with each request (`None` = any)
    pub gender: Option<String>,

    // === Storage ===
    /// LocalStorage key for the requested user count
    pub count_key: String,
    /// LocalStorage key for the favorites list
    pub favorites_key: String,

    // === Count input ===
    /// Count used when nothing is stored
    pub default_count: u32,
    /// Lowest accepted count
    pub min_count: u32,
    /// Highest accepted count
    pub max_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "https://randomuser.me/api/".to_string(),
            gender: Some("male".to_string()),

            count_key: "userCount".to_string(),
            favorites_key: "favorites".to_string(),

            default_count: 5,
            min_count: 1,
            max_count: 10,
        }
    }
}

impl Settings {
    /// Parse settings overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        if settings.min_count > settings.max_count {
            log::warn!(
                "Count bounds inverted ({} > {}), swapping",
                settings.min_count,
                settings.max_count
            );
            return Ok(Self {
                min_count: settings.max_count,
                max_count: settings.min_count,
                ..settings
            });
        }
        Ok(settings)
    }

    /// Count bounds as `(low, high)`, whichever order the fields hold
    pub fn count_bounds(&self) -> (u32, u32) {
        (
            self.min_count.min(self.max_count),
            self.min_count.max(self.max_count),
        )
    }

    /// Clamp a requested count into the accepted range
    pub fn clamp_count(&self, count: u32) -> u32 {
        let (min, max) = self.count_bounds();
        count.clamp(min, max)
    }
}
