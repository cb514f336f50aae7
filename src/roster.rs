//! Random user roster model
//!
//! Response shape of the random user API. Every field is optional on the
//! wire and falls back to an empty value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("malformed user response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Name {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Picture {
    /// Large portrait URL
    pub large: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub city: String,
    pub country: String,
}

/// A user card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: Name,
    /// Also the user's identity in the favorites list
    pub email: String,
    pub picture: Picture,
    pub location: Location,
}

impl User {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.first, self.name.last)
            .trim()
            .to_string()
    }

    /// "City, Country"
    pub fn location_label(&self) -> String {
        match (self.location.city.is_empty(), self.location.country.is_empty()) {
            (false, false) => format!("{}, {}", self.location.city, self.location.country),
            (false, true) => self.location.city.clone(),
            (true, false) => self.location.country.clone(),
            (true, true) => String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RandomUserResponse {
    results: Vec<User>,
}

/// Parse a response body into users
pub fn parse_users(body: &str) -> Result<Vec<User>, RosterError> {
    let response: RandomUserResponse = serde_json::from_str(body)?;
    log::debug!("Parsed {} users", response.results.len());
    Ok(response.results)
}

/// URL requesting `count` users
pub fn request_url(settings: &Settings, count: u32) -> String {
    match &settings.gender {
        Some(gender) => format!("{}?gender={}&results={}", settings.api_base, gender, count),
        None => format!("{}?results={}", settings.api_base, count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "results": [
            {
                "gender": "male",
                "name": {"title": "Mr", "first": "Brad", "last": "Gibson"},
                "location": {"city": "Kilkenny", "country": "Ireland", "postcode": 93027},
                "email": "brad.gibson@example.com",
                "picture": {"large": "https://randomuser.me/api/portraits/men/75.jpg"}
            },
            {
                "email": "no.details@example.com"
            }
        ],
        "info": {"seed": "abc", "results": 2, "page": 1, "version": "1.4"}
    }"#;

    #[test]
    fn test_parse_users() {
        let users = parse_users(SAMPLE).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].full_name(), "Brad Gibson");
        assert_eq!(users[0].location_label(), "Kilkenny, Ireland");
        assert_eq!(users[0].picture.large, "https://randomuser.me/api/portraits/men/75.jpg");
    }

    #[test]
    fn test_missing_fields_default() {
        let users = parse_users(SAMPLE).unwrap();
        let sparse = &users[1];
        assert_eq!(sparse.email, "no.details@example.com");
        assert_eq!(sparse.full_name(), "");
        assert_eq!(sparse.location_label(), "");
    }

    #[test]
    fn test_missing_results_is_empty() {
        assert!(parse_users(r#"{"error": "busy"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(parse_users("<html>"), Err(RosterError::Malformed(_))));
    }

    #[test]
    fn test_request_url() {
        let settings = Settings::default();
        assert_eq!(
            request_url(&settings, 5),
            "https://randomuser.me/api/?gender=male&results=5"
        );

        let any = Settings {
            gender: None,
            ..Settings::default()
        };
        assert_eq!(request_url(&any, 3), "https://randomuser.me/api/?results=3");
    }
}
