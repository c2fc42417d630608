// Daily selection pipeline: seed → sample → filter → rank → fallback.
// The directory and the ranking service are injected; nothing here reads the environment.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::directory::Gender;
use crate::errors::AppError;

pub mod eligibility;
pub mod handlers;
pub mod orchestrator;
pub mod policy;
pub mod pool;
pub mod prompts;
pub mod ranking;
pub mod rng;
pub mod sampler;

/// Which half of the directory a day's game draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Women,
    Men,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Women => "women",
            GameMode::Men => "men",
        }
    }

    pub fn gender(&self) -> Gender {
        match self {
            GameMode::Women => Gender::Female,
            GameMode::Men => Gender::Male,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "women" => Ok(GameMode::Women),
            "men" => Ok(GameMode::Men),
            other => Err(format!("unknown game mode '{other}' (expected 'women' or 'men')")),
        }
    }
}

/// Parses an ISO calendar date (`YYYY-MM-DD`) from a request parameter.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("date must be YYYY-MM-DD, got '{raw}'")))
}

pub fn parse_mode(raw: &str) -> Result<GameMode, AppError> {
    raw.trim().parse::<GameMode>().map_err(AppError::Validation)
}

/// Public projection of an eligible candidate, as shown to the ranking service and the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortlistEntry {
    pub id: u64,
    pub name: String,
    pub image_url: String,
    pub known_for: String,
}

/// A finished day's selection. `celebrities` holds exactly 3 entries unless the pool starved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub date: NaiveDate,
    pub game_mode: GameMode,
    pub celebrities: Vec<ShortlistEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl SelectionResult {
    pub fn is_complete(&self) -> bool {
        self.celebrities.len() == policy::PICK_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_mode_round_trips_through_str() {
        assert_eq!("women".parse::<GameMode>().unwrap(), GameMode::Women);
        assert_eq!("men".parse::<GameMode>().unwrap(), GameMode::Men);
        assert!("Women".parse::<GameMode>().is_err());
        assert_eq!(GameMode::Men.to_string(), "men");
    }

    #[test]
    fn test_parse_request_params() {
        assert_eq!(
            parse_date(" 2026-01-16 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()
        );
        assert!(matches!(parse_date("2026-13-01"), Err(AppError::Validation(_))));
        assert_eq!(parse_mode("men").unwrap(), GameMode::Men);
        assert!(matches!(parse_mode("both"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_game_mode_gender() {
        assert_eq!(GameMode::Women.gender(), Gender::Female);
        assert_eq!(GameMode::Men.gender(), Gender::Male);
    }

    #[test]
    fn test_selection_result_wire_shape() {
        let result = SelectionResult {
            date: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(),
            game_mode: GameMode::Women,
            celebrities: vec![ShortlistEntry {
                id: 1,
                name: "A".to_string(),
                image_url: "https://img/a.jpg".to_string(),
                known_for: "Film".to_string(),
            }],
            theme: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["date"], "2026-01-16");
        assert_eq!(json["gameMode"], "women");
        assert_eq!(json["celebrities"][0]["imageUrl"], "https://img/a.jpg");
        assert_eq!(json["celebrities"][0]["knownFor"], "Film");
        assert!(json.get("theme").is_none(), "absent theme must be omitted");
        assert!(!result.is_complete());
    }
}
