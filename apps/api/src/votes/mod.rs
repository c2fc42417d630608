//! Votes — one kiss/marry/destroy ballot per visitor per day and mode, plus tallies.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::vote::DailyStatRow;
use crate::selection::{parse_date, parse_mode, GameMode};

pub mod handlers;

/// The three slots on a ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Kiss,
    Marry,
    Destroy,
}

impl Choice {
    /// Counter increments as (kiss, marry, destroy).
    pub fn increments(&self) -> (i64, i64, i64) {
        match self {
            Choice::Kiss => (1, 0, 0),
            Choice::Marry => (0, 1, 0),
            Choice::Destroy => (0, 0, 1),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub date: String,
    pub game_mode: String,
    pub visitor_id: String,
    pub kiss: u64,
    pub marry: u64,
    pub destroy: u64,
}

/// A validated ballot, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    pub date: NaiveDate,
    pub game_mode: GameMode,
    pub visitor_id: String,
    pub kiss: i64,
    pub marry: i64,
    pub destroy: i64,
}

impl NewVote {
    pub fn choices(&self) -> [(i64, Choice); 3] {
        [
            (self.kiss, Choice::Kiss),
            (self.marry, Choice::Marry),
            (self.destroy, Choice::Destroy),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOutcome {
    pub vote_id: Uuid,
    pub already_voted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChoiceCounts {
    pub kiss: i64,
    pub marry: i64,
    pub destroy: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_votes: i64,
    pub stats: BTreeMap<i64, ChoiceCounts>,
}

fn celebrity_id(raw: u64, slot: &str) -> Result<i64, AppError> {
    i64::try_from(raw).map_err(|_| AppError::Validation(format!("{slot} id {raw} is out of range")))
}

impl VoteRequest {
    pub fn validate(self) -> Result<NewVote, AppError> {
        let visitor_id = self.visitor_id.trim().to_string();
        if visitor_id.is_empty() {
            return Err(AppError::Validation("visitorId cannot be empty".to_string()));
        }

        let (kiss, marry, destroy) = (
            celebrity_id(self.kiss, "kiss")?,
            celebrity_id(self.marry, "marry")?,
            celebrity_id(self.destroy, "destroy")?,
        );
        if kiss == marry || kiss == destroy || marry == destroy {
            return Err(AppError::Validation(
                "kiss, marry and destroy must name three different celebrities".to_string(),
            ));
        }

        Ok(NewVote {
            date: parse_date(&self.date)?,
            game_mode: parse_mode(&self.game_mode)?,
            visitor_id,
            kiss,
            marry,
            destroy,
        })
    }
}

/// Folds counter rows into the per-celebrity response map.
pub fn build_stats(total_votes: i64, rows: Vec<DailyStatRow>) -> StatsResponse {
    let stats = rows
        .into_iter()
        .map(|row| {
            (
                row.celebrity_id,
                ChoiceCounts {
                    kiss: row.kiss_count,
                    marry: row.marry_count,
                    destroy: row.destroy_count,
                },
            )
        })
        .collect();

    StatsResponse { total_votes, stats }
}
