//! Ranking Adapter — asks the text-generation service to pick the day's trio.
//!
//! The reply is free text that should contain one JSON object:
//! `{"selectedIndices": [i, j, k], "theme": "..."}` with 1-based indices into the shortlist.
//! Every failure (no key, transport, bad status, no JSON, wrong shape, bad indices)
//! collapses to `None`; nothing escapes this module.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{extract_json_object, LlmClient, LlmError, TextGenerator};
use crate::selection::policy::PICK_COUNT;
use crate::selection::prompts::build_ranking_prompt;
use crate::selection::{GameMode, ShortlistEntry};

pub const DEFAULT_THEME: &str = "Today's challenge";

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("ranking service not configured")]
    NotConfigured,

    #[error("ranking service failed: {0}")]
    Service(#[from] LlmError),

    #[error("reply contains no JSON object")]
    NoJsonObject,

    #[error("reply JSON is invalid: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected 3 indices, got {0}")]
    WrongIndexCount(usize),

    #[error("only {valid} of the selected indices resolve to distinct shortlist entries")]
    UnresolvedIndices { valid: usize },
}

/// The reply shape the prompt asks for. Fields are optional so that a missing
/// field is reported as a validation failure rather than a parse failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankingReply {
    selected_indices: Option<Vec<i64>>,
    theme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTrio {
    pub celebrities: Vec<ShortlistEntry>,
    pub theme: String,
}

/// Parses and validates a raw reply against the shortlist it was generated from.
pub fn parse_ranking_reply(
    reply: &str,
    shortlist: &[ShortlistEntry],
) -> Result<RankedTrio, RankingError> {
    let json = extract_json_object(reply).ok_or(RankingError::NoJsonObject)?;
    let parsed: RankingReply = serde_json::from_str(json)?;

    let indices = parsed.selected_indices.unwrap_or_default();
    if indices.len() != PICK_COUNT {
        return Err(RankingError::WrongIndexCount(indices.len()));
    }

    let mut seen = HashSet::new();
    let celebrities: Vec<ShortlistEntry> = indices
        .iter()
        .filter(|&&i| seen.insert(i))
        .filter_map(|&i| {
            usize::try_from(i)
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| shortlist.get(i))
                .cloned()
        })
        .collect();

    if celebrities.len() != PICK_COUNT {
        return Err(RankingError::UnresolvedIndices {
            valid: celebrities.len(),
        });
    }

    let theme = parsed
        .theme
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_THEME.to_string());

    Ok(RankedTrio { celebrities, theme })
}

pub struct RankingAdapter {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl RankingAdapter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub fn disabled() -> Self {
        Self { generator: None }
    }

    /// Builds an adapter backed by `LlmClient`, or a disabled one when no key is set.
    pub fn from_api_key(api_key: Option<String>) -> Result<Self, LlmError> {
        match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => Ok(Self::new(Arc::new(LlmClient::new(key)?))),
            None => Ok(Self::disabled()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Picks three entries and a theme, or `None` if anything goes wrong.
    pub async fn rank(
        &self,
        shortlist: &[ShortlistEntry],
        mode: GameMode,
        date: NaiveDate,
    ) -> Option<RankedTrio> {
        match self.try_rank(shortlist, mode, date).await {
            Ok(trio) => {
                info!("Ranking picked {:?} with theme '{}'", ids(&trio.celebrities), trio.theme);
                Some(trio)
            }
            Err(RankingError::NotConfigured) => {
                info!("No ranking key configured, using fallback selection");
                None
            }
            Err(e) => {
                warn!("Ranking unavailable, using fallback selection: {e}");
                None
            }
        }
    }

    async fn try_rank(
        &self,
        shortlist: &[ShortlistEntry],
        mode: GameMode,
        date: NaiveDate,
    ) -> Result<RankedTrio, RankingError> {
        let generator = self.generator.as_ref().ok_or(RankingError::NotConfigured)?;
        let prompt = build_ranking_prompt(shortlist, mode, date);
        let reply = generator.complete(&prompt).await?;
        parse_ranking_reply(&reply, shortlist)
    }
}

fn ids(entries: &[ShortlistEntry]) -> Vec<u64> {
    entries.iter().map(|e| e.id).collect()
}
