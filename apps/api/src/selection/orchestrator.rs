//! Selection Orchestrator — pool, rank, fall back.
//!
//! Ranking is best-effort: if the adapter declines, the first three shortlist
//! entries (sampler order) are used with no theme. Only directory failures propagate.
//! A shortlist shorter than three is returned as-is and never sent to ranking.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::directory::{DirectoryError, PeopleDirectory};
use crate::selection::policy::{PipelineConfig, PICK_COUNT};
use crate::selection::pool::PoolBuilder;
use crate::selection::ranking::RankingAdapter;
use crate::selection::{GameMode, SelectionResult, ShortlistEntry};

pub struct Selector {
    pool: PoolBuilder,
    ranking: RankingAdapter,
}

impl Selector {
    pub fn new(
        directory: Arc<dyn PeopleDirectory>,
        config: PipelineConfig,
        ranking: RankingAdapter,
    ) -> Self {
        Self {
            pool: PoolBuilder::new(directory, config),
            ranking,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        self.pool.config()
    }

    /// Selects the trio for `date`, evaluating ages as of the current UTC date.
    pub async fn select(
        &self,
        date: NaiveDate,
        mode: GameMode,
    ) -> Result<SelectionResult, DirectoryError> {
        self.select_as_of(date, mode, Utc::now().date_naive()).await
    }

    pub async fn select_as_of(
        &self,
        date: NaiveDate,
        mode: GameMode,
        today: NaiveDate,
    ) -> Result<SelectionResult, DirectoryError> {
        let shortlist = self.pool.build(date, mode, today).await?;

        if shortlist.len() < PICK_COUNT {
            warn!(
                "Pool starved for {date} ({mode}): only {} eligible candidates",
                shortlist.len()
            );
            return Ok(SelectionResult {
                date,
                game_mode: mode,
                celebrities: shortlist,
                theme: None,
            });
        }

        let (celebrities, theme) = match self.ranking.rank(&shortlist, mode, date).await {
            Some(trio) => (trio.celebrities, Some(trio.theme)),
            None => (fallback_trio(shortlist), None),
        };

        info!(
            "Selected {:?} for {date} ({mode})",
            celebrities.iter().map(|c| c.id).collect::<Vec<_>>()
        );

        Ok(SelectionResult {
            date,
            game_mode: mode,
            celebrities,
            theme,
        })
    }
}

/// The deterministic choice: the first three in shortlist order.
fn fallback_trio(mut shortlist: Vec<ShortlistEntry>) -> Vec<ShortlistEntry> {
    shortlist.truncate(PICK_COUNT);
    shortlist
}
