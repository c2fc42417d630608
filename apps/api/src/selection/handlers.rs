//! Axum route handler for the daily selection.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::selection::policy::PICK_COUNT;
use crate::selection::{parse_date, parse_mode, SelectionResult};
use crate::state::AppState;
use crate::store::daily::{get_daily_selection, store_daily_selection};

#[derive(Debug, Default, Deserialize)]
pub struct CelebritiesQuery {
    pub date: Option<String>,
    pub mode: Option<String>,
}

/// GET /api/celebrities?date=YYYY-MM-DD&mode=women|men
///
/// Returns the stored selection for the day if there is one. Otherwise runs the
/// pipeline and stores the result, unless the pool starved.
pub async fn handle_get_celebrities(
    State(state): State<AppState>,
    Query(params): Query<CelebritiesQuery>,
) -> Result<Json<SelectionResult>, AppError> {
    let date = match params.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };
    let mode = match params.mode.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        Some(raw) => parse_mode(raw)?,
        None => Default::default(),
    };

    if let Some(stored) = get_daily_selection(&state.db, date, mode).await? {
        info!("Serving stored selection for {date} ({mode})");
        return Ok(Json(stored));
    }

    let selection = state.selector.select(date, mode).await?;
    if !selection.is_complete() {
        return Err(AppError::PoolStarved(format!(
            "only {} of {PICK_COUNT} celebrities available for {date} ({mode})",
            selection.celebrities.len()
        )));
    }

    let stored = store_daily_selection(&state.db, &selection).await?;
    Ok(Json(stored))
}
