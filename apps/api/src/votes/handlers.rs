//! Axum route handlers for the Votes API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::vote::VoteRow;
use crate::state::AppState;
use crate::selection::{parse_date, parse_mode};
use crate::store::votes::{count_votes, get_daily_stats, get_user_vote, submit_vote};
use crate::votes::{build_stats, StatsResponse, VoteOutcome, VoteRequest};

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: String,
    pub mode: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorQuery {
    pub date: String,
    pub mode: String,
    pub visitor_id: String,
}

/// POST /api/votes
pub async fn handle_submit_vote(
    State(state): State<AppState>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<VoteOutcome>, AppError> {
    let vote = request.validate()?;
    let outcome = submit_vote(&state.db, &vote).await?;
    Ok(Json(outcome))
}

/// GET /api/votes/stats?date=&mode=
pub async fn handle_get_stats(
    State(state): State<AppState>,
    Query(params): Query<DayQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let date = parse_date(&params.date)?;
    let mode = parse_mode(&params.mode)?;

    let total_votes = count_votes(&state.db, date, mode).await?;
    let rows = get_daily_stats(&state.db, date, mode).await?;
    Ok(Json(build_stats(total_votes, rows)))
}

/// GET /api/votes/mine?date=&mode=&visitorId=
pub async fn handle_get_user_vote(
    State(state): State<AppState>,
    Query(params): Query<VisitorQuery>,
) -> Result<Json<Option<VoteRow>>, AppError> {
    let date = parse_date(&params.date)?;
    let mode = parse_mode(&params.mode)?;
    if params.visitor_id.trim().is_empty() {
        return Err(AppError::Validation("visitorId cannot be empty".to_string()));
    }

    let vote = get_user_vote(&state.db, date, mode, params.visitor_id.trim()).await?;
    Ok(Json(vote))
}
