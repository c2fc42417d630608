use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VoteRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub game_mode: String,
    pub visitor_id: String,
    pub kiss: i64,
    pub marry: i64,
    pub destroy: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DailyStatRow {
    pub celebrity_id: i64,
    pub kiss_count: i64,
    pub marry_count: i64,
    pub destroy_count: i64,
}
