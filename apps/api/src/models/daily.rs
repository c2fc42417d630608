use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::selection::ShortlistEntry;

#[derive(Debug, Clone, FromRow)]
pub struct DailySelectionRow {
    pub id: Uuid,
    pub celebrities: Json<Vec<ShortlistEntry>>,
    pub theme: Option<String>,
    pub created_at: DateTime<Utc>,
}
