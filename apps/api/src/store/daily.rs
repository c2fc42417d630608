use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::daily::DailySelectionRow;
use crate::selection::{GameMode, SelectionResult};

/// Returns the stored selection for a day and mode, if one exists.
pub async fn get_daily_selection(
    pool: &PgPool,
    date: NaiveDate,
    mode: GameMode,
) -> Result<Option<SelectionResult>, sqlx::Error> {
    let row: Option<DailySelectionRow> = sqlx::query_as(
        "SELECT id, celebrities, theme, created_at FROM daily_selections WHERE date = $1 AND game_mode = $2",
    )
    .bind(date)
    .bind(mode.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| {
        debug!("Loaded daily selection {} (stored {})", row.id, row.created_at);
        SelectionResult {
            date,
            game_mode: mode,
            celebrities: row.celebrities.0,
            theme: row.theme,
        }
    }))
}

/// Stores a selection unless one already exists for its day and mode.
/// Returns whichever selection is stored afterwards, so concurrent first requests agree.
pub async fn store_daily_selection(
    pool: &PgPool,
    selection: &SelectionResult,
) -> Result<SelectionResult, sqlx::Error> {
    let inserted = sqlx::query(
        r#"
        INSERT INTO daily_selections (id, date, game_mode, celebrities, theme)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (date, game_mode) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(selection.date)
    .bind(selection.game_mode.as_str())
    .bind(Json(&selection.celebrities))
    .bind(selection.theme.as_deref())
    .execute(pool)
    .await?
    .rows_affected();

    if inserted == 1 {
        info!(
            "Stored daily selection for {} ({})",
            selection.date, selection.game_mode
        );
        return Ok(selection.clone());
    }

    get_daily_selection(pool, selection.date, selection.game_mode)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}
