use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::vote::{DailyStatRow, VoteRow};
use crate::selection::GameMode;
use crate::votes::{NewVote, VoteOutcome};

/// Records a vote and bumps the three celebrity counters in one transaction.
/// A visitor's second vote for the same day and mode changes nothing.
pub async fn submit_vote(pool: &PgPool, vote: &NewVote) -> Result<VoteOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let inserted: Option<Uuid> = sqlx::query_scalar(
        r#"
        INSERT INTO votes (id, date, game_mode, visitor_id, kiss, marry, destroy)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (visitor_id, date, game_mode) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(vote.date)
    .bind(vote.game_mode.as_str())
    .bind(&vote.visitor_id)
    .bind(vote.kiss)
    .bind(vote.marry)
    .bind(vote.destroy)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(vote_id) = inserted else {
        let existing: Uuid = sqlx::query_scalar(
            "SELECT id FROM votes WHERE visitor_id = $1 AND date = $2 AND game_mode = $3",
        )
        .bind(&vote.visitor_id)
        .bind(vote.date)
        .bind(vote.game_mode.as_str())
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        return Ok(VoteOutcome {
            vote_id: existing,
            already_voted: true,
        });
    };

    for (celebrity_id, choice) in vote.choices() {
        let (kiss, marry, destroy) = choice.increments();
        sqlx::query(
            r#"
            INSERT INTO daily_stats (date, game_mode, celebrity_id, kiss_count, marry_count, destroy_count)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (date, game_mode, celebrity_id) DO UPDATE SET
                kiss_count = daily_stats.kiss_count + EXCLUDED.kiss_count,
                marry_count = daily_stats.marry_count + EXCLUDED.marry_count,
                destroy_count = daily_stats.destroy_count + EXCLUDED.destroy_count
            "#,
        )
        .bind(vote.date)
        .bind(vote.game_mode.as_str())
        .bind(celebrity_id)
        .bind(kiss)
        .bind(marry)
        .bind(destroy)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(
        "Recorded vote {vote_id} for {} ({})",
        vote.date, vote.game_mode
    );

    Ok(VoteOutcome {
        vote_id,
        already_voted: false,
    })
}

pub async fn count_votes(pool: &PgPool, date: NaiveDate, mode: GameMode) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE date = $1 AND game_mode = $2")
        .bind(date)
        .bind(mode.as_str())
        .fetch_one(pool)
        .await
}

pub async fn get_daily_stats(
    pool: &PgPool,
    date: NaiveDate,
    mode: GameMode,
) -> Result<Vec<DailyStatRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT celebrity_id, kiss_count, marry_count, destroy_count
        FROM daily_stats
        WHERE date = $1 AND game_mode = $2
        ORDER BY celebrity_id
        "#,
    )
    .bind(date)
    .bind(mode.as_str())
    .fetch_all(pool)
    .await
}

pub async fn get_user_vote(
    pool: &PgPool,
    date: NaiveDate,
    mode: GameMode,
    visitor_id: &str,
) -> Result<Option<VoteRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM votes WHERE visitor_id = $1 AND date = $2 AND game_mode = $3")
        .bind(visitor_id)
        .bind(date)
        .bind(mode.as_str())
        .fetch_optional(pool)
        .await
}
