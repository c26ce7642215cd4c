use chrono::NaiveDate;
use sqlx::PgPool;
use storage::{
    dto::statistics::{HomeLocation, LeaderboardEntry, StatisticsReport},
    error::Result,
    repository::statistics::StatisticsRepository,
    services::statistics,
};

/// Teams ranked by total points
pub async fn get_leaderboard(pool: &PgPool) -> Result<Vec<LeaderboardEntry>> {
    let snapshot = StatisticsRepository::new(pool).load_snapshot().await?;

    Ok(statistics::leaderboard(
        &snapshot.teams,
        &snapshot.games,
        &snapshot.scores,
    ))
}

/// Leaderboard plus participant statistics
pub async fn get_report(
    pool: &PgPool,
    home: &HomeLocation,
    today: NaiveDate,
) -> Result<StatisticsReport> {
    let snapshot = StatisticsRepository::new(pool).load_snapshot().await?;

    Ok(statistics::compute(&snapshot, home, today))
}
