use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Points a team earned in a game. At most one row per (team, game).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Score {
    pub score_id: Uuid,
    pub points: Decimal,
    pub team_id: Uuid,
    pub game_id: Uuid,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointsError {
    #[error("points value is empty")]
    Empty,

    #[error("'{0}' is not a valid number")]
    NotNumeric(String),

    #[error("'{0}' has more than two decimal places")]
    TooPrecise(String),

    #[error("'{0}' is out of range")]
    OutOfRange(String),
}

/// Decimal places kept by the `scores.points` column
const MAX_POINTS_SCALE: u32 = 2;

/// Exclusive bound on the magnitude of `scores.points` (NUMERIC(10, 2))
const POINTS_LIMIT: i64 = 100_000_000;

/// Parses a points value typed into a form. Accepts a decimal comma
/// ("12,5") as well as a dot.
pub fn parse_points(raw: &str) -> Result<Decimal, PointsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PointsError::Empty);
    }

    let normalized = trimmed.replace(',', ".");
    let points = Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| PointsError::NotNumeric(trimmed.to_string()))?
        .normalize();

    if points.abs() >= Decimal::from(POINTS_LIMIT) {
        return Err(PointsError::OutOfRange(trimmed.to_string()));
    }
    if points.scale() > MAX_POINTS_SCALE {
        return Err(PointsError::TooPrecise(trimmed.to_string()));
    }

    Ok(points)
}
