use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{PointsError, Score, parse_points};

/// Points as sent by a client: a JSON number or the raw form text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointsInput {
    Number(f64),
    Text(String),
}

impl PointsInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    pub fn to_decimal(&self) -> Result<Decimal, PointsError> {
        match self {
            Self::Number(value) if value.is_finite() => parse_points(&value.to_string()),
            Self::Number(value) => Err(PointsError::NotNumeric(value.to_string())),
            Self::Text(text) => parse_points(text),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertScoreRequest {
    #[schema(value_type = String, example = "12,5")]
    pub points: PointsInput,
}

/// Scores for several teams in one game. Blank values leave the team's
/// score untouched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkScoreRequest {
    pub scores: Vec<TeamPoints>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamPoints {
    pub team_id: Uuid,
    #[schema(value_type = String, example = "7")]
    pub points: PointsInput,
}

impl BulkScoreRequest {
    /// Parses every non-blank value, failing on the first malformed one
    pub fn parse(&self) -> Result<Vec<(Uuid, Decimal)>, (Uuid, PointsError)> {
        self.scores
            .iter()
            .filter(|entry| !entry.points.is_blank())
            .map(|entry| {
                entry
                    .points
                    .to_decimal()
                    .map(|points| (entry.team_id, points))
                    .map_err(|e| (entry.team_id, e))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScoreResponse {
    pub score_id: Uuid,
    pub team_id: Uuid,
    pub game_id: Uuid,
    pub points: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Score> for ScoreResponse {
    fn from(score: Score) -> Self {
        Self {
            score_id: score.score_id,
            team_id: score.team_id,
            game_id: score.game_id,
            points: score.points,
            created_at: score.created_at,
            updated_at: score.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_input_accepts_numbers_and_text() {
        let number: UpsertScoreRequest = serde_json::from_str(r#"{"points": 12.5}"#).unwrap();
        assert_eq!(number.points.to_decimal(), Ok(Decimal::new(125, 1)));

        let text: UpsertScoreRequest = serde_json::from_str(r#"{"points": "12,5"}"#).unwrap();
        assert_eq!(text.points.to_decimal(), Ok(Decimal::new(125, 1)));
    }

    #[test]
    fn test_points_input_rejects_words() {
        let req: UpsertScoreRequest = serde_json::from_str(r#"{"points": "tanti"}"#).unwrap();
        assert!(matches!(
            req.points.to_decimal(),
            Err(PointsError::NotNumeric(_))
        ));
    }

    #[test]
    fn test_bulk_skips_blank_values() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let req = BulkScoreRequest {
            scores: vec![
                TeamPoints {
                    team_id: a,
                    points: PointsInput::Text("3".to_string()),
                },
                TeamPoints {
                    team_id: b,
                    points: PointsInput::Text("  ".to_string()),
                },
            ],
        };

        assert_eq!(req.parse(), Ok(vec![(a, Decimal::from(3))]));
    }

    #[test]
    fn test_bulk_reports_offending_team() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let req = BulkScoreRequest {
            scores: vec![
                TeamPoints {
                    team_id: a,
                    points: PointsInput::Number(1.0),
                },
                TeamPoints {
                    team_id: b,
                    points: PointsInput::Text("x".to_string()),
                },
            ],
        };

        let (team_id, error) = req.parse().unwrap_err();
        assert_eq!(team_id, b);
        assert_eq!(error, PointsError::NotNumeric("x".to_string()));
    }
}
