use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validate_not_blank;
use crate::models::Game;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GameResponse {
    pub game_id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// A game with one line per team, scored or not
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GameDetailResponse {
    pub game_id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub scores: Vec<ScoreSheetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScoreSheetEntry {
    pub team_id: Uuid,
    pub team_name: String,
    pub score_id: Option<Uuid>,
    pub points: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateGameRequest {
    #[validate(
        length(min = 1, max = 100, message = "Game name must be between 1 and 100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateGameRequest {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        Self {
            game_id: game.game_id,
            name: game.name,
            created_at: game.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_name_required() {
        let req = CreateGameRequest {
            name: "Corsa nei sacchi".to_string(),
        };
        assert!(req.validate().is_ok());

        let req = CreateGameRequest {
            name: "   ".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_game_update_rejects_blank_name() {
        let req = UpdateGameRequest {
            name: Some("  ".to_string()),
        };
        assert!(req.validate().is_err());

        let req = UpdateGameRequest { name: None };
        assert!(req.validate().is_ok());
    }
}
