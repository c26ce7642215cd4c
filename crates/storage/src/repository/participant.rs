use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::participant::ParticipantRequest;
use crate::error::{Result, StorageError};
use crate::models::{Participant, Sex};
use crate::services::geo::Coordinates;

pub(crate) const PARTICIPANT_COLUMNS: &str = "participant_id, name, birth_date, sex, locality, \
     province, facility, latitude, longitude, team_id, created_at";

/// Row as stored; `sex` holds whatever code the row was written with
#[derive(FromRow)]
pub(crate) struct ParticipantRow {
    participant_id: Uuid,
    name: String,
    birth_date: Option<NaiveDate>,
    sex: String,
    locality: Option<String>,
    province: Option<String>,
    facility: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    team_id: Option<Uuid>,
    created_at: NaiveDateTime,
}

impl From<ParticipantRow> for Participant {
    fn from(row: ParticipantRow) -> Self {
        // a lone coordinate is as good as none
        let (latitude, longitude) = match (row.latitude, row.longitude) {
            (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
            _ => (None, None),
        };

        Self {
            participant_id: row.participant_id,
            name: row.name,
            birth_date: row.birth_date,
            sex: Sex::from_code(&row.sex),
            locality: row.locality,
            province: row.province,
            facility: row.facility,
            latitude,
            longitude,
            team_id: row.team_id,
            created_at: row.created_at,
        }
    }
}

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Participant>> {
        let sql = format!("SELECT {PARTICIPANT_COLUMNS} FROM participants ORDER BY name");
        let rows = sqlx::query_as::<_, ParticipantRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Participant::from).collect())
    }

    pub async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<Participant>> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE team_id = $1 ORDER BY name"
        );
        let rows = sqlx::query_as::<_, ParticipantRow>(&sql)
            .bind(team_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Participant::from).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Participant> {
        let sql = format!("SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE participant_id = $1");
        let row = sqlx::query_as::<_, ParticipantRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    /// Create a participant. An unknown `team_id` is reported as not found.
    pub async fn create(
        &self,
        req: &ParticipantRequest,
        coordinates: Option<Coordinates>,
    ) -> Result<Participant> {
        let sql = format!(
            r#"
            INSERT INTO participants (name, birth_date, sex, locality, province, facility,
                                      latitude, longitude, team_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ParticipantRow>(&sql)
            .bind(req.name.trim())
            .bind(req.birth_date)
            .bind(req.sex().as_code())
            .bind(&req.locality)
            .bind(&req.province)
            .bind(&req.facility)
            .bind(coordinates.map(|c| c.latitude))
            .bind(coordinates.map(|c| c.longitude))
            .bind(req.team_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_foreign_key_violation())?;

        Ok(row.into())
    }

    /// Replace every field of a participant
    pub async fn update(
        &self,
        id: Uuid,
        req: &ParticipantRequest,
        coordinates: Option<Coordinates>,
    ) -> Result<Participant> {
        let sql = format!(
            r#"
            UPDATE participants
            SET name = $2,
                birth_date = $3,
                sex = $4,
                locality = $5,
                province = $6,
                facility = $7,
                latitude = $8,
                longitude = $9,
                team_id = $10
            WHERE participant_id = $1
            RETURNING {PARTICIPANT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ParticipantRow>(&sql)
            .bind(id)
            .bind(req.name.trim())
            .bind(req.birth_date)
            .bind(req.sex().as_code())
            .bind(&req.locality)
            .bind(&req.province)
            .bind(&req.facility)
            .bind(coordinates.map(|c| c.latitude))
            .bind(coordinates.map(|c| c.longitude))
            .bind(req.team_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_foreign_key_violation())?
            .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM participants WHERE participant_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
