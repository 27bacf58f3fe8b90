//! Habitat repository
//!
//! Habitat CRUD plus the animal association. Foreign keys guard both
//! directions; violations surface as `DbError::ConstraintViolation`.

use async_trait::async_trait;
use sqlx::PgPool;

use super::HabitatRepository;
use crate::db::DbError;
use crate::models::{Habitat, HabitatAnimalRow, HabitatUpdate, NewHabitat};

/// PostgreSQL-backed habitat repository
#[derive(Clone)]
pub struct PgHabitatRepo {
    pool: PgPool,
}

impl PgHabitatRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HabitatRepository for PgHabitatRepo {
    async fn list(&self) -> Result<Vec<Habitat>, DbError> {
        let habitats = sqlx::query_as(
            "SELECT idHabitat AS id, nomeHabitat AS name FROM habitat ORDER BY idHabitat",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(habitats)
    }

    async fn create(&self, habitat: NewHabitat) -> Result<Habitat, DbError> {
        let created: Habitat = sqlx::query_as(
            r#"
            INSERT INTO habitat (nomeHabitat) VALUES ($1)
            RETURNING idHabitat AS id, nomeHabitat AS name
            "#,
        )
        .bind(habitat.name.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = created.id, "created habitat");
        Ok(created)
    }

    async fn update(&self, id: i32, update: HabitatUpdate) -> Result<Habitat, DbError> {
        sqlx::query_as(
            r#"
            UPDATE habitat SET nomeHabitat = $1 WHERE idHabitat = $2
            RETURNING idHabitat AS id, nomeHabitat AS name
            "#,
        )
        .bind(update.name.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("habitat", id))
    }

    /// Single statement; a habitat still referenced by animals or
    /// attractions is rejected by the foreign keys.
    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let deleted = sqlx::query("DELETE FROM habitat WHERE idHabitat = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::not_found("habitat", id));
        }
        tracing::debug!(id, "deleted habitat");
        Ok(())
    }

    async fn add_animal(&self, habitat_id: i32, animal_id: i32) -> Result<(), DbError> {
        sqlx::query("INSERT INTO animal_habitat (idAnimal, idHabitat) VALUES ($1, $2)")
            .bind(animal_id)
            .bind(habitat_id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(habitat_id, animal_id, "linked animal to habitat");
        Ok(())
    }

    /// Three-way join; one row per animal, habitat columns repeated.
    async fn animals(&self, habitat_id: i32) -> Result<Vec<HabitatAnimalRow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                h.idHabitat    AS habitat_id,
                h.nomeHabitat  AS habitat_name,
                a.idAnimal     AS animal_id,
                a.nomeAnimal   AS animal_name,
                a.idadeAnimal  AS animal_age,
                a.generoAnimal AS animal_gender
            FROM habitat h
            JOIN animal_habitat ah ON ah.idHabitat = h.idHabitat
            JOIN animal a ON a.idAnimal = ah.idAnimal
            WHERE h.idHabitat = $1
            ORDER BY h.idHabitat, a.idAnimal
            "#,
        )
        .bind(habitat_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
