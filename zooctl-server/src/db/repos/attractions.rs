//! Attraction repository
//!
//! `habitatId` is optional; when set, the foreign key to `habitat` guards it.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::AttractionRepository;
use crate::db::DbError;
use crate::models::{Attraction, AttractionUpdate, NewAttraction, ValidationError};

const RETURNING: &str = " RETURNING idAtracao AS id, nomeAtracao AS name, idHabitat AS habitat_id";

/// PostgreSQL-backed attraction repository
#[derive(Clone)]
pub struct PgAttractionRepo {
    pool: PgPool,
}

impl PgAttractionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttractionRepository for PgAttractionRepo {
    async fn list(&self) -> Result<Vec<Attraction>, DbError> {
        let attractions = sqlx::query_as(
            r#"
            SELECT idAtracao AS id, nomeAtracao AS name, idHabitat AS habitat_id
            FROM atracao
            ORDER BY idAtracao
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(attractions)
    }

    async fn create(&self, attraction: NewAttraction) -> Result<Attraction, DbError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO atracao (nomeAtracao, idHabitat) VALUES (");
        qb.push_bind(attraction.name.into_string())
            .push(", ")
            .push_bind(attraction.habitat_id)
            .push(")")
            .push(RETURNING);

        let created: Attraction = qb.build_query_as().fetch_one(&self.pool).await?;
        tracing::debug!(id = created.id, "created attraction");
        Ok(created)
    }

    async fn update(&self, id: i32, update: AttractionUpdate) -> Result<Attraction, DbError> {
        if update.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE atracao SET ");
        let mut set = qb.separated(", ");
        if let Some(name) = update.name {
            set.push("nomeAtracao = ").push_bind_unseparated(name.into_string());
        }
        if let Some(habitat_id) = update.habitat_id {
            set.push("idHabitat = ").push_bind_unseparated(habitat_id);
        }
        qb.push(" WHERE idAtracao = ").push_bind(id).push(RETURNING);

        qb.build_query_as()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("attraction", id))
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let deleted = sqlx::query("DELETE FROM atracao WHERE idAtracao = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(DbError::not_found("attraction", id));
        }
        tracing::debug!(id, "deleted attraction");
        Ok(())
    }
}
