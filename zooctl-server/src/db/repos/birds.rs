//! Bird repository
//!
//! Birds live in the `animal` table; habitat links in `animal_habitat`.
//! - list: LEFT JOIN + array_agg (no N+1)
//! - create/delete: transaction spanning both tables

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::BirdRepository;
use crate::db::DbError;
use crate::models::{Animal, Bird, BirdUpdate, NewBird, ValidationError};

/// Flat row shape shared by list and update
#[derive(Debug, FromRow)]
struct BirdRow {
    id: i32,
    name: String,
    age: i32,
    gender: String,
    wingspan: f64,
    habitat_ids: Vec<i32>,
}

impl From<BirdRow> for Bird {
    fn from(row: BirdRow) -> Self {
        Bird {
            animal: Animal {
                id: row.id,
                name: row.name,
                age: row.age,
                gender: row.gender,
            },
            wingspan: row.wingspan,
            habitat_ids: row.habitat_ids,
        }
    }
}

/// PostgreSQL-backed bird repository
#[derive(Clone)]
pub struct PgBirdRepo {
    pool: PgPool,
}

impl PgBirdRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BirdRepository for PgBirdRepo {
    async fn list(&self) -> Result<Vec<Bird>, DbError> {
        let rows: Vec<BirdRow> = sqlx::query_as(
            r#"
            SELECT
                a.idAnimal     AS id,
                a.nomeAnimal   AS name,
                a.idadeAnimal  AS age,
                a.generoAnimal AS gender,
                a.envergadura  AS wingspan,
                COALESCE(
                    array_agg(ah.idHabitat ORDER BY ah.idHabitat)
                        FILTER (WHERE ah.idHabitat IS NOT NULL),
                    '{}'
                ) AS habitat_ids
            FROM animal a
            LEFT JOIN animal_habitat ah ON ah.idAnimal = a.idAnimal
            GROUP BY a.idAnimal
            ORDER BY a.idAnimal
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "listed birds");
        Ok(rows.into_iter().map(Bird::from).collect())
    }

    /// Insert animal then association (atomic).
    ///
    /// An unknown habitat id fails the second insert; the transaction is
    /// dropped uncommitted and the animal row goes with it.
    async fn create(&self, bird: NewBird) -> Result<Bird, DbError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO animal (nomeAnimal, idadeAnimal, generoAnimal, envergadura)
            VALUES ($1, $2, $3, $4)
            RETURNING idAnimal
            "#,
        )
        .bind(bird.name.as_str())
        .bind(bird.age)
        .bind(bird.gender.as_str())
        .bind(bird.wingspan)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(habitat_id) = bird.habitat_id {
            sqlx::query("INSERT INTO animal_habitat (idAnimal, idHabitat) VALUES ($1, $2)")
                .bind(id)
                .bind(habitat_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::warn!(animal_id = id, habitat_id, "habitat link failed, rolling back");
                    DbError::from(e)
                })?;
        }

        tx.commit().await?;
        tracing::debug!(id, "created bird");

        Ok(Bird {
            animal: Animal {
                id,
                name: bird.name.into_string(),
                age: bird.age,
                gender: bird.gender.into_string(),
            },
            wingspan: bird.wingspan,
            habitat_ids: bird.habitat_id.into_iter().collect(),
        })
    }

    /// Write only the supplied columns.
    ///
    /// The data-modifying CTE returns the updated row joined with its
    /// habitat ids in a single round trip.
    async fn update(&self, id: i32, update: BirdUpdate) -> Result<Bird, DbError> {
        if update.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("WITH updated AS (UPDATE animal SET ");
        let mut set = qb.separated(", ");
        if let Some(name) = update.name {
            set.push("nomeAnimal = ").push_bind_unseparated(name.into_string());
        }
        if let Some(age) = update.age {
            set.push("idadeAnimal = ").push_bind_unseparated(age);
        }
        if let Some(gender) = update.gender {
            set.push("generoAnimal = ").push_bind_unseparated(gender.into_string());
        }
        if let Some(wingspan) = update.wingspan {
            set.push("envergadura = ").push_bind_unseparated(wingspan);
        }
        qb.push(" WHERE idAnimal = ").push_bind(id);
        qb.push(
            r#"
            RETURNING idAnimal, nomeAnimal, idadeAnimal, generoAnimal, envergadura
            )
            SELECT
                u.idAnimal     AS id,
                u.nomeAnimal   AS name,
                u.idadeAnimal  AS age,
                u.generoAnimal AS gender,
                u.envergadura  AS wingspan,
                COALESCE(
                    array_agg(ah.idHabitat ORDER BY ah.idHabitat)
                        FILTER (WHERE ah.idHabitat IS NOT NULL),
                    '{}'
                ) AS habitat_ids
            FROM updated u
            LEFT JOIN animal_habitat ah ON ah.idAnimal = u.idAnimal
            GROUP BY u.idAnimal, u.nomeAnimal, u.idadeAnimal, u.generoAnimal, u.envergadura
            "#,
        );

        let row: BirdRow = qb
            .build_query_as()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("animal", id))?;

        tracing::debug!(id, "updated bird");
        Ok(row.into())
    }

    /// Delete associations then the animal (atomic).
    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM animal_habitat WHERE idAnimal = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM animal WHERE idAnimal = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            tracing::warn!(id, "animal not found, delete rolled back");
            return Err(DbError::not_found("animal", id));
        }

        tx.commit().await?;
        tracing::debug!(id, "deleted bird");
        Ok(())
    }
}
