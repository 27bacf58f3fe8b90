//! Idempotent table bootstrap
//!
//! Identifiers are unquoted, so PostgreSQL folds them to lower case
//! (`idAnimal` is stored as `idanimal`).

use sqlx::PgPool;

use super::DbError;

const STATEMENTS: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS animal (
        idAnimal     SERIAL PRIMARY KEY,
        nomeAnimal   VARCHAR(255) NOT NULL,
        idadeAnimal  INTEGER NOT NULL,
        generoAnimal VARCHAR(50) NOT NULL,
        envergadura  DOUBLE PRECISION NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS habitat (
        idHabitat   SERIAL PRIMARY KEY,
        nomeHabitat VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS atracao (
        idAtracao   SERIAL PRIMARY KEY,
        nomeAtracao VARCHAR(255) NOT NULL,
        idHabitat   INTEGER NULL REFERENCES habitat (idHabitat)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS animal_habitat (
        idAnimal  INTEGER NOT NULL REFERENCES animal (idAnimal),
        idHabitat INTEGER NOT NULL REFERENCES habitat (idHabitat)
    )
    "#,
];

/// Create the four catalog tables if they are missing.
///
/// Runs in one transaction so a partial schema is never left behind.
pub async fn ensure(pool: &PgPool) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;
    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(tables = STATEMENTS.len(), "schema ensured");
    Ok(())
}
