//! Repository tests against a live PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p zooctl-server -- --ignored
//!
//! Assertions key on the ids each test creates, so tests can share a
//! database with existing rows.

use sqlx::PgPool;
use zooctl_core::DatabaseConfig;
use zooctl_server::db::schema;
use zooctl_server::db::{
    AttractionRepository, BirdRepository, ConnectionProvider, DbError, HabitatRepository,
    PgAttractionRepo, PgBirdRepo, PgHabitatRepo,
};
use zooctl_server::models::{
    AttractionUpdate, BirdUpdate, HabitatUpdate, NewAttraction, NewBird, NewHabitat, UpperText,
};

async fn pool() -> PgPool {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let provider = ConnectionProvider::new(&DatabaseConfig {
        url: Some(url),
        ..DatabaseConfig::default()
    })
    .expect("valid DATABASE_URL");
    provider.check_connection().await.expect("database reachable");
    schema::ensure(provider.pool()).await.expect("schema");
    provider.pool().clone()
}

fn text(raw: &str) -> UpperText {
    UpperText::new("name", raw).unwrap()
}

async fn link_count(pool: &PgPool, animal_id: i32) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM animal_habitat WHERE idAnimal = $1")
        .bind(animal_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn animal_exists(pool: &PgPool, animal_id: i32) -> bool {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM animal WHERE idAnimal = $1)")
        .bind(animal_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn schema_ensure_is_idempotent() {
    let pool = pool().await;
    schema::ensure(&pool).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_bird_with_habitat_writes_one_link() {
    let pool = pool().await;
    let habitats = PgHabitatRepo::new(pool.clone());
    let birds = PgBirdRepo::new(pool.clone());

    let habitat = habitats.create(NewHabitat { name: text("viveiro") }).await.unwrap();
    let bird = birds
        .create(NewBird::new(text("Arara"), 2, text("macho"), 45.5).in_habitat(habitat.id))
        .await
        .unwrap();

    assert_eq!(bird.animal.name, "ARARA");
    assert_eq!(link_count(&pool, bird.animal.id).await, 1);

    let listed = birds.list().await.unwrap();
    let found = listed
        .iter()
        .find(|b| b.animal.id == bird.animal.id)
        .expect("created bird is listed");
    assert_eq!(found.habitat_ids, vec![habitat.id]);
    assert_eq!(found.wingspan, 45.5);
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_bird_without_habitat_writes_no_link() {
    let pool = pool().await;
    let birds = PgBirdRepo::new(pool.clone());

    let bird = birds
        .create(NewBird::new(text("Tucano"), 4, text("femea"), 60.0))
        .await
        .unwrap();
    assert!(bird.habitat_ids.is_empty());
    assert_eq!(link_count(&pool, bird.animal.id).await, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_bird_with_unknown_habitat_rolls_back() {
    let pool = pool().await;
    let birds = PgBirdRepo::new(pool.clone());

    let max_before: Option<i32> = sqlx::query_scalar("SELECT MAX(idAnimal) FROM animal")
        .fetch_one(&pool)
        .await
        .unwrap();

    let err = birds
        .create(NewBird::new(text("Fantasma"), 1, text("macho"), 10.0).in_habitat(i32::MAX))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ConstraintViolation(_)));

    let ghost: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM animal WHERE nomeAnimal = 'FANTASMA' AND idAnimal > $1",
    )
    .bind(max_before.unwrap_or(0))
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(ghost, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_bird_touches_only_supplied_fields() {
    let pool = pool().await;
    let birds = PgBirdRepo::new(pool);

    let bird = birds
        .create(NewBird::new(text("Gaviao"), 3, text("macho"), 90.0))
        .await
        .unwrap();
    let updated = birds
        .update(bird.animal.id, BirdUpdate::new().age(4))
        .await
        .unwrap();

    assert_eq!(updated.animal.age, 4);
    assert_eq!(updated.animal.name, "GAVIAO");
    assert_eq!(updated.animal.gender, "MACHO");
    assert_eq!(updated.wingspan, 90.0);

    let err = birds
        .update(i32::MAX, BirdUpdate::new().age(1))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_bird_removes_links_then_animal() {
    let pool = pool().await;
    let habitats = PgHabitatRepo::new(pool.clone());
    let birds = PgBirdRepo::new(pool.clone());

    let habitat = habitats.create(NewHabitat { name: text("mata") }).await.unwrap();
    let bird = birds
        .create(NewBird::new(text("Sabia"), 1, text("femea"), 20.0).in_habitat(habitat.id))
        .await
        .unwrap();

    birds.delete(bird.animal.id).await.unwrap();
    assert!(!animal_exists(&pool, bird.animal.id).await);
    assert_eq!(link_count(&pool, bird.animal.id).await, 0);

    let err = birds.delete(bird.animal.id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires database"]
async fn habitat_animals_returns_one_row_per_animal() {
    let pool = pool().await;
    let habitats = PgHabitatRepo::new(pool.clone());
    let birds = PgBirdRepo::new(pool);

    let habitat = habitats.create(NewHabitat { name: text("pantanal") }).await.unwrap();
    let mut ids = Vec::new();
    for name in ["Garca", "Tuiuiu", "Colhereiro"] {
        let bird = birds
            .create(NewBird::new(text(name), 2, text("macho"), 100.0))
            .await
            .unwrap();
        habitats.add_animal(habitat.id, bird.animal.id).await.unwrap();
        ids.push(bird.animal.id);
    }

    let rows = habitats.animals(habitat.id).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.habitat_id == habitat.id && r.habitat_name == "PANTANAL"));
    assert_eq!(rows.iter().map(|r| r.animal_id).collect::<Vec<_>>(), ids);

    let err = habitats.delete(habitat.id).await.unwrap_err();
    assert!(matches!(err, DbError::ConstraintViolation(_)));
}

#[tokio::test]
#[ignore = "requires database"]
async fn habitat_update_and_delete() {
    let pool = pool().await;
    let habitats = PgHabitatRepo::new(pool);

    let habitat = habitats.create(NewHabitat { name: text("deserto") }).await.unwrap();
    let renamed = habitats
        .update(habitat.id, HabitatUpdate { name: text("caatinga") })
        .await
        .unwrap();
    assert_eq!(renamed.name, "CAATINGA");

    habitats.delete(habitat.id).await.unwrap();
    let err = habitats.delete(habitat.id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires database"]
async fn attraction_lifecycle() {
    let pool = pool().await;
    let habitats = PgHabitatRepo::new(pool.clone());
    let attractions = PgAttractionRepo::new(pool);

    let habitat = habitats.create(NewHabitat { name: text("lago") }).await.unwrap();
    let created = attractions
        .create(NewAttraction {
            name: text("passeio de barco"),
            habitat_id: None,
        })
        .await
        .unwrap();
    assert_eq!(created.habitat_id, None);

    let moved = attractions
        .update(
            created.id,
            AttractionUpdate {
                name: None,
                habitat_id: Some(habitat.id),
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.name, "PASSEIO DE BARCO");
    assert_eq!(moved.habitat_id, Some(habitat.id));

    let listed = attractions.list().await.unwrap();
    assert!(listed.contains(&moved));

    attractions.delete(created.id).await.unwrap();
    let err = attractions.delete(created.id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));

    let err = attractions
        .create(NewAttraction {
            name: text("orfa"),
            habitat_id: Some(i32::MAX),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ConstraintViolation(_)));
}
