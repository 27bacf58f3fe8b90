//! Repository seams for the catalog
//!
//! Handlers hold these as `Arc<dyn ...>`; the PostgreSQL implementations
//! live alongside, the in-memory one in `db::memory`.

use async_trait::async_trait;

use super::DbError;
use crate::models::{
    Attraction, AttractionUpdate, Bird, BirdUpdate, Habitat, HabitatAnimalRow, HabitatUpdate,
    NewAttraction, NewBird, NewHabitat,
};

pub mod attractions;
pub mod birds;
pub mod habitats;

pub use attractions::PgAttractionRepo;
pub use birds::PgBirdRepo;
pub use habitats::PgHabitatRepo;

#[async_trait]
pub trait BirdRepository: Send + Sync {
    /// All birds ordered by id, each with its habitat ids.
    async fn list(&self) -> Result<Vec<Bird>, DbError>;

    /// Insert the animal row and, when a habitat is given, its association.
    async fn create(&self, bird: NewBird) -> Result<Bird, DbError>;

    async fn update(&self, id: i32, update: BirdUpdate) -> Result<Bird, DbError>;

    /// Remove the animal and every association row pointing at it.
    async fn delete(&self, id: i32) -> Result<(), DbError>;
}

#[async_trait]
pub trait HabitatRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Habitat>, DbError>;

    async fn create(&self, habitat: NewHabitat) -> Result<Habitat, DbError>;

    async fn update(&self, id: i32, update: HabitatUpdate) -> Result<Habitat, DbError>;

    async fn delete(&self, id: i32) -> Result<(), DbError>;

    /// Record that an animal lives in a habitat.
    async fn add_animal(&self, habitat_id: i32, animal_id: i32) -> Result<(), DbError>;

    /// Animals living in one habitat, ordered by animal id.
    async fn animals(&self, habitat_id: i32) -> Result<Vec<HabitatAnimalRow>, DbError>;
}

#[async_trait]
pub trait AttractionRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Attraction>, DbError>;

    async fn create(&self, attraction: NewAttraction) -> Result<Attraction, DbError>;

    async fn update(&self, id: i32, update: AttractionUpdate) -> Result<Attraction, DbError>;

    async fn delete(&self, id: i32) -> Result<(), DbError>;
}
