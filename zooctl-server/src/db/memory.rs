//! In-memory catalog store
//!
//! Implements every repository trait over one `Mutex`-guarded set of
//! tables, enforcing the same foreign keys as the PostgreSQL schema.
//! Backs the handler tests and `zooctl serve --in-memory`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::repos::{AttractionRepository, BirdRepository, HabitatRepository};
use super::DbError;
use crate::models::{
    Animal, Attraction, AttractionUpdate, Bird, BirdUpdate, Habitat, HabitatAnimalRow,
    HabitatUpdate, NewAttraction, NewBird, NewHabitat, ValidationError,
};

#[derive(Debug, Default)]
struct Tables {
    birds: Vec<Bird>,
    habitats: Vec<Habitat>,
    attractions: Vec<Attraction>,
    /// (animal id, habitat id)
    links: Vec<(i32, i32)>,
    next_animal_id: i32,
    next_habitat_id: i32,
    next_attraction_id: i32,
}

impl Tables {
    fn habitat_exists(&self, id: i32) -> bool {
        self.habitats.iter().any(|h| h.id == id)
    }

    fn habitat_ids_of(&self, animal_id: i32) -> Vec<i32> {
        let mut ids: Vec<i32> = self
            .links
            .iter()
            .filter(|(animal, _)| *animal == animal_id)
            .map(|(_, habitat)| *habitat)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn require_habitat(&self, id: i32) -> Result<(), DbError> {
        if self.habitat_exists(id) {
            Ok(())
        } else {
            Err(DbError::ConstraintViolation(format!(
                "habitat {} does not exist",
                id
            )))
        }
    }
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Catalog store held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BirdRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Bird>, DbError> {
        let tables = self.tables();
        Ok(tables
            .birds
            .iter()
            .map(|bird| Bird {
                habitat_ids: tables.habitat_ids_of(bird.animal.id),
                ..bird.clone()
            })
            .collect())
    }

    async fn create(&self, bird: NewBird) -> Result<Bird, DbError> {
        let mut tables = self.tables();
        if let Some(habitat_id) = bird.habitat_id {
            tables.require_habitat(habitat_id)?;
        }

        let id = next_id(&mut tables.next_animal_id);
        let created = Bird {
            animal: Animal {
                id,
                name: bird.name.into_string(),
                age: bird.age,
                gender: bird.gender.into_string(),
            },
            wingspan: bird.wingspan,
            habitat_ids: bird.habitat_id.into_iter().collect(),
        };
        if let Some(habitat_id) = bird.habitat_id {
            tables.links.push((id, habitat_id));
        }
        tables.birds.push(Bird {
            habitat_ids: Vec::new(),
            ..created.clone()
        });
        Ok(created)
    }

    async fn update(&self, id: i32, update: BirdUpdate) -> Result<Bird, DbError> {
        if update.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }

        let mut tables = self.tables();
        let bird = tables
            .birds
            .iter_mut()
            .find(|b| b.animal.id == id)
            .ok_or_else(|| DbError::not_found("animal", id))?;
        update.apply_to(bird);
        let mut updated = bird.clone();
        updated.habitat_ids = tables.habitat_ids_of(id);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut tables = self.tables();
        let before = tables.birds.len();
        tables.birds.retain(|b| b.animal.id != id);
        if tables.birds.len() == before {
            return Err(DbError::not_found("animal", id));
        }
        tables.links.retain(|(animal, _)| *animal != id);
        Ok(())
    }
}

#[async_trait]
impl HabitatRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Habitat>, DbError> {
        Ok(self.tables().habitats.clone())
    }

    async fn create(&self, habitat: NewHabitat) -> Result<Habitat, DbError> {
        let mut tables = self.tables();
        let created = Habitat {
            id: next_id(&mut tables.next_habitat_id),
            name: habitat.name.into_string(),
        };
        tables.habitats.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, update: HabitatUpdate) -> Result<Habitat, DbError> {
        let mut tables = self.tables();
        let habitat = tables
            .habitats
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| DbError::not_found("habitat", id))?;
        habitat.name = update.name.into_string();
        Ok(habitat.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut tables = self.tables();
        if !tables.habitat_exists(id) {
            return Err(DbError::not_found("habitat", id));
        }
        let referenced = tables.links.iter().any(|(_, habitat)| *habitat == id)
            || tables.attractions.iter().any(|a| a.habitat_id == Some(id));
        if referenced {
            return Err(DbError::ConstraintViolation(format!(
                "habitat {} is still referenced",
                id
            )));
        }
        tables.habitats.retain(|h| h.id != id);
        Ok(())
    }

    async fn add_animal(&self, habitat_id: i32, animal_id: i32) -> Result<(), DbError> {
        let mut tables = self.tables();
        tables.require_habitat(habitat_id)?;
        if !tables.birds.iter().any(|b| b.animal.id == animal_id) {
            return Err(DbError::ConstraintViolation(format!(
                "animal {} does not exist",
                animal_id
            )));
        }
        tables.links.push((animal_id, habitat_id));
        Ok(())
    }

    async fn animals(&self, habitat_id: i32) -> Result<Vec<HabitatAnimalRow>, DbError> {
        let tables = self.tables();
        let Some(habitat) = tables.habitats.iter().find(|h| h.id == habitat_id) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<HabitatAnimalRow> = tables
            .links
            .iter()
            .filter(|(_, habitat)| *habitat == habitat_id)
            .filter_map(|(animal_id, _)| tables.birds.iter().find(|b| b.animal.id == *animal_id))
            .map(|bird| HabitatAnimalRow {
                habitat_id: habitat.id,
                habitat_name: habitat.name.clone(),
                animal_id: bird.animal.id,
                animal_name: bird.animal.name.clone(),
                animal_age: bird.animal.age,
                animal_gender: bird.animal.gender.clone(),
            })
            .collect();
        rows.sort_by_key(|row| row.animal_id);
        Ok(rows)
    }
}

#[async_trait]
impl AttractionRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Attraction>, DbError> {
        Ok(self.tables().attractions.clone())
    }

    async fn create(&self, attraction: NewAttraction) -> Result<Attraction, DbError> {
        let mut tables = self.tables();
        if let Some(habitat_id) = attraction.habitat_id {
            tables.require_habitat(habitat_id)?;
        }
        let created = Attraction {
            id: next_id(&mut tables.next_attraction_id),
            name: attraction.name.into_string(),
            habitat_id: attraction.habitat_id,
        };
        tables.attractions.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, update: AttractionUpdate) -> Result<Attraction, DbError> {
        if update.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }

        let mut tables = self.tables();
        let index = tables
            .attractions
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| DbError::not_found("attraction", id))?;
        if let Some(habitat_id) = update.habitat_id {
            tables.require_habitat(habitat_id)?;
        }
        let attraction = &mut tables.attractions[index];
        update.apply_to(attraction);
        Ok(attraction.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut tables = self.tables();
        let before = tables.attractions.len();
        tables.attractions.retain(|a| a.id != id);
        if tables.attractions.len() == before {
            return Err(DbError::not_found("attraction", id));
        }
        Ok(())
    }
}
