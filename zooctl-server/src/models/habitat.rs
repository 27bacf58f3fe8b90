//! Habitat records and the flat habitat/animal join row

use serde::Serialize;
use sqlx::FromRow;

use super::UpperText;

/// Named enclosure hosting zero or more animals
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Habitat {
    pub id: i32,
    pub name: String,
}

/// Input for creating a habitat
#[derive(Debug, Clone)]
pub struct NewHabitat {
    pub name: UpperText,
}

/// Replacement values for a habitat
#[derive(Debug, Clone)]
pub struct HabitatUpdate {
    pub name: UpperText,
}

/// One animal living in a habitat.
///
/// Habitat columns repeat on every row for the same habitat.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HabitatAnimalRow {
    pub habitat_id: i32,
    pub habitat_name: String,
    pub animal_id: i32,
    pub animal_name: String,
    pub animal_age: i32,
    pub animal_gender: String,
}
