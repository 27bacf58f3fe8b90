use serde::Serialize;
use sqlx::FromRow;

use super::UpperText;

/// Named exhibit, optionally tied to one habitat
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub id: i32,
    pub name: String,
    pub habitat_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewAttraction {
    pub name: UpperText,
    pub habitat_id: Option<i32>,
}

/// Partial update of an attraction; only `Some` fields are written
#[derive(Debug, Clone, Default)]
pub struct AttractionUpdate {
    pub name: Option<UpperText>,
    pub habitat_id: Option<i32>,
}

impl AttractionUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.habitat_id.is_none()
    }

    pub fn apply_to(&self, attraction: &mut Attraction) {
        if let Some(ref name) = self.name {
            attraction.name = name.as_str().to_owned();
        }
        if let Some(habitat_id) = self.habitat_id {
            attraction.habitat_id = Some(habitat_id);
        }
    }
}
