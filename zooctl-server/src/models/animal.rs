//! Animal and bird records
//!
//! A bird embeds its base animal record instead of extending it; further
//! animal kinds would embed `Animal` the same way.

use serde::Serialize;

use super::UpperText;

/// Base animal record as stored in the `animal` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animal {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

/// Bird: an animal with a wingspan, linked to zero or more habitats
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bird {
    #[serde(flatten)]
    pub animal: Animal,
    pub wingspan: f64,
    pub habitat_ids: Vec<i32>,
}

/// Input for creating a bird
#[derive(Debug, Clone)]
pub struct NewBird {
    pub name: UpperText,
    pub age: i32,
    pub gender: UpperText,
    pub wingspan: f64,
    /// Habitat to associate the new bird with, if any
    pub habitat_id: Option<i32>,
}

impl NewBird {
    pub fn new(name: UpperText, age: i32, gender: UpperText, wingspan: f64) -> Self {
        Self {
            name,
            age,
            gender,
            wingspan,
            habitat_id: None,
        }
    }

    pub fn in_habitat(mut self, habitat_id: i32) -> Self {
        self.habitat_id = Some(habitat_id);
        self
    }
}

/// Partial update of a bird; only `Some` fields are written
#[derive(Debug, Clone, Default)]
pub struct BirdUpdate {
    pub name: Option<UpperText>,
    pub age: Option<i32>,
    pub gender: Option<UpperText>,
    pub wingspan: Option<f64>,
}

impl BirdUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: UpperText) -> Self {
        self.name = Some(name);
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn gender(mut self, gender: UpperText) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn wingspan(mut self, wingspan: f64) -> Self {
        self.wingspan = Some(wingspan);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none() && self.wingspan.is_none()
    }

    /// Apply the supplied fields to an in-memory record.
    pub fn apply_to(&self, bird: &mut Bird) {
        if let Some(ref name) = self.name {
            bird.animal.name = name.as_str().to_owned();
        }
        if let Some(age) = self.age {
            bird.animal.age = age;
        }
        if let Some(ref gender) = self.gender {
            bird.animal.gender = gender.as_str().to_owned();
        }
        if let Some(wingspan) = self.wingspan {
            bird.wingspan = wingspan;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arara() -> Bird {
        Bird {
            animal: Animal {
                id: 7,
                name: "ARARA".into(),
                age: 2,
                gender: "MACHO".into(),
            },
            wingspan: 45.5,
            habitat_ids: vec![1],
        }
    }

    #[test]
    fn bird_serializes_flat() {
        let value = serde_json::to_value(arara()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "ARARA",
                "age": 2,
                "gender": "MACHO",
                "wingspan": 45.5,
                "habitatIds": [1]
            })
        );
    }

    #[test]
    fn update_touches_only_supplied_fields() {
        let mut bird = arara();
        let update = BirdUpdate::new().age(3).wingspan(50.0);
        update.apply_to(&mut bird);

        assert_eq!(bird.animal.age, 3);
        assert_eq!(bird.wingspan, 50.0);
        assert_eq!(bird.animal.name, "ARARA");
        assert_eq!(bird.animal.gender, "MACHO");
    }

    #[test]
    fn empty_update() {
        assert!(BirdUpdate::new().is_empty());
        assert!(!BirdUpdate::new().age(1).is_empty());
    }
}
