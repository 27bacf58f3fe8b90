//! Domain models with normalization at construction
//!
//! Request input is coerced into these types before it reaches a
//! repository. Invalid input returns ValidationError, not panic.

pub mod animal;
pub mod attraction;
pub mod habitat;
pub mod text;
pub mod validation;

pub use animal::{Animal, Bird, BirdUpdate, NewBird};
pub use attraction::{Attraction, AttractionUpdate, NewAttraction};
pub use habitat::{Habitat, HabitatAnimalRow, HabitatUpdate, NewHabitat};
pub use text::UpperText;
pub use validation::ValidationError;
