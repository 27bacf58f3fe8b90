//! Route handlers organized by resource

use serde::Serialize;

pub mod attractions;
pub mod birds;
pub mod habitats;
pub mod health;

/// Body returned by write endpoints
#[derive(Debug, Serialize)]
pub struct Saved<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Saved<T> {
    pub fn with(message: &'static str, data: T) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

impl Saved<()> {
    pub fn message(message: &'static str) -> Self {
        Self {
            message,
            data: None,
        }
    }
}
