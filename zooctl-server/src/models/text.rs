//! Upper-cased catalog text
//!
//! Names and genders are stored upper-cased. Normalizing at construction
//! keeps every repository implementation consistent.

use super::ValidationError;

/// Non-blank text, trimmed and upper-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpperText(String);

impl UpperText {
    /// Normalize `raw` for storage.
    ///
    /// # Example
    /// ```
    /// use zooctl_server::models::UpperText;
    ///
    /// assert_eq!(UpperText::new("name", " arara ").unwrap().as_str(), "ARARA");
    /// assert!(UpperText::new("name", "   ").is_err());
    /// ```
    pub fn new(field: &'static str, raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Normalize an optional field, passing `None` through.
    pub fn optional(field: &'static str, raw: Option<&str>) -> Result<Option<Self>, ValidationError> {
        raw.map(|value| Self::new(field, value)).transpose()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for UpperText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
