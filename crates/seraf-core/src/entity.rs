//! Entity naming.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{SerafError, SerafResult};

/// The name of an entity a module is generated for.
///
/// Stored exactly as given (conventionally a lowercase singular noun such as
/// `user`). Type-level names are derived by upper-casing the first character
/// only, so `orderItem` becomes `OrderItem`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityName(String);

impl EntityName {
    /// Validate and wrap an entity name.
    ///
    /// The name must be an identifier: an ASCII letter followed by ASCII
    /// letters, digits or underscores.
    pub fn new(raw: impl Into<String>) -> SerafResult<Self> {
        let raw = raw.into();
        let mut chars = raw.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if valid {
            Ok(Self(raw))
        } else {
            Err(SerafError::InvalidEntityName(raw))
        }
    }

    /// Variable / collection form (`user`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type form (`User`).
    pub fn type_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Model interface name (`IUser`).
    pub fn model_name(&self) -> String {
        format!("I{}", self.type_name())
    }

    /// Directory slug (`orderItem` -> `order-item`).
    pub fn kebab(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 4);
        for (i, c) in self.0.chars().enumerate() {
            if c.is_ascii_uppercase() {
                if i > 0 {
                    out.push('-');
                }
                out.push(c.to_ascii_lowercase());
            } else if c == '_' {
                out.push('-');
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for EntityName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl std::str::FromStr for EntityName {
    type Err = SerafError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_forms() {
        let name = EntityName::new("user").unwrap();
        assert_eq!(name.as_str(), "user");
        assert_eq!(name.type_name(), "User");
        assert_eq!(name.model_name(), "IUser");
        assert_eq!(name.kebab(), "user");
    }

    #[test]
    fn test_only_first_character_is_capitalized() {
        let name = EntityName::new("orderItem").unwrap();
        assert_eq!(name.type_name(), "OrderItem");
        assert_eq!(name.model_name(), "IOrderItem");
        assert_eq!(name.kebab(), "order-item");
    }

    #[test]
    fn test_rejects_non_identifiers() {
        assert!(EntityName::new("").is_err());
        assert!(EntityName::new("1user").is_err());
        assert!(EntityName::new("user-profile").is_err());
        assert!(EntityName::new("user profile").is_err());
    }

    #[test]
    fn test_parse_via_from_str() {
        let name: EntityName = "product".parse().unwrap();
        assert_eq!(name.type_name(), "Product");
    }
}
