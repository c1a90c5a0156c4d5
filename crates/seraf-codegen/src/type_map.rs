//! Declared-type lookup table.
//!
//! | shape              | persistence    |
//! |--------------------|----------------|
//! | `string`           | `String`       |
//! | `number`           | `Number`       |
//! | `boolean`          | `Boolean`      |
//! | `Date`             | `Date`         |
//! | union (`a \| b`)   | `String`       |
//! | `string[]`         | `[String]`     |
//! | anything else      | omitted        |
//!
//! Validation does not consult this table: required fields are
//! presence-checked whatever their type.

use serde::Serialize;
use serde_json::{json, Value};

use seraf_core::TypeShape;

/// Storage representation of a supported field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PersistenceType {
    String,
    Number,
    Boolean,
    Date,
    StringArray,
}

impl PersistenceType {
    /// Mongoose `type:` expression.
    pub fn mongoose(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::StringArray => "[String]",
        }
    }
}

/// Outcome of looking a shape up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    Supported(PersistenceType),
    /// No storage representation; the field is left out of the schema.
    Omitted,
}

pub fn persistence_for(shape: &TypeShape) -> Mapping {
    match shape {
        TypeShape::String => Mapping::Supported(PersistenceType::String),
        TypeShape::Number => Mapping::Supported(PersistenceType::Number),
        TypeShape::Boolean => Mapping::Supported(PersistenceType::Boolean),
        TypeShape::Date => Mapping::Supported(PersistenceType::Date),
        TypeShape::Union(_) => Mapping::Supported(PersistenceType::String),
        TypeShape::StringArray => Mapping::Supported(PersistenceType::StringArray),
        TypeShape::Unsupported => Mapping::Omitted,
    }
}

/// OpenAPI schema object for a shape. Unsupported shapes accept any value.
pub fn openapi_schema(shape: &TypeShape) -> Value {
    match shape {
        TypeShape::String => json!({ "type": "string" }),
        TypeShape::Number => json!({ "type": "number" }),
        TypeShape::Boolean => json!({ "type": "boolean" }),
        TypeShape::Date => json!({ "type": "string", "format": "date-time" }),
        TypeShape::Union(members) => union_schema(members),
        TypeShape::StringArray => json!({ "type": "array", "items": { "type": "string" } }),
        TypeShape::Unsupported => json!({}),
    }
}

/// Unions of string literals become a string `enum` and unions of numeric
/// literals a number `enum`. `null` / `undefined` members only make the
/// schema nullable. A single remaining member maps as itself; any other
/// mix accepts any value.
fn union_schema(members: &[String]) -> Value {
    let present: Vec<String> = members
        .iter()
        .filter(|m| *m != "null" && *m != "undefined")
        .cloned()
        .collect();
    let nullable = present.len() < members.len();

    let mut schema = if present.is_empty() {
        json!({})
    } else if let Some(literals) = TypeShape::Union(present.clone()).string_literals() {
        json!({ "type": "string", "enum": literals })
    } else if let Some(literals) = number_literals(&present) {
        json!({ "type": "number", "enum": literals })
    } else if let [single] = present.as_slice() {
        openapi_schema(&TypeShape::classify(single))
    } else {
        json!({})
    };

    if nullable {
        if let Some(object) = schema.as_object_mut() {
            object.insert("nullable".into(), json!(true));
        }
    }
    schema
}

fn number_literals(members: &[String]) -> Option<Vec<Value>> {
    members
        .iter()
        .map(|m| match m.parse::<i64>() {
            Ok(n) => Some(json!(n)),
            Err(_) => m.parse::<f64>().ok().filter(|n| n.is_finite()).map(|n| json!(n)),
        })
        .collect()
}
