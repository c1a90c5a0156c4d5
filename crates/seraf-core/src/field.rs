//! Field descriptors extracted from model interfaces.

use serde::{Deserialize, Serialize};

/// Fields every model carries through its common base shape.
///
/// They are never part of a descriptor list.
pub const IMPLICIT_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// One declared property of a model interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub declared_type: String,
    pub is_optional: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, is_optional: bool) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            is_optional,
        }
    }

    /// A field that must be present on every record.
    pub fn required(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self::new(name, declared_type, false)
    }

    /// A field marked with `?`.
    pub fn optional(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self::new(name, declared_type, true)
    }

    /// Classify the declared type.
    pub fn shape(&self) -> TypeShape {
        TypeShape::classify(&self.declared_type)
    }
}

/// The closed type grammar recognised in model declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "members", rename_all = "snake_case")]
pub enum TypeShape {
    String,
    Number,
    Boolean,
    Date,
    /// Any type expression containing `|`, e.g. `'active' | 'inactive'` or
    /// `string | null`. Members are kept as written.
    Union(Vec<String>),
    StringArray,
    /// Nested objects, generics, non-string arrays and everything else.
    Unsupported,
}

impl TypeShape {
    /// Classify a type annotation's source text.
    pub fn classify(declared_type: &str) -> Self {
        let ty = declared_type.trim();
        match ty {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "Date" => Self::Date,
            _ if ty.contains('|') => Self::Union(union_members(ty)),
            "string[]" => Self::StringArray,
            _ => Self::Unsupported,
        }
    }

    /// Unquoted values of a union made only of string literals.
    ///
    /// `None` for every other shape, including unions with a non-literal
    /// member such as `string | null` or `1 | 2`.
    pub fn string_literals(&self) -> Option<Vec<String>> {
        match self {
            Self::Union(members) => members
                .iter()
                .map(|m| string_literal(m).map(str::to_string))
                .collect(),
            _ => None,
        }
    }
}

/// Split a union into its trimmed members.
fn union_members(ty: &str) -> Vec<String> {
    ty.split('|')
        .map(str::trim)
        .filter(|member| !member.is_empty())
        .map(str::to_string)
        .collect()
}

/// Content of a quoted string literal member (`'a'` or `"a"`).
fn string_literal(member: &str) -> Option<&str> {
    let quoted = member.len() >= 2
        && ((member.starts_with('\'') && member.ends_with('\''))
            || (member.starts_with('"') && member.ends_with('"')));
    quoted.then(|| &member[1..member.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        assert_eq!(TypeShape::classify("string"), TypeShape::String);
        assert_eq!(TypeShape::classify("number"), TypeShape::Number);
        assert_eq!(TypeShape::classify("boolean"), TypeShape::Boolean);
        assert_eq!(TypeShape::classify("Date"), TypeShape::Date);
        assert_eq!(TypeShape::classify(" string[] "), TypeShape::StringArray);
    }

    #[test]
    fn test_string_literal_union() {
        let shape = TypeShape::classify("'active' | \"inactive\" | 'banned'");
        assert_eq!(
            shape,
            TypeShape::Union(vec![
                "'active'".to_string(),
                "\"inactive\"".to_string(),
                "'banned'".to_string(),
            ])
        );
        assert_eq!(
            shape.string_literals(),
            Some(vec!["active".to_string(), "inactive".to_string(), "banned".to_string()])
        );
    }

    #[test]
    fn test_leading_pipe_union() {
        assert_eq!(
            TypeShape::classify("| 'a' | 'b'").string_literals(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_non_literal_unions_have_no_literals() {
        for ty in ["string | null", "1 | 2", "'a' | number"] {
            let shape = TypeShape::classify(ty);
            assert!(matches!(shape, TypeShape::Union(_)), "{ty}");
            assert_eq!(shape.string_literals(), None, "{ty}");
        }
        assert_eq!(TypeShape::String.string_literals(), None);
    }

    #[test]
    fn test_unsupported_shapes() {
        for ty in ["number[]", "Array<string>", "{ street: string }", "IAddress", "date", "Map<string, number>"] {
            assert_eq!(TypeShape::classify(ty), TypeShape::Unsupported, "{ty}");
        }
    }

    #[test]
    fn test_descriptor_shape() {
        let field = FieldDescriptor::optional("roles", "string[]");
        assert!(field.is_optional);
        assert_eq!(field.shape(), TypeShape::StringArray);
    }
}
