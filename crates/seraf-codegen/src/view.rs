//! Template views shared by the render functions.

use serde::Serialize;

use seraf_core::{EntityName, FieldDescriptor};

/// Entity naming plus its fields, as seen by every template.
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    /// Variable form (`user`).
    pub name: String,
    /// Type form (`User`).
    pub type_name: String,
    /// Model interface (`IUser`).
    pub model: String,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: String,
    pub ty: String,
    pub optional: bool,
}

impl EntityView {
    pub fn new(entity: &EntityName, fields: &[FieldDescriptor]) -> Self {
        Self {
            name: entity.as_str().to_string(),
            type_name: entity.type_name(),
            model: entity.model_name(),
            fields: fields.iter().map(FieldView::from).collect(),
        }
    }
}

impl From<&FieldDescriptor> for FieldView {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            ty: field.declared_type.clone(),
            optional: field.is_optional,
        }
    }
}
