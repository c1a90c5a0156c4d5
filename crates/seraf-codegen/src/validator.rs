//! Entity validator: the common presence checks plus one per required field.

use serde::Serialize;

use seraf_core::SerafResult;

use crate::templates::Renderer;
use crate::view::{EntityView, FieldView};

#[derive(Serialize)]
struct ValidatorView<'a> {
    #[serde(flatten)]
    entity: &'a EntityView,
    required: Vec<&'a FieldView>,
}

/// Presence is `!== undefined && !== null`; the declared type is not consulted.
pub fn render_validator(renderer: &Renderer, entity: &EntityView) -> SerafResult<String> {
    let view = ValidatorView {
        entity,
        required: entity.fields.iter().filter(|f| !f.optional).collect(),
    };
    renderer.render("validator.ts", &view)
}
