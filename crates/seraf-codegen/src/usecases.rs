//! Per-operation request/response types and use-case classes.

use serde::Serialize;

use seraf_core::{EntityName, SerafResult};

use crate::artifact::Operation;
use crate::synthesizer::ListDefaults;
use crate::templates::Renderer;
use crate::view::EntityView;

#[derive(Serialize)]
struct UseCaseView<'a> {
    #[serde(flatten)]
    entity: &'a EntityView,
    class_prefix: String,
    default_limit: u32,
    default_offset: u32,
}

pub fn render_request(renderer: &Renderer, entity: &EntityView, op: Operation) -> SerafResult<String> {
    let template = match op {
        Operation::Create => "request_create.ts",
        Operation::Update => "request_update.ts",
        Operation::List => "request_list.ts",
        Operation::FindById | Operation::Delete => "request_id.ts",
    };
    renderer.render(template, entity)
}

pub fn render_response(renderer: &Renderer, entity: &EntityView, op: Operation) -> SerafResult<String> {
    let template = match op {
        Operation::Create | Operation::FindById | Operation::Update => "response_entity.ts",
        Operation::List => "response_list.ts",
        Operation::Delete => "response_empty.ts",
    };
    renderer.render(template, entity)
}

pub fn render_use_case(
    renderer: &Renderer,
    name: &EntityName,
    entity: &EntityView,
    op: Operation,
    defaults: &ListDefaults,
) -> SerafResult<String> {
    let template = match op {
        Operation::Create => "usecase_create.ts",
        Operation::List => "usecase_list.ts",
        Operation::FindById => "usecase_find_by_id.ts",
        Operation::Update => "usecase_update.ts",
        Operation::Delete => "usecase_delete.ts",
    };
    let view = UseCaseView {
        entity,
        class_prefix: op.class_prefix(name),
        default_limit: defaults.limit,
        default_offset: defaults.offset,
    };
    renderer.render(template, &view)
}
