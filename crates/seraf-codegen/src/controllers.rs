//! HTTP layer: Express controllers, setup factories and the module router.

use serde::Serialize;

use seraf_core::{EntityName, SerafResult};

use crate::artifact::Operation;
use crate::templates::Renderer;
use crate::view::EntityView;

/// One `key: source` pair of the object passed to `execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub key: String,
    pub source: String,
}

impl Binding {
    fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
        }
    }
}

#[derive(Serialize)]
struct ControllerView<'a> {
    #[serde(flatten)]
    entity: &'a EntityView,
    class_prefix: String,
    member: String,
    request_parts: &'static str,
    bindings: Vec<Binding>,
    status: u16,
}

#[derive(Serialize)]
struct RouteView {
    method: &'static str,
    path: &'static str,
    class_prefix: String,
    member: String,
}

#[derive(Serialize)]
struct RoutesView<'a> {
    #[serde(flatten)]
    entity: &'a EntityView,
    routes: Vec<RouteView>,
}

/// Request parts destructured by the controller of `op`.
fn request_parts(op: Operation) -> &'static str {
    match op {
        Operation::Create => "body",
        Operation::Update => "body, params",
        Operation::List => "query",
        Operation::FindById | Operation::Delete => "params",
    }
}

/// How the controller of `op` maps the request onto the use-case input.
pub fn bindings(entity: &EntityView, op: Operation) -> Vec<Binding> {
    let body_fields = || {
        entity
            .fields
            .iter()
            .map(|f| Binding::new(f.name.clone(), format!("body.{}", f.name)))
    };

    match op {
        Operation::Create => body_fields().collect(),
        Operation::Update => std::iter::once(Binding::new("id", "params.id"))
            .chain(body_fields())
            .collect(),
        Operation::List => vec![Binding::new(
            "data",
            "{ limit: Number.isFinite(Number(query.limit)) ? Number(query.limit) : undefined, \
             offset: Number.isFinite(Number(query.offset)) ? Number(query.offset) : undefined }",
        )],
        Operation::FindById | Operation::Delete => vec![Binding::new("id", "params.id")],
    }
}

pub fn render_controller(
    renderer: &Renderer,
    name: &EntityName,
    entity: &EntityView,
    op: Operation,
) -> SerafResult<String> {
    let view = ControllerView {
        entity,
        class_prefix: op.class_prefix(name),
        member: op.member_name(name),
        request_parts: request_parts(op),
        bindings: bindings(entity, op),
        status: op.success_status(),
    };
    renderer.render("controller.ts", &view)
}

pub fn render_setup(
    renderer: &Renderer,
    name: &EntityName,
    entity: &EntityView,
    op: Operation,
) -> SerafResult<String> {
    let view = ControllerView {
        entity,
        class_prefix: op.class_prefix(name),
        member: op.member_name(name),
        request_parts: request_parts(op),
        bindings: Vec::new(),
        status: op.success_status(),
    };
    renderer.render("setup_controller.ts", &view)
}

pub fn render_routes(renderer: &Renderer, name: &EntityName, entity: &EntityView) -> SerafResult<String> {
    let routes = Operation::ALL
        .iter()
        .map(|op| RouteView {
            method: op.http_method(),
            path: op.route_path(),
            class_prefix: op.class_prefix(name),
            member: op.member_name(name),
        })
        .collect();
    renderer.render("routes.ts", &RoutesView { entity, routes })
}
