//! Turns an entity and its fields into the full [`ArtifactSet`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use seraf_core::{EntityName, FieldDescriptor, SerafConfig, SerafResult};

use crate::artifact::{Artifact, ArtifactKind, ArtifactSet, Operation, SynthesisReport};
use crate::controllers::{render_controller, render_routes, render_setup};
use crate::openapi::render_openapi;
use crate::persistence::{
    omitted_fields, render_repository_contract, render_repository_impl, render_schema,
    resolve_filter_keys, FilterKey,
};
use crate::templates::Renderer;
use crate::usecases::{render_request, render_response, render_use_case};
use crate::validator::render_validator;
use crate::view::EntityView;

/// Paging defaults baked into the generated list use-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDefaults {
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListDefaults {
    fn default() -> Self {
        Self { limit: 10, offset: 0 }
    }
}

/// Caller choices that shape the generated module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Extra keys accepted by the repository `IFilter`.
    pub filter_keys: Vec<String>,
    pub list_defaults: ListDefaults,
}

impl SynthesisOptions {
    pub fn from_config(config: &SerafConfig) -> Self {
        Self {
            filter_keys: config.generation.filter_keys.clone(),
            list_defaults: ListDefaults {
                limit: config.generation.list_limit,
                offset: config.generation.list_offset,
            },
        }
    }

    /// Add keys not already present, keeping order.
    pub fn with_filter_keys(mut self, keys: impl IntoIterator<Item = String>) -> Self {
        for key in keys {
            if !self.filter_keys.contains(&key) {
                self.filter_keys.push(key);
            }
        }
        self
    }
}

/// Render every artifact for `entity` in generation order.
///
/// Pure: the same inputs always produce an equal set. Nothing is written
/// to disk here.
pub fn synthesize(
    entity: &EntityName,
    fields: &[FieldDescriptor],
    options: &SynthesisOptions,
) -> SerafResult<ArtifactSet> {
    let renderer = Renderer::new()?;
    let view = EntityView::new(entity, fields);
    let filter_keys = resolve_filter_keys(&options.filter_keys, fields)?;

    let report = SynthesisReport {
        omitted_fields: omitted_fields(fields),
        unresolved_filter_keys: filter_keys
            .iter()
            .filter(|k| !k.is_resolved())
            .map(|k| k.name().to_string())
            .collect(),
    };
    for name in &report.omitted_fields {
        warn!(entity = %entity, field = %name, "Unsupported type, field left out of the schema");
    }

    let mut artifacts = Vec::new();
    let mut push = |kind: ArtifactKind, content: String| {
        debug!(artifact = %kind.id(), bytes = content.len(), "Rendered");
        artifacts.push(Artifact {
            kind,
            path: kind.relative_path(entity),
            content,
        });
    };

    push(ArtifactKind::Schema, render_schema(&renderer, &view, fields)?);
    push(
        ArtifactKind::RepositoryContract,
        render_repository_contract(&renderer, &view, &filter_keys)?,
    );
    push(ArtifactKind::RepositoryImpl, render_repository_impl(&renderer, &view)?);
    push(ArtifactKind::Validator, render_validator(&renderer, &view)?);

    for op in Operation::ALL {
        push(ArtifactKind::Request(op), render_request(&renderer, &view, op)?);
        push(ArtifactKind::Response(op), render_response(&renderer, &view, op)?);
        push(
            ArtifactKind::UseCase(op),
            render_use_case(&renderer, entity, &view, op, &options.list_defaults)?,
        );
        push(ArtifactKind::Controller(op), render_controller(&renderer, entity, &view, op)?);
        push(ArtifactKind::Setup(op), render_setup(&renderer, entity, &view, op)?);
    }

    push(ArtifactKind::Routes, render_routes(&renderer, entity, &view)?);
    push(ArtifactKind::OpenApi, render_openapi(entity, fields)?);

    info!(
        entity = %entity,
        fields = fields.len(),
        artifacts = artifacts.len(),
        "Synthesized module"
    );

    Ok(ArtifactSet {
        entity: entity.clone(),
        artifacts,
        report,
    })
}

/// Filter keys as they will appear on `IFilter`.
pub fn preview_filter_keys(
    fields: &[FieldDescriptor],
    options: &SynthesisOptions,
) -> SerafResult<Vec<FilterKey>> {
    resolve_filter_keys(&options.filter_keys, fields)
}
