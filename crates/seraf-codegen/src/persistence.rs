//! Persistence layer: Mongoose schema, repository contract and the
//! Mongoose-backed repository implementation.

use serde::Serialize;
use tracing::warn;

use seraf_core::{FieldDescriptor, SerafError, SerafResult};

use crate::templates::Renderer;
use crate::type_map::{persistence_for, Mapping};
use crate::view::EntityView;

/// Filter key that is always present on `IFilter`.
const IDS_KEY: &str = "ids";

/// A caller-requested filter key, resolved against the field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FilterKey {
    Resolved { name: String, ty: String },
    /// Names no field of the entity; rendered as `unknown`.
    Unresolved { name: String },
}

impl FilterKey {
    pub fn name(&self) -> &str {
        match self {
            Self::Resolved { name, .. } | Self::Unresolved { name } => name,
        }
    }

    pub fn declared_type(&self) -> &str {
        match self {
            Self::Resolved { ty, .. } => ty,
            Self::Unresolved { .. } => "unknown",
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Whether `key` can stand as a property name on `IFilter` and in a query.
fn is_filter_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Resolve filter keys in request order. `ids` and repeated keys are dropped.
///
/// Keys are spliced into generated TypeScript, so anything that is not a
/// plain identifier is rejected.
pub fn resolve_filter_keys(
    keys: &[String],
    fields: &[FieldDescriptor],
) -> SerafResult<Vec<FilterKey>> {
    let mut resolved: Vec<FilterKey> = Vec::new();

    for key in keys {
        if !is_filter_identifier(key) {
            return Err(SerafError::InvalidFilterKey(key.clone()));
        }
        if key == IDS_KEY || resolved.iter().any(|k| k.name() == key) {
            continue;
        }
        match fields.iter().find(|f| &f.name == key) {
            Some(field) => resolved.push(FilterKey::Resolved {
                name: key.clone(),
                ty: field.declared_type.clone(),
            }),
            None => {
                warn!(key = %key, "Filter key names no field, typing it as unknown");
                resolved.push(FilterKey::Unresolved { name: key.clone() });
            }
        }
    }

    Ok(resolved)
}

/// Names of fields with no storage representation.
pub fn omitted_fields(fields: &[FieldDescriptor]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| persistence_for(&f.shape()) == Mapping::Omitted)
        .map(|f| f.name.clone())
        .collect()
}

#[derive(Serialize)]
struct PersistedField {
    name: String,
    mongoose: &'static str,
    required: bool,
}

#[derive(Serialize)]
struct SchemaView<'a> {
    #[serde(flatten)]
    entity: &'a EntityView,
    persisted: Vec<PersistedField>,
}

#[derive(Serialize)]
struct FilterView<'a> {
    name: &'a str,
    ty: &'a str,
}

#[derive(Serialize)]
struct ContractView<'a> {
    #[serde(flatten)]
    entity: &'a EntityView,
    filter_keys: Vec<FilterView<'a>>,
}

pub fn render_schema(
    renderer: &Renderer,
    entity: &EntityView,
    fields: &[FieldDescriptor],
) -> SerafResult<String> {
    let persisted = fields
        .iter()
        .filter_map(|field| match persistence_for(&field.shape()) {
            Mapping::Supported(ty) => Some(PersistedField {
                name: field.name.clone(),
                mongoose: ty.mongoose(),
                required: !field.is_optional,
            }),
            Mapping::Omitted => None,
        })
        .collect();

    renderer.render("schema.ts", &SchemaView { entity, persisted })
}

pub fn render_repository_contract(
    renderer: &Renderer,
    entity: &EntityView,
    filter_keys: &[FilterKey],
) -> SerafResult<String> {
    let view = ContractView {
        entity,
        filter_keys: filter_keys
            .iter()
            .map(|k| FilterView {
                name: k.name(),
                ty: k.declared_type(),
            })
            .collect(),
    };
    renderer.render("repository_contract.ts", &view)
}

pub fn render_repository_impl(renderer: &Renderer, entity: &EntityView) -> SerafResult<String> {
    renderer.render("repository_impl.ts", entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seraf_core::EntityName;

    fn user_view(fields: &[FieldDescriptor]) -> EntityView {
        EntityView::new(&EntityName::new("user").unwrap(), fields)
    }

    #[test]
    fn test_schema_required_follows_optionality() {
        let renderer = Renderer::new().unwrap();

        let required = vec![FieldDescriptor::required("email", "string")];
        let out = render_schema(&renderer, &user_view(&required), &required).unwrap();
        assert!(out.contains("email: { type: String, required: true },"));

        let optional = vec![FieldDescriptor::optional("email", "string")];
        let out = render_schema(&renderer, &user_view(&optional), &optional).unwrap();
        assert!(out.contains("email: { type: String, required: false },"));
    }

    #[test]
    fn test_schema_has_implicit_fields_and_collection() {
        let renderer = Renderer::new().unwrap();
        let out = render_schema(&renderer, &user_view(&[]), &[]).unwrap();
        assert!(out.contains("id: { type: String, required: true, index: true, immutable: true },"));
        assert!(out.contains("updatedAt: { type: Date, required: true, index: true },"));
        assert!(out.contains("collection: \"user\","));
        assert!(out.contains("mongoose.model<IUser>(\"User\", UserSchema)"));
    }

    #[test]
    fn test_schema_omits_unsupported_types() {
        let renderer = Renderer::new().unwrap();
        let fields = vec![
            FieldDescriptor::required("roles", "string[]"),
            FieldDescriptor::required("address", "IAddress"),
        ];
        let out = render_schema(&renderer, &user_view(&fields), &fields).unwrap();
        assert!(out.contains("roles: { type: [String], required: true },"));
        assert!(!out.contains("address"));
        assert_eq!(omitted_fields(&fields), vec!["address".to_string()]);
    }

    #[test]
    fn test_filter_keys_resolve_against_fields() {
        let fields = vec![FieldDescriptor::required("email", "string")];
        let keys: Vec<String> = ["email", "ids", "nickname", "email"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let resolved = resolve_filter_keys(&keys, &fields).unwrap();
        assert_eq!(
            resolved,
            vec![
                FilterKey::Resolved {
                    name: "email".into(),
                    ty: "string".into()
                },
                FilterKey::Unresolved {
                    name: "nickname".into()
                },
            ]
        );
    }

    #[test]
    fn test_filter_keys_must_be_identifiers() {
        let fields = vec![FieldDescriptor::required("email", "string")];
        for bad in ["first-name", "a b", "x: any; y", "1st", ""] {
            let err = resolve_filter_keys(&[bad.to_string()], &fields).unwrap_err();
            assert!(matches!(err, SerafError::InvalidFilterKey(ref k) if k == bad));
        }
        let ok = resolve_filter_keys(&["_id".into(), "$meta".into()], &fields).unwrap();
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn test_contract_renders_filter_keys() {
        let renderer = Renderer::new().unwrap();
        let fields = vec![FieldDescriptor::required("email", "string")];
        let keys = resolve_filter_keys(&["email".into(), "nickname".into()], &fields).unwrap();
        let out = render_repository_contract(&renderer, &user_view(&fields), &keys).unwrap();

        assert!(out.contains("  ids?: string[];\n  email?: string;\n  nickname?: unknown;\n}"));
        assert!(out.contains("create(data: { user: IUser }): Promise<IUser>;"));
        assert!(out.contains("update(data: { user: IUser }): Promise<IUser>;"));
        assert!(out.contains("field: \"createdAt\";"));
    }

    #[test]
    fn test_contract_without_filter_keys_keeps_ids() {
        let renderer = Renderer::new().unwrap();
        let out = render_repository_contract(&renderer, &user_view(&[]), &[]).unwrap();
        assert!(out.contains("export interface IFilter {\n  ids?: string[];\n}"));
    }

    #[test]
    fn test_repository_impl_guards_not_found() {
        let renderer = Renderer::new().unwrap();
        let out = render_repository_impl(&renderer, &user_view(&[])).unwrap();
        assert!(out.contains("class UserMongooseRepository implements IUserRepository"));
        assert!(out.contains("query.id = { $in: value };"));
        assert_eq!(out.matches("throw new NotFoundError(\"User\"").count(), 2);
    }
}
