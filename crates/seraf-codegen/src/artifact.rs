//! Artifact identities, output locations and the generated set.

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use seraf_core::EntityName;

/// The CRUD operations every module exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    List,
    FindById,
    Update,
    Delete,
}

impl Operation {
    /// All operations in generation order.
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::List,
        Operation::FindById,
        Operation::Update,
        Operation::Delete,
    ];

    /// Stable identifier used in artifact ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::FindById => "find-by-id",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Class-name prefix (`CreateUser`, `FindUserById`).
    pub fn class_prefix(&self, entity: &EntityName) -> String {
        let type_name = entity.type_name();
        match self {
            Self::Create => format!("Create{}", type_name),
            Self::List => format!("List{}", type_name),
            Self::FindById => format!("Find{}ById", type_name),
            Self::Update => format!("Update{}", type_name),
            Self::Delete => format!("Delete{}", type_name),
        }
    }

    /// Member / variable name (`createUser`, `findUserById`).
    pub fn member_name(&self, entity: &EntityName) -> String {
        lower_first(&self.class_prefix(entity))
    }

    /// Use-case directory (`create-user`, `find-user-by-id`).
    pub fn directory(&self, entity: &EntityName) -> String {
        let slug = entity.kebab();
        match self {
            Self::Create => format!("create-{}", slug),
            Self::List => format!("list-{}", slug),
            Self::FindById => format!("find-{}-by-id", slug),
            Self::Update => format!("update-{}", slug),
            Self::Delete => format!("delete-{}", slug),
        }
    }

    /// Express router method.
    pub fn http_method(&self) -> &'static str {
        match self {
            Self::Create => "post",
            Self::List | Self::FindById => "get",
            Self::Update => "put",
            Self::Delete => "delete",
        }
    }

    /// Route path relative to the module router.
    pub fn route_path(&self) -> &'static str {
        match self {
            Self::Create | Self::List => "/",
            Self::FindById | Self::Update | Self::Delete => "/:id",
        }
    }

    /// HTTP status returned on success.
    pub fn success_status(&self) -> u16 {
        match self {
            Self::Create => 201,
            _ => 200,
        }
    }
}

/// Identity of one generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Schema,
    RepositoryContract,
    RepositoryImpl,
    Validator,
    Request(Operation),
    Response(Operation),
    UseCase(Operation),
    Controller(Operation),
    Setup(Operation),
    Routes,
    OpenApi,
}

impl ArtifactKind {
    /// Identifier such as `schema` or `find-by-id-controller`.
    pub fn id(&self) -> String {
        match self {
            Self::Schema => "schema".to_string(),
            Self::RepositoryContract => "repository-contract".to_string(),
            Self::RepositoryImpl => "repository-impl".to_string(),
            Self::Validator => "validator".to_string(),
            Self::Request(op) => format!("{}-request", op.as_str()),
            Self::Response(op) => format!("{}-response", op.as_str()),
            Self::UseCase(op) => format!("{}-usecase", op.as_str()),
            Self::Controller(op) => format!("{}-controller", op.as_str()),
            Self::Setup(op) => format!("{}-setup", op.as_str()),
            Self::Routes => "routes".to_string(),
            Self::OpenApi => "openapi".to_string(),
        }
    }

    /// Output path relative to the module directory.
    pub fn relative_path(&self, entity: &EntityName) -> PathBuf {
        let type_name = entity.type_name();
        let use_case_dir = |op: &Operation| PathBuf::from("use-cases").join(op.directory(entity));

        match self {
            Self::Schema => PathBuf::from("repositories/implementations")
                .join(format!("{}Mongoose.ts", type_name)),
            Self::RepositoryContract => PathBuf::from("repositories/interfaces")
                .join(format!("I{}Repository.ts", type_name)),
            Self::RepositoryImpl => PathBuf::from("repositories/implementations")
                .join(format!("{}MongooseRepository.ts", type_name)),
            Self::Validator => PathBuf::from("utils").join(format!("Validate{}.ts", type_name)),
            Self::Request(op) => use_case_dir(op).join("types/IRequest.ts"),
            Self::Response(op) => use_case_dir(op).join("types/IResponse.ts"),
            Self::UseCase(op) => use_case_dir(op).join("UseCase.ts"),
            Self::Controller(op) => use_case_dir(op).join("Controller.ts"),
            Self::Setup(op) => use_case_dir(op).join("setupController.ts"),
            Self::Routes => PathBuf::from("routes").join(format!("{}ExpressRoutes.ts", entity.as_str())),
            Self::OpenApi => PathBuf::from("docs").join(format!("{}.openapi.json", entity.as_str())),
        }
    }
}

impl Serialize for ArtifactKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id())
    }
}

/// Anything the emitter can write: a relative path plus text content.
pub trait OutputFile {
    fn path(&self) -> &Path;
    fn content(&self) -> &str;
}

/// One generated text unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub content: String,
}

impl OutputFile for Artifact {
    fn path(&self) -> &Path {
        &self.path
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Degradations encountered while synthesizing. None of them is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SynthesisReport {
    /// Fields left out of the persistence schema (unsupported type).
    pub omitted_fields: Vec<String>,
    /// Filter keys that name no field of the entity.
    pub unresolved_filter_keys: Vec<String>,
}

impl SynthesisReport {
    pub fn is_clean(&self) -> bool {
        self.omitted_fields.is_empty() && self.unresolved_filter_keys.is_empty()
    }
}

/// Every artifact generated for one entity, in generation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactSet {
    pub entity: EntityName,
    pub artifacts: Vec<Artifact>,
    pub report: SynthesisReport,
}

impl ArtifactSet {
    pub fn get(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    /// Content of an artifact, if it was generated.
    pub fn content(&self, kind: ArtifactKind) -> Option<&str> {
        self.get(kind).map(|a| a.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }
}

pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
