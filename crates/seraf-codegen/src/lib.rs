//! # Seraf Codegen
//!
//! Generates the files of a layered (controller / use-case / repository)
//! Express + Mongoose module from an entity's field list.
//!
//! Produces the persistence schema, repository contract and implementation,
//! validator, per-operation request/response types, use-cases, controllers
//! and setup controllers, route registration and an OpenAPI fragment.
//! Every artifact is a pure function of the entity name, its fields and the
//! [`SynthesisOptions`]; writing them to disk is left to [`emit`].

pub mod artifact;
pub mod controllers;
pub mod emit;
pub mod openapi;
pub mod persistence;
pub mod scaffold;
pub mod synthesizer;
pub mod templates;
pub mod type_map;
pub mod usecases;
pub mod validator;
pub mod view;

pub use artifact::{Artifact, ArtifactKind, ArtifactSet, Operation, OutputFile, SynthesisReport};
pub use emit::{write_artifacts, write_files, EmitSummary};
pub use persistence::FilterKey;
pub use scaffold::{generate_blank_use_case, generate_common_module, generate_model_stub, GeneratedFile};
pub use synthesizer::{synthesize, ListDefaults, SynthesisOptions};
pub use templates::Renderer;
pub use type_map::{persistence_for, Mapping, PersistenceType};
