//! Seraf Core Library
//!
//! Domain types and model introspection for the seraf module scaffolder.
//!
//! The pipeline starts here: a model interface (`I<Entity>` in
//! `models/I<Entity>.ts`) is parsed into an ordered list of
//! [`FieldDescriptor`]s, which `seraf-codegen` turns into artifacts.

pub mod config;
pub mod entity;
pub mod error;
pub mod field;
pub mod introspect;

pub use config::SerafConfig;
pub use entity::EntityName;
pub use error::{SerafError, SerafResult};
pub use field::{FieldDescriptor, TypeShape, IMPLICIT_FIELDS};
pub use introspect::{introspect, introspect_file};
