//! Hand-written starting points: the model stub, the shared `common`
//! module and blank custom use-cases.

use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

use seraf_core::{EntityName, SerafError, SerafResult, IMPLICIT_FIELDS};

use crate::artifact::{lower_first, OutputFile};
use crate::templates::Renderer;

/// A scaffolded file, relative to the directory it is written into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

impl GeneratedFile {
    fn new(path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

impl OutputFile for GeneratedFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Empty `I<Entity>` interface, relative to the module directory.
pub fn generate_model_stub(entity: &EntityName) -> SerafResult<GeneratedFile> {
    let renderer = Renderer::new()?;
    let content = renderer.render("model.ts", &json!({ "model": entity.model_name() }))?;
    Ok(GeneratedFile::new(
        PathBuf::from("models").join(format!("{}.ts", entity.model_name())),
        content,
    ))
}

/// Shared base model, validation and error classes, relative to the
/// `common` directory.
pub fn generate_common_module() -> SerafResult<Vec<GeneratedFile>> {
    let renderer = Renderer::new()?;
    let none = json!({});

    Ok(vec![
        GeneratedFile::new("models/ICommon.ts", renderer.render("common_model.ts", &none)?),
        GeneratedFile::new(
            "utils/ValidateCommon.ts",
            renderer.render("validate_common.ts", &json!({ "implicit_fields": IMPLICIT_FIELDS }))?,
        ),
        GeneratedFile::new("errors/NotFoundError.ts", renderer.render("not_found_error.ts", &none)?),
        GeneratedFile::new(
            "errors/RequiredFieldMissingError.ts",
            renderer.render("required_field_missing_error.ts", &none)?,
        ),
    ])
}

/// Blank use-case, controller and types under `use-cases/<name>/`,
/// relative to the module directory.
pub fn generate_blank_use_case(entity: &EntityName, name: &str) -> SerafResult<Vec<GeneratedFile>> {
    let class_name = pascal_case(name)?;
    tracing::debug!(entity = %entity, use_case = name, "Scaffolding blank use-case");
    let view = json!({
        "class_name": class_name,
        "member": lower_first(&class_name),
    });

    let renderer = Renderer::new()?;
    let dir = PathBuf::from("use-cases").join(name);

    Ok(vec![
        GeneratedFile::new(dir.join("UseCase.ts"), renderer.render("blank_usecase.ts", &view)?),
        GeneratedFile::new(dir.join("Controller.ts"), renderer.render("blank_controller.ts", &view)?),
        GeneratedFile::new(dir.join("types/IRequest.ts"), renderer.render("blank_request.ts", &view)?),
        GeneratedFile::new(dir.join("types/IResponse.ts"), renderer.render("blank_response.ts", &view)?),
    ])
}

/// `approve-order` -> `ApproveOrder`.
fn pascal_case(kebab: &str) -> SerafResult<String> {
    let valid = kebab.starts_with(|c: char| c.is_ascii_lowercase())
        && !kebab.ends_with('-')
        && !kebab.contains("--")
        && kebab
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(SerafError::InvalidUseCaseName(kebab.to_string()));
    }

    Ok(kebab
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("approve-order").unwrap(), "ApproveOrder");
        assert_eq!(pascal_case("sync2-users").unwrap(), "Sync2Users");
        assert_eq!(pascal_case("ping").unwrap(), "Ping");
    }

    #[test]
    fn test_pascal_case_rejects_non_kebab() {
        for bad in ["", "Approve", "approve_order", "approve--order", "approve-", "-approve", "9lives"] {
            assert!(
                matches!(pascal_case(bad), Err(SerafError::InvalidUseCaseName(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_model_stub() {
        let stub = generate_model_stub(&EntityName::new("orderItem").unwrap()).unwrap();
        assert_eq!(stub.path, PathBuf::from("models/IOrderItem.ts"));
        assert!(stub.content.contains("export interface IOrderItem extends ICommon {"));
        assert!(stub.content.contains("import { ICommon } from \"../../common\";"));
    }

    #[test]
    fn test_common_module() {
        let files = generate_common_module().unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("models/ICommon.ts"),
                PathBuf::from("utils/ValidateCommon.ts"),
                PathBuf::from("errors/NotFoundError.ts"),
                PathBuf::from("errors/RequiredFieldMissingError.ts"),
            ]
        );
        let validate = &files[1].content;
        for field in IMPLICIT_FIELDS {
            assert!(validate.contains(&format!("throw new RequiredFieldMissingError(\"Common\", \"{}\");", field)));
        }
    }

    #[test]
    fn test_blank_use_case() {
        let files = generate_blank_use_case(&EntityName::new("order").unwrap(), "approve-order").unwrap();
        assert_eq!(files.len(), 4);
        assert_eq!(files[0].path, PathBuf::from("use-cases/approve-order/UseCase.ts"));
        assert!(files[0].content.contains("export class ApproveOrderUseCase {"));
        assert!(files[1].content.contains("private readonly approveOrder: ApproveOrderUseCase;"));
        assert!(files[1].content.contains("response.status(500)"));
        assert_eq!(files[3].path, PathBuf::from("use-cases/approve-order/types/IResponse.ts"));
    }
}
