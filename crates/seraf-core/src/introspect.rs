//! Field Introspector: extracts field declarations from a model interface.
//!
//! The source is parsed with tree-sitter's TypeScript grammar. Every
//! `interface_declaration` named like the expected model contributes its
//! `property_signature` members, in source order.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree, TreeCursor};

use crate::entity::EntityName;
use crate::error::{SerafError, SerafResult};
use crate::field::{FieldDescriptor, IMPLICIT_FIELDS};

/// Parse `source` and return the fields of the interface `expected_name`.
///
/// A source without that declaration yields an empty list. A source that
/// does not parse is an error.
pub fn introspect(source: &str, expected_name: &str) -> SerafResult<Vec<FieldDescriptor>> {
    let tree = parse(source)?;
    let root = tree.root_node();

    if root.has_error() {
        return Err(first_syntax_error(root));
    }

    let mut fields = Vec::new();
    let mut cursor = root.walk();
    visit(source, &mut cursor, expected_name, &mut fields);

    tracing::debug!(
        model = expected_name,
        count = fields.len(),
        "Introspected model fields"
    );

    Ok(fields)
}

/// Read a model file and introspect the entity's `I<Entity>` interface.
pub fn introspect_file(path: &Path, entity: &EntityName) -> SerafResult<Vec<FieldDescriptor>> {
    if !path.exists() {
        return Err(SerafError::ModelNotFound(path.to_path_buf()));
    }
    let source = std::fs::read_to_string(path)?;
    introspect(&source, &entity.model_name())
}

fn parse(source: &str) -> SerafResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .map_err(|e| SerafError::Grammar(e.to_string()))?;

    parser
        .parse(source, None)
        .ok_or_else(|| SerafError::Grammar("parser produced no syntax tree".to_string()))
}

fn visit(source: &str, cursor: &mut TreeCursor, expected_name: &str, fields: &mut Vec<FieldDescriptor>) {
    let node = cursor.node();

    if node.kind() == "interface_declaration" && declared_name(source, node) == Some(expected_name) {
        collect_members(source, node, fields);
    }

    if cursor.goto_first_child() {
        loop {
            visit(source, cursor, expected_name, fields);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

fn declared_name<'s>(source: &'s str, node: Node) -> Option<&'s str> {
    node.child_by_field_name("name")
        .and_then(|name| name.utf8_text(source.as_bytes()).ok())
}

fn collect_members(source: &str, interface: Node, fields: &mut Vec<FieldDescriptor>) {
    let Some(body) = interface.child_by_field_name("body") else {
        return;
    };

    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        if member.kind() != "property_signature" {
            continue;
        }
        let Some(field) = property_field(source, member) else {
            continue;
        };

        if IMPLICIT_FIELDS.contains(&field.name.as_str()) {
            tracing::debug!(field = %field.name, "Skipping implicit base field");
            continue;
        }
        if fields.iter().any(|f| f.name == field.name) {
            tracing::warn!(field = %field.name, "Duplicate field declaration ignored");
            continue;
        }

        fields.push(field);
    }
}

/// Build a descriptor from a `property_signature`, or `None` when the member
/// has no type annotation.
fn property_field(source: &str, member: Node) -> Option<FieldDescriptor> {
    let annotation = member.child_by_field_name("type")?;
    let type_node = annotation.named_child(0)?;
    let declared_type = type_node.utf8_text(source.as_bytes()).ok()?.trim().to_string();

    let name_node = member.child_by_field_name("name")?;
    let raw_name = name_node.utf8_text(source.as_bytes()).ok()?;
    let name = raw_name.trim_matches(|c| c == '\'' || c == '"').to_string();

    let mut cursor = member.walk();
    let is_optional = member.children(&mut cursor).any(|child| child.kind() == "?");

    Some(FieldDescriptor {
        name,
        declared_type,
        is_optional,
    })
}

fn first_syntax_error(root: Node) -> SerafError {
    match find_error_node(root) {
        Some(node) => {
            let position = node.start_position();
            let message = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                "unexpected syntax".to_string()
            };
            SerafError::parse_at(position.row, position.column, message)
        }
        None => SerafError::parse_at(0, 0, "source could not be parsed"),
    }
}

fn find_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(find_error_node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const USER_MODEL: &str = r#"
import { ICommon } from "../../common"

export interface IUser extends ICommon {
  email: string
  roles: string[]
  isActive?: boolean
  status: 'active' | 'inactive'
}
"#;

    #[test]
    fn test_extracts_fields_in_declaration_order() {
        let fields = introspect(USER_MODEL, "IUser").unwrap();
        assert_eq!(
            fields,
            vec![
                FieldDescriptor::required("email", "string"),
                FieldDescriptor::required("roles", "string[]"),
                FieldDescriptor::optional("isActive", "boolean"),
                FieldDescriptor::required("status", "'active' | 'inactive'"),
            ]
        );
    }

    #[test]
    fn test_missing_declaration_yields_empty_list() {
        let fields = introspect(USER_MODEL, "IProduct").unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_empty_source_yields_empty_list() {
        assert!(introspect("", "IUser").unwrap().is_empty());
    }

    #[test]
    fn test_only_the_named_interface_is_read() {
        let source = r#"
interface IAddress { street: string }
export interface IUser { name: string; address?: IAddress }
"#;
        let fields = introspect(source, "IUser").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1], FieldDescriptor::optional("address", "IAddress"));
    }

    #[test]
    fn test_untyped_members_and_methods_are_skipped() {
        let source = r#"
export interface IUser {
  nickname;
  greet(): void;
  email: string;
}
"#;
        let fields = introspect(source, "IUser").unwrap();
        assert_eq!(fields, vec![FieldDescriptor::required("email", "string")]);
    }

    #[test]
    fn test_implicit_and_duplicate_fields_are_dropped() {
        let source = r#"
export interface IUser {
  id: string;
  email: string;
  createdAt: Date;
  email?: number;
}
"#;
        let fields = introspect(source, "IUser").unwrap();
        assert_eq!(fields, vec![FieldDescriptor::required("email", "string")]);
    }

    #[test]
    fn test_quoted_property_names() {
        let source = "export interface IUser { 'nickName'?: string }";
        let fields = introspect(source, "IUser").unwrap();
        assert_eq!(fields, vec![FieldDescriptor::optional("nickName", "string")]);
    }

    #[test]
    fn test_malformed_source_is_a_parse_error() {
        let source = "export interface IUser {\n  email: string\n";
        let err = introspect(source, "IUser").unwrap_err();
        assert!(matches!(err, SerafError::Parse { .. }), "{err}");
    }

    #[test]
    fn test_introspect_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(USER_MODEL.as_bytes()).unwrap();

        let entity = EntityName::new("user").unwrap();
        let fields = introspect_file(file.path(), &entity).unwrap();
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_introspect_missing_file() {
        let entity = EntityName::new("user").unwrap();
        let err = introspect_file(Path::new("/nonexistent/models/IUser.ts"), &entity).unwrap_err();
        assert!(matches!(err, SerafError::ModelNotFound(_)));
    }
}
