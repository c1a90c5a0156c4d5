//! Standalone OpenAPI fragment describing the module's five routes.

use serde_json::{json, Map, Value};

use seraf_core::{EntityName, FieldDescriptor, SerafResult};

use crate::type_map::openapi_schema;

fn properties<'a>(fields: impl Iterator<Item = &'a FieldDescriptor>) -> Map<String, Value> {
    fields
        .map(|f| (f.name.clone(), openapi_schema(&f.shape())))
        .collect()
}

fn required_names(fields: &[FieldDescriptor]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| !f.is_optional)
        .map(|f| f.name.clone())
        .collect()
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn json_body(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

/// Build the fragment as a JSON value.
pub fn openapi_fragment(entity: &EntityName, fields: &[FieldDescriptor]) -> Value {
    let type_name = entity.type_name();
    let name = entity.as_str();
    let create_request = format!("{}CreateRequest", type_name);
    let update_request = format!("{}UpdateRequest", type_name);
    let response = format!("{}Response", type_name);

    let mut response_properties = Map::new();
    response_properties.insert("id".into(), json!({ "type": "string" }));
    response_properties.insert("createdAt".into(), json!({ "type": "string", "format": "date-time" }));
    response_properties.insert("updatedAt".into(), json!({ "type": "string", "format": "date-time" }));
    response_properties.extend(properties(fields.iter()));

    let mut response_required = vec!["id".to_string(), "createdAt".into(), "updatedAt".into()];
    response_required.extend(required_names(fields));

    let id_parameter = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    });
    let error = json!({ "description": "Invalid request or unexpected error" });
    let single = json!({
        "type": "object",
        "properties": { name: schema_ref(&response) }
    });

    json!({
        "components": {
            "schemas": {
                create_request.clone(): {
                    "type": "object",
                    "properties": properties(fields.iter()),
                    "required": required_names(fields)
                },
                update_request.clone(): {
                    "type": "object",
                    "properties": properties(fields.iter())
                },
                response.clone(): {
                    "type": "object",
                    "properties": response_properties,
                    "required": response_required
                }
            }
        },
        "paths": {
            format!("/{}", name): {
                "post": {
                    "tags": [type_name],
                    "summary": format!("Create a {}", name),
                    "requestBody": { "required": true, "content": json_body(schema_ref(&create_request)) },
                    "responses": {
                        "201": { "description": "Created", "content": json_body(single.clone()) },
                        "400": error
                    }
                },
                "get": {
                    "tags": [type_name],
                    "summary": format!("List {}", name),
                    "parameters": [
                        { "name": "limit", "in": "query", "schema": { "type": "integer" } },
                        { "name": "offset", "in": "query", "schema": { "type": "integer" } }
                    ],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": json_body(json!({
                                "type": "object",
                                "properties": {
                                    format!("{}List", name): { "type": "array", "items": schema_ref(&response) }
                                }
                            }))
                        },
                        "400": error
                    }
                }
            },
            format!("/{}/{{id}}", name): {
                "get": {
                    "tags": [type_name],
                    "summary": format!("Find a {} by id", name),
                    "parameters": [id_parameter],
                    "responses": {
                        "200": { "description": "OK", "content": json_body(single.clone()) },
                        "400": error
                    }
                },
                "put": {
                    "tags": [type_name],
                    "summary": format!("Update a {}", name),
                    "parameters": [id_parameter],
                    "requestBody": { "required": true, "content": json_body(schema_ref(&update_request)) },
                    "responses": {
                        "200": { "description": "OK", "content": json_body(single) },
                        "400": error
                    }
                },
                "delete": {
                    "tags": [type_name],
                    "summary": format!("Delete a {}", name),
                    "parameters": [id_parameter],
                    "responses": {
                        "200": { "description": "OK" },
                        "400": error
                    }
                }
            }
        }
    })
}

pub fn render_openapi(entity: &EntityName, fields: &[FieldDescriptor]) -> SerafResult<String> {
    let mut rendered = serde_json::to_string_pretty(&openapi_fragment(entity, fields))?;
    rendered.push('\n');
    Ok(rendered)
}
