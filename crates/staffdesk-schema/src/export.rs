//! JSON Schema export
//!
//! Renders a registered rule tree as a draft-07 JSON Schema document. Named
//! references become `$ref`s into a `definitions` table holding every schema
//! reachable from the root, so recursive shapes export without unrolling.

use crate::error::UnknownSchema;
use crate::registry::SchemaRegistry;
use crate::schema::{DefaultValue, ObjectSchema, Presence, Schema, StringFormat, StringRule};
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

/// Draft-07 meta-schema URI
pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Export the schema registered under `name`
///
/// # Errors
/// Returns `UnknownSchema` if `name`, or any schema it references, is not
/// registered
pub fn json_schema(registry: &SchemaRegistry, name: &str) -> Result<Value, UnknownSchema> {
    let root = registry
        .get(name)
        .ok_or_else(|| UnknownSchema(name.to_string()))?;

    let mut reachable = BTreeSet::new();
    collect_refs(registry, root, &mut reachable)?;

    let mut definitions = Map::new();
    for referenced in &reachable {
        // collect_refs only records registered names
        if let Some(schema) = registry.get(referenced) {
            definitions.insert(referenced.clone(), render(schema));
        }
    }

    let mut document = Map::new();
    document.insert("$schema".into(), json!(DRAFT_07));
    document.insert("title".into(), json!(name));
    if let Value::Object(body) = render(root) {
        document.extend(body);
    }
    if !definitions.is_empty() {
        document.insert("definitions".into(), Value::Object(definitions));
    }

    tracing::debug!(schema = name, definitions = reachable.len(), "exported json schema");
    Ok(Value::Object(document))
}

fn collect_refs(
    registry: &SchemaRegistry,
    schema: &Schema,
    seen: &mut BTreeSet<String>,
) -> Result<(), UnknownSchema> {
    match schema {
        Schema::Ref(name) => {
            if seen.insert(name.clone()) {
                let target = registry
                    .get(name)
                    .ok_or_else(|| UnknownSchema(name.clone()))?;
                collect_refs(registry, target, seen)?;
            }
        }
        Schema::Array(item) | Schema::Record(item) => collect_refs(registry, item, seen)?,
        Schema::Union(alternatives) => {
            for alternative in alternatives {
                collect_refs(registry, alternative, seen)?;
            }
        }
        Schema::Object(object) => {
            for field in object.fields() {
                collect_refs(registry, &field.schema, seen)?;
            }
        }
        Schema::String(_)
        | Schema::Number(_)
        | Schema::Boolean
        | Schema::Enum(_)
        | Schema::Any => {}
    }
    Ok(())
}

fn render(schema: &Schema) -> Value {
    match schema {
        Schema::String(rule) => render_string(rule),
        Schema::Number(rule) => {
            let mut out = Map::new();
            out.insert("type".into(), json!("number"));
            if let Some(min) = rule.min {
                out.insert("minimum".into(), json!(min));
            }
            if let Some(max) = rule.max {
                out.insert("maximum".into(), json!(max));
            }
            Value::Object(out)
        }
        Schema::Boolean => json!({ "type": "boolean" }),
        Schema::Enum(rule) => json!({ "type": "string", "enum": rule.members }),
        Schema::Object(object) => render_object(object),
        Schema::Array(item) => json!({ "type": "array", "items": render(item) }),
        Schema::Record(entry) => json!({ "type": "object", "additionalProperties": render(entry) }),
        Schema::Union(alternatives) => {
            json!({ "anyOf": alternatives.iter().map(render).collect::<Vec<_>>() })
        }
        Schema::Ref(name) => json!({ "$ref": format!("#/definitions/{name}") }),
        Schema::Any => json!({}),
    }
}

fn render_string(rule: &StringRule) -> Value {
    let mut out = Map::new();
    out.insert("type".into(), json!("string"));
    if let Some(min) = rule.min {
        out.insert("minLength".into(), json!(min));
    }
    if let Some(max) = rule.max {
        out.insert("maxLength".into(), json!(max));
    }
    match &rule.format {
        Some(StringFormat::Email) => {
            out.insert("format".into(), json!("email"));
        }
        Some(StringFormat::Datetime) => {
            out.insert("format".into(), json!("date-time"));
        }
        Some(StringFormat::Uuid) => {
            out.insert("format".into(), json!("uuid"));
        }
        Some(format) => {
            if let Some(regex) = format.regex() {
                out.insert("pattern".into(), json!(regex.as_str()));
            }
        }
        None => {}
    }
    Value::Object(out)
}

fn render_object(object: &ObjectSchema) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in object.fields() {
        let rendered = render(&field.schema);
        let property = match &field.presence {
            Presence::Required => {
                required.push(json!(field.name));
                rendered
            }
            Presence::Optional => nullable(rendered),
            Presence::Defaulted(default) => {
                let mut property = nullable(rendered);
                match (default, &mut property) {
                    (DefaultValue::EmptyArray, Value::Object(map)) => {
                        map.insert("default".into(), json!([]));
                    }
                    (DefaultValue::Value(value), Value::Object(map)) => {
                        map.insert("default".into(), value.clone());
                    }
                    _ => {}
                }
                property
            }
        };
        properties.insert(field.name.clone(), property);
    }

    let mut out = Map::new();
    out.insert("type".into(), json!("object"));
    out.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        out.insert("required".into(), Value::Array(required));
    }
    Value::Object(out)
}

/// Absent and `null` are both accepted for optional fields
fn nullable(schema: Value) -> Value {
    json!({ "anyOf": [schema, { "type": "null" }] })
}
