//! Validation engine
//!
//! Walks a candidate value alongside its [`Schema`], collecting every issue
//! instead of stopping at the first one, and builds the normalized value:
//! defaults filled in, unknown object keys dropped, absent optionals omitted.

use crate::error::{FieldIssue, Rule};
use crate::path::FieldPath;
use crate::schema::{
    EnumRule, NumberRule, ObjectSchema, Presence, Schema, StringRule, ValueKind,
};
use serde_json::{Map, Value};

/// Resolves [`Schema::Ref`] names during a walk
pub trait SchemaLookup {
    /// Schema registered under `name`
    fn lookup(&self, name: &str) -> Option<&Schema>;
}

/// Single-use validator for one candidate
pub(crate) struct Validator<'r, L: SchemaLookup + ?Sized> {
    lookup: &'r L,
    max_depth: usize,
    issues: Vec<FieldIssue>,
}

impl<'r, L: SchemaLookup + ?Sized> Validator<'r, L> {
    pub(crate) fn new(lookup: &'r L, max_depth: usize) -> Self {
        Self {
            lookup,
            max_depth,
            issues: Vec::new(),
        }
    }

    /// Validate `value` and return the normalized value with the issues found
    pub(crate) fn run(mut self, schema: &Schema, value: &Value) -> (Value, Vec<FieldIssue>) {
        let normalized = self.visit(schema, value, &FieldPath::root(), 0);
        (normalized, self.issues)
    }

    fn push(&mut self, path: &FieldPath, rule: Rule, message: impl Into<String>) {
        self.issues.push(FieldIssue::new(path.clone(), rule, message));
    }

    fn type_mismatch(&mut self, path: &FieldPath, expected: ValueKind, value: &Value) {
        let found = ValueKind::of(value);
        self.push(
            path,
            Rule::Type { expected, found },
            format!("Expected {expected}, received {found}"),
        );
    }

    fn visit(&mut self, schema: &Schema, value: &Value, path: &FieldPath, depth: usize) -> Value {
        match schema {
            Schema::String(rule) => self.visit_string(rule, value, path),
            Schema::Number(rule) => self.visit_number(*rule, value, path),
            Schema::Boolean => {
                if !value.is_boolean() {
                    self.type_mismatch(path, ValueKind::Boolean, value);
                }
                value.clone()
            }
            Schema::Enum(rule) => self.visit_enum(rule, value, path),
            Schema::Object(object) => {
                if !self.enter(path, depth) {
                    return Value::Null;
                }
                self.visit_object(object, value, path, depth + 1)
            }
            Schema::Array(item) => {
                if !self.enter(path, depth) {
                    return Value::Null;
                }
                let Some(items) = value.as_array() else {
                    self.type_mismatch(path, ValueKind::Array, value);
                    return value.clone();
                };
                let normalized = items
                    .iter()
                    .enumerate()
                    .map(|(i, item_value)| self.visit(item, item_value, &path.index(i), depth + 1))
                    .collect();
                Value::Array(normalized)
            }
            Schema::Record(entry) => {
                if !self.enter(path, depth) {
                    return Value::Null;
                }
                let Some(map) = value.as_object() else {
                    self.type_mismatch(path, ValueKind::Object, value);
                    return value.clone();
                };
                let normalized = map
                    .iter()
                    .map(|(key, entry_value)| {
                        (key.clone(), self.visit(entry, entry_value, &path.child(key), depth + 1))
                    })
                    .collect();
                Value::Object(normalized)
            }
            Schema::Union(alternatives) => self.visit_union(alternatives, value, path, depth),
            Schema::Ref(name) => match self.lookup.lookup(name) {
                Some(target) => self.visit(target, value, path, depth),
                None => {
                    self.push(
                        path,
                        Rule::UnknownSchema { name: name.clone() },
                        format!("No schema registered under '{name}'"),
                    );
                    value.clone()
                }
            },
            Schema::Any => value.clone(),
        }
    }

    /// Depth guard for container nodes; false once the cap is exceeded
    fn enter(&mut self, path: &FieldPath, depth: usize) -> bool {
        if depth >= self.max_depth {
            let limit = self.max_depth;
            self.push(
                path,
                Rule::MaxDepth { limit },
                format!("Nesting exceeds the maximum depth of {limit}"),
            );
            return false;
        }
        true
    }

    fn visit_string(&mut self, rule: &StringRule, value: &Value, path: &FieldPath) -> Value {
        let Some(s) = value.as_str() else {
            self.type_mismatch(path, ValueKind::String, value);
            return value.clone();
        };

        let len = s.chars().count();
        if let Some(min) = rule.min {
            if len < min {
                self.push(
                    path,
                    Rule::MinLength { min },
                    format!("String must contain at least {min} character(s)"),
                );
            }
        }
        if let Some(max) = rule.max {
            if len > max {
                self.push(
                    path,
                    Rule::MaxLength { max },
                    format!("String must contain at most {max} character(s)"),
                );
            }
        }
        if let Some(format) = &rule.format {
            if !format.matches(s) {
                self.push(
                    path,
                    Rule::Format {
                        format: format.name(),
                    },
                    format.message(),
                );
            }
        }
        value.clone()
    }

    fn visit_number(&mut self, rule: NumberRule, value: &Value, path: &FieldPath) -> Value {
        let Some(n) = value.as_f64() else {
            self.type_mismatch(path, ValueKind::Number, value);
            return value.clone();
        };

        if let Some(min) = rule.min {
            if n < min {
                self.push(
                    path,
                    Rule::Minimum { min },
                    format!("Number must be greater than or equal to {min}"),
                );
            }
        }
        if let Some(max) = rule.max {
            if n > max {
                self.push(
                    path,
                    Rule::Maximum { max },
                    format!("Number must be less than or equal to {max}"),
                );
            }
        }
        value.clone()
    }

    fn visit_enum(&mut self, rule: &EnumRule, value: &Value, path: &FieldPath) -> Value {
        let Some(s) = value.as_str() else {
            self.type_mismatch(path, ValueKind::String, value);
            return value.clone();
        };

        if !rule.contains(s) {
            let expected = rule
                .members
                .iter()
                .map(|m| format!("'{m}'"))
                .collect::<Vec<_>>()
                .join(" | ");
            self.push(
                path,
                Rule::OneOf {
                    allowed: rule.members.clone(),
                },
                format!("Invalid {} value. Expected {expected}, received '{s}'", rule.name),
            );
        }
        value.clone()
    }

    fn visit_object(
        &mut self,
        object: &ObjectSchema,
        value: &Value,
        path: &FieldPath,
        depth: usize,
    ) -> Value {
        let Some(map) = value.as_object() else {
            self.type_mismatch(path, ValueKind::Object, value);
            return value.clone();
        };

        let issues_before = self.issues.len();
        let mut normalized = Map::new();

        for field in object.fields() {
            let field_path = path.child(&field.name);
            match (map.get(&field.name), &field.presence) {
                (None, Presence::Required) => {
                    self.push(&field_path, Rule::Required, "Required");
                }
                (Some(Value::Null), Presence::Required) => match field.schema.expected_kind() {
                    Some(expected) => self.type_mismatch(&field_path, expected, &Value::Null),
                    None => self.push(&field_path, Rule::Required, "Required"),
                },
                (None | Some(Value::Null), Presence::Optional) => {}
                (None | Some(Value::Null), Presence::Defaulted(default)) => {
                    normalized.insert(field.name.clone(), default.resolve());
                }
                (Some(field_value), _) => {
                    let checked = self.visit(&field.schema, field_value, &field_path, depth);
                    normalized.insert(field.name.clone(), checked);
                }
            }
        }

        // Refinements only see objects whose fields all passed
        if self.issues.len() == issues_before {
            for refinement in object.refinements() {
                if let Some(message) = (refinement.check)(&normalized) {
                    self.push(
                        &path.child(refinement.field),
                        Rule::Refinement {
                            name: refinement.name,
                        },
                        message,
                    );
                }
            }
        }

        Value::Object(normalized)
    }

    fn visit_union(
        &mut self,
        alternatives: &[Schema],
        value: &Value,
        path: &FieldPath,
        depth: usize,
    ) -> Value {
        let kind = ValueKind::of(value);
        let same_kind: Vec<&Schema> = alternatives
            .iter()
            .filter(|alt| self.resolved_kind(alt) == Some(kind))
            .collect();

        // One alternative of the candidate's kind: report its issues directly
        if let [only] = same_kind.as_slice() {
            return self.visit(only, value, path, depth);
        }

        for alternative in alternatives {
            let trial = Validator::new(self.lookup, self.max_depth);
            let (normalized, issues) = trial.run_at(alternative, value, path, depth);
            if issues.is_empty() {
                return normalized;
            }
        }

        self.push(path, Rule::Union, "Invalid input");
        value.clone()
    }

    fn run_at(
        mut self,
        schema: &Schema,
        value: &Value,
        path: &FieldPath,
        depth: usize,
    ) -> (Value, Vec<FieldIssue>) {
        let normalized = self.visit(schema, value, path, depth);
        (normalized, self.issues)
    }

    fn resolved_kind(&self, schema: &Schema) -> Option<ValueKind> {
        match schema {
            Schema::Ref(name) => self
                .lookup
                .lookup(name)
                .and_then(|target| target.expected_kind()),
            other => other.expected_kind(),
        }
    }
}
