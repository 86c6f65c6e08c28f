//! Form state: control values and inline errors
//!
//! Controls are named by field path (`address.zip`,
//! `workExperience[0].employer`). Setting a control builds the nested
//! candidate value the schema registry checks on submit.

use serde::Serialize;
use serde_json::{Map, Value};
use staffdesk_schema::{FieldPath, PathError, PathSegment, ValidationReport};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Validation messages keyed by control name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Map every issue of a report to its control
    #[must_use]
    pub fn from_report(report: &ValidationReport) -> Self {
        let mut errors = BTreeMap::<String, Vec<String>>::new();
        for issue in &report.issues {
            errors
                .entry(issue.path.to_string())
                .or_default()
                .push(issue.message.clone());
        }
        Self(errors)
    }

    /// Messages for one control
    #[must_use]
    pub fn get(&self, control: &str) -> &[String] {
        self.0.get(control).map(Vec::as_slice).unwrap_or_default()
    }

    /// Controls with at least one message
    pub fn controls(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of controls with messages
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no control has a message
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Values entered so far plus the errors of the last submit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    values: Value,
    errors: FieldErrors,
}

impl FormState {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Value::Object(Map::new()),
            errors: FieldErrors::default(),
        }
    }

    /// Form prefilled with an existing value
    #[must_use]
    pub fn from_value(values: Value) -> Self {
        Self {
            values,
            errors: FieldErrors::default(),
        }
    }

    /// Set one control, creating intermediate objects and list slots
    ///
    /// A list index may name an existing item or the next free slot; the form
    /// is left unchanged otherwise.
    ///
    /// # Errors
    /// Returns error if `control` is not a valid field path, or an index
    /// skips past the end of its list
    pub fn set(&mut self, control: &str, value: impl Into<Value>) -> Result<(), PathError> {
        let path = FieldPath::from_str(control)?;
        check_indices(&self.values, &path)?;
        let mut slot = &mut self.values;
        for segment in path.segments() {
            slot = child_slot(slot, segment);
        }
        *slot = value.into();
        Ok(())
    }

    /// Value of one control
    #[must_use]
    pub fn get(&self, control: &str) -> Option<&Value> {
        let path = FieldPath::from_str(control).ok()?;
        path.segments()
            .iter()
            .try_fold(&self.values, |value, segment| match segment {
                PathSegment::Key(key) => value.get(key),
                PathSegment::Index(index) => value.get(index),
            })
    }

    /// Candidate assembled from every control
    #[inline]
    #[must_use]
    pub fn candidate(&self) -> &Value {
        &self.values
    }

    /// First message attached to a control
    #[must_use]
    pub fn message(&self, control: &str) -> Option<&str> {
        self.errors.get(control).first().map(String::as_str)
    }

    /// Every message attached to a control
    #[must_use]
    pub fn messages(&self, control: &str) -> &[String] {
        self.errors.get(control)
    }

    /// Errors of the last submit
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Check if any control carries a message
    #[inline]
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Attach the issues of a report to their controls
    pub fn show(&mut self, report: &ValidationReport) {
        self.errors = FieldErrors::from_report(report);
    }

    /// Remove every message
    pub fn clear_errors(&mut self) {
        self.errors = FieldErrors::default();
    }
}

/// Indices may fill an existing slot or append one; containers created along
/// the way start empty
fn check_indices(values: &Value, path: &FieldPath) -> Result<(), PathError> {
    let mut current = Some(values);
    for segment in path.segments() {
        current = match segment {
            PathSegment::Key(key) => current.and_then(|value| value.get(key)),
            PathSegment::Index(index) => {
                let len = current.and_then(Value::as_array).map_or(0, Vec::len);
                if *index > len {
                    return Err(PathError::IndexOutOfRange { index: *index, len });
                }
                current.and_then(|value| value.get(index))
            }
        };
    }
    Ok(())
}

fn child_slot<'v>(slot: &'v mut Value, segment: &PathSegment) -> &'v mut Value {
    match segment {
        PathSegment::Key(key) => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            match slot {
                Value::Object(map) => map.entry(key.clone()).or_insert(Value::Null),
                _ => unreachable!("slot was just made an object"),
            }
        }
        PathSegment::Index(index) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            match slot {
                Value::Array(items) => {
                    if items.len() == *index {
                        items.push(Value::Null);
                    }
                    &mut items[*index]
                }
                _ => unreachable!("slot was just made an array"),
            }
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
