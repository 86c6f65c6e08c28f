//! Schema registry
//!
//! Provides [`SchemaRegistry`] for looking up named schemas and validating
//! candidates against them.

use crate::catalog;
use crate::error::{UnknownSchema, ValidationError, ValidationReport};
use crate::schema::Schema;
use crate::validate::{SchemaLookup, Validator};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Registry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Deepest container nesting accepted before validation gives up on a branch
    pub max_depth: usize,
    /// Reject W4 forms whose `step3c` differs from `step3a + step3b`
    pub strict_w4_totals: bool,
}

impl RegistryConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With nesting cap
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// With strict W4 step 3 totals
    #[inline]
    #[must_use]
    pub fn with_strict_w4_totals(mut self, strict: bool) -> Self {
        self.strict_w4_totals = strict;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            strict_w4_totals: false,
        }
    }
}

/// Type that has a schema in the built-in catalog
pub trait Validated: DeserializeOwned {
    /// Name the type's schema is registered under
    const SCHEMA: &'static str;
}

/// Named schemas plus the settings used to apply them
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, Schema>,
    config: RegistryConfig,
}

impl SchemaRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            schemas: IndexMap::new(),
            config,
        }
    }

    /// Create registry with the built-in catalog and default settings
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create registry with the built-in catalog
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        let mut registry = Self::new(config);
        catalog::register_all(&mut registry);
        tracing::debug!(
            schemas = registry.len(),
            max_depth = config.max_depth,
            strict_w4_totals = config.strict_w4_totals,
            "schema registry initialized"
        );
        registry
    }

    /// Register a schema, replacing any previous one of the same name
    pub fn register(&mut self, name: impl Into<String>, schema: impl Into<Schema>) {
        self.schemas.insert(name.into(), schema.into());
    }

    /// Get schema by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Check if schema exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Remove schema
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Schema> {
        self.schemas.shift_remove(name)
    }

    /// List all registered names in registration order
    #[inline]
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Get number of registered schemas
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Check `candidate` against the schema named `name`
    ///
    /// # Returns
    /// - `Ok(value)` with defaults filled in and unknown keys dropped
    /// - `Err(ValidationError::Invalid)` listing every failed field
    ///
    /// # Errors
    /// Returns `UnknownSchema` if nothing is registered under `name`
    pub fn check(&self, name: &str, candidate: &Value) -> Result<Value, ValidationError> {
        let schema = self
            .get(name)
            .ok_or_else(|| UnknownSchema(name.to_string()))?;

        let (normalized, issues) =
            Validator::new(self, self.config.max_depth).run(schema, candidate);

        if issues.is_empty() {
            tracing::debug!(schema = name, "candidate accepted");
            Ok(normalized)
        } else {
            tracing::debug!(schema = name, issues = issues.len(), "candidate rejected");
            Err(ValidationReport::new(name, issues).into())
        }
    }

    /// Check `candidate` and narrow it into `T`
    ///
    /// # Errors
    /// As [`SchemaRegistry::check`]; additionally `Narrowing` if the validated
    /// value does not deserialize into `T`
    pub fn validate<T: DeserializeOwned>(
        &self,
        name: &str,
        candidate: &Value,
    ) -> Result<T, ValidationError> {
        let normalized = self.check(name, candidate)?;
        serde_json::from_value(normalized).map_err(|source| ValidationError::Narrowing {
            type_name: std::any::type_name::<T>(),
            source,
        })
    }

    /// Check `candidate` against the catalog schema of `T` and narrow it
    ///
    /// # Errors
    /// As [`SchemaRegistry::validate`]
    pub fn parse<T: Validated>(&self, candidate: &Value) -> Result<T, ValidationError> {
        self.validate(T::SCHEMA, candidate)
    }

    /// Iterate over `(name, schema)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.schemas.iter().map(|(name, schema)| (name.as_str(), schema))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SchemaLookup for SchemaRegistry {
    fn lookup(&self, name: &str) -> Option<&Schema> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ObjectSchema, StringRule};
    use serde_json::json;

    #[test]
    fn registry_operations() {
        let mut registry = SchemaRegistry::new(RegistryConfig::default());
        assert!(registry.is_empty());

        registry.register("tag", StringRule::new().max(8));
        assert!(registry.contains("tag"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names(), vec!["tag"]);

        assert!(registry.remove("tag").is_some());
        assert!(!registry.contains("tag"));
    }

    #[test]
    fn check_unknown_schema() {
        let registry = SchemaRegistry::new(RegistryConfig::default());
        let err = registry.check("missing", &json!({})).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownSchema(_)));
    }

    #[test]
    fn validate_narrows_into_type() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Tag {
            label: String,
        }

        let mut registry = SchemaRegistry::new(RegistryConfig::default());
        registry.register("tag", ObjectSchema::new().field("label", StringRule::new().min(1)));

        let tag: Tag = registry.validate("tag", &json!({"label": "new"})).unwrap();
        assert_eq!(tag, Tag { label: "new".into() });

        let err = registry.validate::<Tag>("tag", &json!({"label": ""})).unwrap_err();
        assert!(err.report().unwrap().has_rule_at("label", "min_length"));
    }

    #[test]
    fn narrowing_failure_is_distinct() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            count: u8,
        }

        let mut registry = SchemaRegistry::new(RegistryConfig::default());
        registry.register("strict", ObjectSchema::new().field("count", Schema::number()));

        let err = registry.validate::<Strict>("strict", &json!({"count": 1000})).unwrap_err();
        assert!(matches!(err, ValidationError::Narrowing { .. }));
    }

    #[test]
    fn config_builder_and_serde_defaults() {
        let config = RegistryConfig::new().with_max_depth(8).with_strict_w4_totals(true);
        assert_eq!(config.max_depth, 8);
        assert!(config.strict_w4_totals);

        let parsed: RegistryConfig = serde_json::from_value(json!({"max_depth": 4})).unwrap();
        assert_eq!(parsed.max_depth, 4);
        assert!(!parsed.strict_w4_totals);
    }
}
