//! Schema-driven mock data
//!
//! [`MockGenerator`] produces random candidates that pass a registered
//! schema's field rules. Object refinements are not taken into account.

use crate::error::UnknownSchema;
use crate::path::FieldPath;
use crate::registry::SchemaRegistry;
use crate::schema::{ObjectSchema, Presence, Schema, StringFormat, StringRule};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};

const WORDS: &[&str] = &[
    "kopan", "harbor", "maple", "cedar", "summit", "river", "grove", "market", "union", "vista",
    "pacific", "lantern", "copper", "garden", "atlas",
];

/// Seconds from the epoch to 2024-01-01T00:00:00Z
const YEAR_START: i64 = 1_704_067_200;
const YEAR_SECONDS: i64 = 366 * 24 * 60 * 60;

/// Errors from mock generation
#[derive(Debug, thiserror::Error)]
pub enum MockError {
    /// Schema or reference not registered
    #[error(transparent)]
    UnknownSchema(#[from] UnknownSchema),

    /// Rule the generator cannot satisfy
    #[error("cannot generate a value for '{path}': {reason}")]
    Unsupported {
        path: FieldPath,
        reason: &'static str,
    },
}

/// Random candidate generator
#[derive(Debug)]
pub struct MockGenerator {
    rng: StdRng,
    nesting: usize,
}

impl MockGenerator {
    /// Containers nested deeper than this are generated empty
    pub const DEFAULT_NESTING: usize = 3;

    /// Hard stop for required recursion that never bottoms out
    const MAX_DEPTH: usize = 64;

    /// Create generator seeded from the OS
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Create reproducible generator
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            nesting: Self::DEFAULT_NESTING,
        }
    }

    /// With nesting limit for optional and repeated content
    #[inline]
    #[must_use]
    pub fn with_nesting(mut self, nesting: usize) -> Self {
        self.nesting = nesting;
        self
    }

    /// Generate a candidate for the schema registered under `name`
    ///
    /// # Errors
    /// Returns error if the schema, or something it references, is unknown,
    /// or uses a custom pattern the generator cannot invert
    pub fn generate(&mut self, registry: &SchemaRegistry, name: &str) -> Result<Value, MockError> {
        let schema = registry
            .get(name)
            .ok_or_else(|| UnknownSchema(name.to_string()))?;
        self.value(registry, schema, &FieldPath::root(), 0)
    }

    fn value(
        &mut self,
        registry: &SchemaRegistry,
        schema: &Schema,
        path: &FieldPath,
        depth: usize,
    ) -> Result<Value, MockError> {
        if depth > Self::MAX_DEPTH {
            return Err(MockError::Unsupported {
                path: path.clone(),
                reason: "required fields recurse without end",
            });
        }

        Ok(match schema {
            Schema::String(rule) => Value::String(self.string(rule, path)?),
            Schema::Number(rule) => {
                let lo = rule.min.unwrap_or(0.0);
                let hi = rule.max.unwrap_or(lo + 5_000.0).max(lo);
                let n: f64 = self.rng.random_range(lo..=hi);
                json!(((n * 100.0).floor() / 100.0).max(lo))
            }
            Schema::Boolean => Value::Bool(self.rng.random_bool(0.5)),
            Schema::Enum(rule) => match rule.members.choose(&mut self.rng) {
                Some(member) => Value::String(member.clone()),
                None => {
                    return Err(MockError::Unsupported {
                        path: path.clone(),
                        reason: "enumeration has no members",
                    })
                }
            },
            Schema::Object(object) => self.object(registry, object, path, depth + 1)?,
            Schema::Array(item) => {
                let count = if depth >= self.nesting {
                    0
                } else {
                    self.rng.random_range(0..=2)
                };
                let mut items = Vec::with_capacity(count);
                for i in 0..count {
                    items.push(self.value(registry, item, &path.index(i), depth + 1)?);
                }
                Value::Array(items)
            }
            Schema::Record(entry) => {
                let count = self.rng.random_range(1..=3);
                let mut map = Map::new();
                for i in 0..count {
                    let key = format!("{}{i}", self.word());
                    let value = self.value(registry, entry, &path.child(&key), depth + 1)?;
                    map.insert(key, value);
                }
                Value::Object(map)
            }
            Schema::Union(alternatives) => match alternatives.choose(&mut self.rng) {
                Some(alternative) => self.value(registry, alternative, path, depth)?,
                None => {
                    return Err(MockError::Unsupported {
                        path: path.clone(),
                        reason: "union has no alternatives",
                    })
                }
            },
            Schema::Ref(name) => {
                let target = registry
                    .get(name)
                    .ok_or_else(|| UnknownSchema(name.clone()))?;
                self.value(registry, target, path, depth)?
            }
            Schema::Any => json!({}),
        })
    }

    fn object(
        &mut self,
        registry: &SchemaRegistry,
        object: &ObjectSchema,
        path: &FieldPath,
        depth: usize,
    ) -> Result<Value, MockError> {
        let mut map = Map::new();
        for field in object.fields() {
            let include = match field.presence {
                Presence::Required => true,
                Presence::Optional | Presence::Defaulted(_) => {
                    depth <= self.nesting && self.rng.random_bool(0.5)
                }
            };
            if include {
                let value = self.value(registry, &field.schema, &path.child(&field.name), depth)?;
                map.insert(field.name.clone(), value);
            }
        }
        Ok(Value::Object(map))
    }

    fn string(&mut self, rule: &StringRule, path: &FieldPath) -> Result<String, MockError> {
        let text = match &rule.format {
            None => {
                let (lo, hi) = Self::length_range(rule, 1);
                let len = self.rng.random_range(lo..=hi);
                self.letters(len)
            }
            Some(StringFormat::Email) => format!("{}.{}@example.com", self.word(), self.word()),
            Some(StringFormat::Datetime) => self.datetime(),
            Some(StringFormat::Uuid) => {
                let mut bytes = [0u8; 16];
                self.rng.fill(&mut bytes);
                uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
            }
            Some(StringFormat::Zip) => {
                let (lo, hi) = Self::length_range(rule, 5);
                let len = self.rng.random_range(lo..=hi);
                self.digits(len)
            }
            Some(StringFormat::Phone) => {
                let (lo, hi) = Self::length_range(rule, 10);
                let len = self.rng.random_range(lo..=hi);
                self.digits(len)
            }
            Some(StringFormat::Ssn) => {
                format!("{}-{}-{}", self.digits(3), self.digits(2), self.digits(4))
            }
            Some(StringFormat::Pattern { .. }) => {
                return Err(MockError::Unsupported {
                    path: path.clone(),
                    reason: "custom patterns cannot be generated",
                })
            }
        };
        Ok(text)
    }

    fn length_range(rule: &StringRule, floor: usize) -> (usize, usize) {
        let max = rule.max.unwrap_or(usize::MAX);
        let lo = rule.min.unwrap_or(floor).max(floor).min(max);
        (lo, max.min(lo + 12))
    }

    fn word(&mut self) -> &'static str {
        WORDS.choose(&mut self.rng).copied().unwrap_or("staff")
    }

    fn letters(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(self.rng.random_range(b'a'..=b'z')))
            .collect()
    }

    fn digits(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(self.rng.random_range(b'0'..=b'9')))
            .collect()
    }

    fn datetime(&mut self) -> String {
        let offset = self.rng.random_range(0..YEAR_SECONDS);
        let at: DateTime<Utc> = DateTime::UNIX_EPOCH + TimeDelta::seconds(YEAR_START + offset);
        at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::names;

    #[test]
    fn same_seed_same_output() {
        let registry = SchemaRegistry::with_defaults();
        let a = MockGenerator::seeded(7).generate(&registry, names::EMPLOYEE).unwrap();
        let b = MockGenerator::seeded(7).generate(&registry, names::EMPLOYEE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generated_address_passes_check() {
        let registry = SchemaRegistry::with_defaults();
        let mut generator = MockGenerator::seeded(42);
        for _ in 0..50 {
            let address = generator.generate(&registry, names::ADDRESS).unwrap();
            assert!(registry.check(names::ADDRESS, &address).is_ok(), "{address}");
        }
    }

    #[test]
    fn custom_pattern_is_unsupported() {
        let mut registry = SchemaRegistry::new(crate::registry::RegistryConfig::default());
        let format = StringFormat::pattern("^[A-Z]{2}$", "state code").unwrap();
        registry.register("state", StringRule::new().format(format));

        let err = MockGenerator::seeded(1).generate(&registry, "state").unwrap_err();
        assert!(matches!(err, MockError::Unsupported { .. }));
    }

    #[test]
    fn endless_required_recursion_is_reported() {
        let mut registry = SchemaRegistry::new(crate::registry::RegistryConfig::default());
        registry.register(
            "loop",
            ObjectSchema::new().field("next", Schema::reference("loop")),
        );

        let err = MockGenerator::seeded(1).generate(&registry, "loop").unwrap_err();
        assert!(err.to_string().contains("recurse"));
    }
}
