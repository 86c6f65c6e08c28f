//! Declarative rule tree
//!
//! A [`Schema`] describes the constraints a candidate value must satisfy.
//! Object schemas compose by extension ([`ObjectSchema::extending`]) and by
//! embedding another registered schema through [`Schema::Ref`], which is also
//! how self-referential shapes are expressed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static ZIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("zip pattern compiles"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern compiles"));
static SSN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$").expect("ssn pattern compiles"));

/// Kind of a JSON value, used in type mismatch reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Kind of a JSON value
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content constraint on a string
#[derive(Debug, Clone)]
pub enum StringFormat {
    /// `local@domain.tld`
    Email,
    /// RFC 3339 timestamp
    Datetime,
    /// Hyphenated UUID
    Uuid,
    /// ZIP code: digits only
    Zip,
    /// 10 to 15 digits with an optional leading `+`
    Phone,
    /// Social security number `###-##-####`
    Ssn,
    /// Custom pattern with its failure message
    Pattern {
        /// Compiled pattern
        regex: Regex,
        /// Message reported on mismatch
        message: String,
    },
}

impl StringFormat {
    /// Custom pattern
    ///
    /// # Errors
    /// Returns error if the pattern does not compile
    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self::Pattern {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    /// Stable name of the format
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Datetime => "datetime",
            Self::Uuid => "uuid",
            Self::Zip => "zip",
            Self::Phone => "phone",
            Self::Ssn => "ssn",
            Self::Pattern { .. } => "pattern",
        }
    }

    /// Message reported when a value does not match
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Email => "Invalid email",
            Self::Datetime => "Invalid datetime",
            Self::Uuid => "Invalid uuid",
            Self::Zip => "Invalid ZIP code",
            Self::Phone => "Invalid phone number",
            Self::Ssn => "Invalid social security number",
            Self::Pattern { message, .. } => message,
        }
    }

    /// Regular expression backing the format, if it is pattern based
    #[must_use]
    pub fn regex(&self) -> Option<&Regex> {
        match self {
            Self::Email => Some(&*EMAIL),
            Self::Zip => Some(&*ZIP),
            Self::Phone => Some(&*PHONE),
            Self::Ssn => Some(&*SSN),
            Self::Pattern { regex, .. } => Some(regex),
            Self::Datetime | Self::Uuid => None,
        }
    }

    /// Check a string against the format
    #[must_use]
    pub fn matches(&self, s: &str) -> bool {
        match self {
            Self::Datetime => chrono::DateTime::parse_from_rfc3339(s).is_ok(),
            Self::Uuid => uuid::Uuid::parse_str(s).is_ok(),
            other => other.regex().is_some_and(|re| re.is_match(s)),
        }
    }
}

/// String constraints; lengths count characters
#[derive(Debug, Clone, Default)]
pub struct StringRule {
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub format: Option<StringFormat>,
}

impl StringRule {
    /// Unconstrained string
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum length
    #[inline]
    #[must_use]
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Maximum length
    #[inline]
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Length bounds, inclusive
    #[inline]
    #[must_use]
    pub fn bounds(self, min: usize, max: usize) -> Self {
        self.min(min).max(max)
    }

    /// Content format
    #[inline]
    #[must_use]
    pub fn format(mut self, format: StringFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Numeric constraints
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRule {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberRule {
    /// Unconstrained number
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lower bound
    #[inline]
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound
    #[inline]
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// Membership in a closed set of strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumRule {
    /// Enumeration name used in messages
    pub name: String,
    /// Allowed members
    pub members: Vec<String>,
}

impl EnumRule {
    /// Create from a name and its members
    #[must_use]
    pub fn new(name: impl Into<String>, members: &[&str]) -> Self {
        Self {
            name: name.into(),
            members: members.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.members.iter().any(|m| m == value)
    }
}

/// Value filled in when a defaulted field is absent
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Current time as an RFC 3339 string
    Now,
    /// `[]`
    EmptyArray,
    /// Fixed value
    Value(Value),
}

impl DefaultValue {
    /// Materialize the default
    #[must_use]
    pub fn resolve(&self) -> Value {
        match self {
            Self::Now => Value::String(
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            ),
            Self::EmptyArray => Value::Array(Vec::new()),
            Self::Value(value) => value.clone(),
        }
    }
}

/// Presence requirement of an object field
#[derive(Debug, Clone, PartialEq)]
pub enum Presence {
    /// Must be present and non-null
    Required,
    /// May be absent or null
    Optional,
    /// May be absent or null; filled with the default when it is
    Defaulted(DefaultValue),
}

/// One field of an object schema
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    pub presence: Presence,
}

/// Cross-field check run after every field of an object passed
///
/// The check returns a message when the object violates it.
#[derive(Debug, Clone)]
pub struct Refinement {
    /// Rule name reported in issues
    pub name: &'static str,
    /// Field the issue is attached to
    pub field: &'static str,
    /// The check
    pub check: fn(&Map<String, Value>) -> Option<String>,
}

/// Object constraints: named fields plus refinements
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<Field>,
    refinements: Vec<Refinement>,
}

impl ObjectSchema {
    /// Empty object schema
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from every field and refinement of `base`
    #[inline]
    #[must_use]
    pub fn extending(base: &ObjectSchema) -> Self {
        base.clone()
    }

    fn insert(mut self, name: &str, schema: Schema, presence: Presence) -> Self {
        let field = Field {
            name: name.to_string(),
            schema,
            presence,
        };
        // Redefining a field replaces the inherited one in place
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Required field
    #[must_use]
    pub fn field(self, name: &str, schema: impl Into<Schema>) -> Self {
        self.insert(name, schema.into(), Presence::Required)
    }

    /// Optional field
    #[must_use]
    pub fn optional(self, name: &str, schema: impl Into<Schema>) -> Self {
        self.insert(name, schema.into(), Presence::Optional)
    }

    /// Optional field with a default
    #[must_use]
    pub fn defaulted(self, name: &str, schema: impl Into<Schema>, default: DefaultValue) -> Self {
        self.insert(name, schema.into(), Presence::Defaulted(default))
    }

    /// Add a cross-field refinement
    #[must_use]
    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    /// Fields in declaration order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Refinements in declaration order
    #[inline]
    #[must_use]
    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }
}

/// A node of the rule tree
#[derive(Debug, Clone)]
pub enum Schema {
    /// String with length and format constraints
    String(StringRule),
    /// JSON number with bounds
    Number(NumberRule),
    /// `true` / `false`
    Boolean,
    /// Closed set of strings
    Enum(EnumRule),
    /// Object with named fields
    Object(ObjectSchema),
    /// Homogeneous list
    Array(Box<Schema>),
    /// Map from arbitrary keys to values of one schema
    Record(Box<Schema>),
    /// First matching alternative
    Union(Vec<Schema>),
    /// Schema registered under a name; resolved at validation time
    Ref(String),
    /// Anything, unchecked
    Any,
}

impl Schema {
    /// Unconstrained string
    #[inline]
    #[must_use]
    pub fn string() -> Self {
        Self::String(StringRule::new())
    }

    /// Unconstrained number
    #[inline]
    #[must_use]
    pub fn number() -> Self {
        Self::Number(NumberRule::new())
    }

    /// List of `item`
    #[inline]
    #[must_use]
    pub fn array(item: impl Into<Schema>) -> Self {
        Self::Array(Box::new(item.into()))
    }

    /// Map of `value`
    #[inline]
    #[must_use]
    pub fn record(value: impl Into<Schema>) -> Self {
        Self::Record(Box::new(value.into()))
    }

    /// Reference to a registered schema
    #[inline]
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Ref(name.into())
    }

    /// Closed enumeration
    #[inline]
    #[must_use]
    pub fn one_of(name: &str, members: &[&str]) -> Self {
        Self::Enum(EnumRule::new(name, members))
    }

    /// Kind of JSON value this node expects, if it is fixed
    #[must_use]
    pub fn expected_kind(&self) -> Option<ValueKind> {
        match self {
            Self::String(_) | Self::Enum(_) => Some(ValueKind::String),
            Self::Number(_) => Some(ValueKind::Number),
            Self::Boolean => Some(ValueKind::Boolean),
            Self::Object(_) | Self::Record(_) => Some(ValueKind::Object),
            Self::Array(_) => Some(ValueKind::Array),
            Self::Union(_) | Self::Ref(_) | Self::Any => None,
        }
    }

    /// Object schema inside this node, if any
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<StringRule> for Schema {
    fn from(rule: StringRule) -> Self {
        Self::String(rule)
    }
}

impl From<NumberRule> for Schema {
    fn from(rule: NumberRule) -> Self {
        Self::Number(rule)
    }
}

impl From<EnumRule> for Schema {
    fn from(rule: EnumRule) -> Self {
        Self::Enum(rule)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Self::Object(object)
    }
}
