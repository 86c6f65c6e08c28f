//! staffdesk schema registry
//!
//! Declarative field constraints for every record and form shape, and the
//! engine that applies them to untyped candidates.
//!
//! # Core Concepts
//!
//! - [`Schema`]: Rule tree node (string, number, enum, object, array, record,
//!   union, named reference)
//! - [`ObjectSchema`]: Named fields with presence rules; composes by extension
//! - [`SchemaRegistry`]: Named schemas plus [`RegistryConfig`]
//! - [`ValidationReport`]: Every failed field with its [`Rule`] and message
//! - [`export::json_schema`]: Draft-07 rendering of a registered schema
//! - [`MockGenerator`]: Random candidates that pass a schema
//!
//! Validation is a pure function of the candidate. A wrong primitive type is
//! reported as an issue at its path, never a panic.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use staffdesk_model::Address;
//! use staffdesk_schema::SchemaRegistry;
//!
//! let registry = SchemaRegistry::with_defaults();
//!
//! let address: Address = registry
//!     .parse(&json!({"street": "1 Main St", "city": "Irvine", "state": "CA", "zip": "92618"}))
//!     .unwrap();
//! assert_eq!(address.zip, "92618");
//!
//! let candidate = json!({"street": "1 Main St", "city": "Irvine", "state": "CA", "zip": "9261A"});
//! let err = registry.parse::<Address>(&candidate).unwrap_err();
//! assert!(err.report().unwrap().has_issue_at("zip"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalog;
mod error;
pub mod export;
pub mod mock;
mod path;
mod registry;
mod schema;
mod validate;

// Re-exports
pub use catalog::names;
pub use error::{FieldIssue, Rule, UnknownSchema, ValidationError, ValidationReport};
pub use mock::{MockError, MockGenerator};
pub use path::{FieldPath, PathError, PathSegment};
pub use registry::{RegistryConfig, SchemaRegistry, Validated};
pub use schema::{
    DefaultValue, EnumRule, Field, NumberRule, ObjectSchema, Presence, Refinement, Schema,
    StringFormat, StringRule, ValueKind,
};
pub use validate::SchemaLookup;

/// Prelude for common imports
pub mod prelude {
    pub use crate::catalog::names;
    pub use crate::error::{FieldIssue, ValidationError, ValidationReport};
    pub use crate::path::FieldPath;
    pub use crate::registry::{RegistryConfig, SchemaRegistry, Validated};
    pub use crate::schema::{ObjectSchema, Schema, StringRule};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
