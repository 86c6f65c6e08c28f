//! staffdesk form validation flow
//!
//! Bridges user-entered form data and the data layer: a [`FormState`] is
//! assembled control by control, a [`FormFlow`] checks it against a schema
//! on submit, attaches field-level messages on failure, and hands the
//! validated value to a [`SubmitTarget`] on success.
//!
//! # Example
//!
//! ```rust
//! use staffdesk_forms::{employee_flow, employee_target, FormState};
//! use staffdesk_schema::SchemaRegistry;
//! use staffdesk_store::MockProvider;
//!
//! let registry = SchemaRegistry::with_defaults();
//! let provider = MockProvider::seeded();
//!
//! let current = provider.context().get().unwrap();
//! let employee = current.find_employee("u-1002").unwrap();
//! let mut form = FormState::from_value(serde_json::to_value(employee).unwrap());
//! form.set("status", "ON_HOLD").unwrap();
//!
//! let target = employee_target(provider.context());
//! employee_flow(&registry).submit(&mut form, &target).unwrap();
//! assert_eq!(provider.store().revision(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod flow;
mod flows;
mod state;

// Re-exports
pub use error::{CommitError, FormError};
pub use flow::{ApplyFn, FormFlow, StoreTarget, SubmitTarget};
pub use flows::{
    employee_flow, employee_target, existing_employee_target, sign_in_flow, w4_flow,
};
pub use state::{FieldErrors, FormState};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
