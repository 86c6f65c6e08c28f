//! staffdesk mock store
//!
//! Holds the current [`Snapshot`] of the organizational dataset and broadcasts
//! its replacement.
//!
//! # Core Concepts
//!
//! - [`Snapshot`]: Entities, brands, grouped locations and employees
//! - [`MockStore`]: `get` / `replace` / `subscribe`, last write wins
//! - [`MockProvider`] / [`MockContext`]: Store lifetime and consumer access
//! - [`ConsistencyReport`]: Advisory audit of id links
//!
//! There is no partial update. Build the next snapshot from the current one
//! and replace the whole value.
//!
//! # Example
//!
//! ```rust
//! use staffdesk_model::Status;
//! use staffdesk_store::MockProvider;
//!
//! let provider = MockProvider::seeded();
//! let context = provider.context();
//!
//! let next = context.get()?.with_employee_status("u-1001", Status::OnHold)?;
//! context.replace(next)?;
//! assert_eq!(context.get()?.find_employee("u-1001").unwrap().status, Status::OnHold);
//! # Ok::<(), staffdesk_store::StoreError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod audit;
mod error;
mod provider;
pub mod seed;
mod snapshot;
mod store;

// Re-exports
pub use audit::{ConsistencyReport, Finding, RecordKind};
pub use error::StoreError;
pub use provider::{MockContext, MockProvider};
pub use snapshot::{LocationGroup, LocationGroups, Snapshot};
pub use store::{MockStore, Subscription};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
