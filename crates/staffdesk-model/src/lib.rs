//! staffdesk data model
//!
//! Immutable value shapes for the organizational dataset and the business
//! forms built on top of it.
//!
//! # Overview
//!
//! - **Records**: [`Entity`], [`Brand`], [`Location`], [`Employee`],
//!   [`Documents`] and the paperwork they point at, linked by string ids
//! - **Forms**: [`W4Form`], [`ApplicationForm`], [`Handbook`], [`SignIn`]
//! - **Enumerations**: [`Status`], [`MaritalStatus`], [`ScheduleType`]
//!
//! None of these types validate themselves. Candidates are checked by the
//! schema registry in `staffdesk-schema` and narrowed into these shapes.
//!
//! # Example
//!
//! ```rust
//! use staffdesk_model::{Status, ContactRef};
//!
//! let contact = ContactRef::from("c-100");
//! assert_eq!(contact.cid(), "c-100");
//! assert_eq!(Status::OnHold.as_str(), "ON_HOLD");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod form;
pub mod record;
pub mod status;

// Re-exports
pub use form::{
    ApplicationForm, BaseModel, BaseUser, Handbook, HandbookSection, JobItem, LegalItems, Schedule,
    ScheduleDay, SignIn, Signature, StoreEmployee, StoreProfile, W4Form,
};
pub use record::{
    Address, Brand, BrandId, Contact, ContactId, ContactRef, Documents, DocumentsId,
    DriversLicense, ESig, Employee, EmployeeId, Entity, EntityId, Location, LocationId, Metrics,
    Pii, W4Record,
};
pub use status::{JobPosition, MaritalStatus, ScheduleType, Status, UnknownVariant};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
