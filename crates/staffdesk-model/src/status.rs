//! Closed enumerations shared by records and forms
//!
//! Every enumeration exposes its wire names through a `NAMES` table so the
//! schema catalog can build membership rules from the same source.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Error returned when a wire name is not a member of an enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// Enumeration name
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
}

impl Display for UnknownVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.value, self.kind)
    }
}

impl std::error::Error for UnknownVariant {}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, $rename:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
        #[serde(rename_all = $rename)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Wire names of every member, in declaration order
            pub const NAMES: &'static [&'static str] = &[$($wire),+];

            /// Wire name of this member
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    _ => Err(UnknownVariant { kind: $kind, value: s.to_string() }),
                }
            }
        }
    };
}

wire_enum! {
    /// Lifecycle status carried by every record
    Status, "status", "SCREAMING_SNAKE_CASE" {
        /// In service
        Active => "ACTIVE",
        /// Not in service
        Inactive => "INACTIVE",
        /// Awaiting action
        Pending => "PENDING",
        /// Accepted by a reviewer
        Approved => "APPROVED",
        /// Declined by a reviewer
        Rejected => "REJECTED",
        /// Being reviewed
        UnderReview => "UNDER_REVIEW",
        /// Marked for follow-up
        Flagged => "FLAGGED",
        /// Requires attention from an administrator
        NeedsAttention => "NEEDS_ATTENTION",
        /// Done
        Completed => "COMPLETED",
        /// Paused
        OnHold => "ON_HOLD",
    }
}

wire_enum! {
    /// Marital status used by tax and employee forms
    MaritalStatus, "marital status", "lowercase" {
        /// Single filer
        Single => "single",
        /// Married filer
        Married => "married",
    }
}

wire_enum! {
    /// Shift type in an availability schedule
    ScheduleType, "schedule type", "lowercase" {
        /// Lunch shift
        Lunch => "lunch",
        /// Dinner shift
        Dinner => "dinner",
    }
}

wire_enum! {
    /// Positions offered on job applications
    JobPosition, "job position", "lowercase" {
        /// Store manager
        Manager => "manager",
        /// Floor server
        Server => "server",
        /// Kitchen chef
        Chef => "chef",
        /// Back-of-line cook
        Backline => "backline",
        /// Front of house
        Foh => "foh",
    }
}
