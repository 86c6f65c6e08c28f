//! Error types for the mock store

/// Mock store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Store accessed through a context whose provider is gone, or that was
    /// never attached to one
    #[error("mock store accessed outside of a MockProvider")]
    OutsideProvider,

    /// Store dropped while a subscriber was waiting
    #[error("mock store closed")]
    Closed,

    /// No employee with the given uid
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
}
