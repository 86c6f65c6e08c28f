//! Submit flow
//!
//! On submit the candidate assembled in a [`FormState`] is checked against
//! the flow's schema. Failures are attached to the form controls and the
//! submission stops there; a valid value is handed to a [`SubmitTarget`].

use crate::error::{CommitError, FormError};
use crate::state::FormState;
use serde::de::DeserializeOwned;
use staffdesk_schema::{SchemaRegistry, Validated};
use staffdesk_store::{MockContext, Snapshot};
use std::marker::PhantomData;

/// Destination of a validated form value
pub trait SubmitTarget<T> {
    /// Take ownership of the submission
    ///
    /// # Errors
    /// Returns error if the destination refuses the value
    fn commit(&self, value: &T) -> Result<(), CommitError>;
}

/// Builds the next snapshot from the current one and a submitted value
pub type ApplyFn<T> = fn(&Snapshot, &T) -> Result<Snapshot, CommitError>;

/// Commits into the mock store by replacing the whole snapshot
#[derive(Debug, Clone)]
pub struct StoreTarget<T> {
    context: MockContext,
    apply: ApplyFn<T>,
}

impl<T> StoreTarget<T> {
    /// Create target writing through `context`
    #[must_use]
    pub fn new(context: MockContext, apply: ApplyFn<T>) -> Self {
        Self { context, apply }
    }
}

impl<T> SubmitTarget<T> for StoreTarget<T> {
    fn commit(&self, value: &T) -> Result<(), CommitError> {
        let current = self.context.get()?;
        let next = (self.apply)(&current, value)?;
        let revision = self.context.replace(next)?;
        tracing::debug!(revision, "form value committed to store");
        Ok(())
    }
}

/// Validate-then-commit flow for one schema
#[derive(Debug)]
pub struct FormFlow<'r, T> {
    registry: &'r SchemaRegistry,
    schema: String,
    _value: PhantomData<fn() -> T>,
}

impl<'r, T: DeserializeOwned> FormFlow<'r, T> {
    /// Create flow checking against the schema named `schema`
    #[must_use]
    pub fn new(registry: &'r SchemaRegistry, schema: impl Into<String>) -> Self {
        Self {
            registry,
            schema: schema.into(),
            _value: PhantomData,
        }
    }

    /// Schema name
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Check the form without committing
    ///
    /// Clears old messages; on failure attaches the new ones.
    ///
    /// # Errors
    /// Returns `Invalid` with the field report, or `Schema` if the schema is
    /// unknown or the value does not narrow into `T`
    pub fn check(&self, state: &mut FormState) -> Result<T, FormError> {
        state.clear_errors();
        match self.registry.validate::<T>(&self.schema, state.candidate()) {
            Ok(value) => Ok(value),
            Err(err) => {
                let err = FormError::from(err);
                if let Some(report) = err.report() {
                    tracing::debug!(
                        schema = %self.schema,
                        invalid_fields = report.paths().len(),
                        "form submission rejected"
                    );
                    state.show(report);
                }
                Err(err)
            }
        }
    }

    /// Check the form and hand the value to `target`
    ///
    /// Nothing reaches `target` unless every field is valid.
    ///
    /// # Errors
    /// As [`FormFlow::check`]; additionally `Commit` if the target refuses
    pub fn submit(
        &self,
        state: &mut FormState,
        target: &impl SubmitTarget<T>,
    ) -> Result<T, FormError> {
        let value = self.check(state)?;
        target.commit(&value)?;
        Ok(value)
    }
}

impl<'r, T: Validated> FormFlow<'r, T> {
    /// Create flow checking against the catalog schema of `T`
    #[must_use]
    pub fn for_type(registry: &'r SchemaRegistry) -> Self {
        Self::new(registry, T::SCHEMA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use staffdesk_model::Address;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Address>>);

    impl SubmitTarget<Address> for Recorder {
        fn commit(&self, value: &Address) -> Result<(), CommitError> {
            self.0.borrow_mut().push(value.clone());
            Ok(())
        }
    }

    #[test]
    fn invalid_form_never_reaches_target() {
        let registry = SchemaRegistry::with_defaults();
        let flow = FormFlow::<Address>::for_type(&registry);
        let recorder = Recorder::default();

        let mut form = FormState::new();
        form.set("street", "1 Main St").unwrap();
        form.set("zip", "9261A").unwrap();

        let err = flow.submit(&mut form, &recorder).unwrap_err();
        assert!(matches!(err, FormError::Invalid(_)));
        assert_eq!(form.message("zip"), Some("Invalid ZIP code"));
        assert_eq!(form.message("city"), Some("Required"));
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn valid_form_is_committed_and_errors_cleared() {
        let registry = SchemaRegistry::with_defaults();
        let flow = FormFlow::<Address>::for_type(&registry);
        let recorder = Recorder::default();

        let mut form = FormState::new();
        form.set("zip", "x").unwrap();
        assert!(flow.check(&mut form).is_err());
        assert!(form.has_errors());

        let mut form = FormState::from_value(json!({
            "street": "1 Main St", "city": "Irvine", "state": "CA", "zip": "92618"
        }));
        let address = flow.submit(&mut form, &recorder).unwrap();
        assert_eq!(address.city, "Irvine");
        assert!(!form.has_errors());
        assert_eq!(recorder.0.borrow().len(), 1);
    }

    #[test]
    fn unknown_schema_is_not_a_field_error() {
        let registry = SchemaRegistry::with_defaults();
        let flow = FormFlow::<Address>::new(&registry, "not-registered");
        let mut form = FormState::new();

        let err = flow.check(&mut form).unwrap_err();
        assert!(matches!(err, FormError::Schema(_)));
        assert!(!form.has_errors());
    }
}
