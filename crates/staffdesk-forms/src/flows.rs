//! Ready-made flows for the dashboard's forms

use crate::error::CommitError;
use crate::flow::{FormFlow, StoreTarget};
use staffdesk_model::{Employee, SignIn, W4Form};
use staffdesk_schema::SchemaRegistry;
use staffdesk_store::{MockContext, Snapshot};

/// Employee record editor
#[must_use]
pub fn employee_flow(registry: &SchemaRegistry) -> FormFlow<'_, Employee> {
    FormFlow::for_type(registry)
}

/// Store target that upserts the submitted employee by uid
#[must_use]
pub fn employee_target(context: MockContext) -> StoreTarget<Employee> {
    StoreTarget::new(context, upsert_employee)
}

fn upsert_employee(snapshot: &Snapshot, employee: &Employee) -> Result<Snapshot, CommitError> {
    Ok(snapshot.with_employee(employee.clone()))
}

/// Store target that only updates employees already in the snapshot
#[must_use]
pub fn existing_employee_target(context: MockContext) -> StoreTarget<Employee> {
    StoreTarget::new(context, update_employee)
}

fn update_employee(snapshot: &Snapshot, employee: &Employee) -> Result<Snapshot, CommitError> {
    if snapshot.find_employee(&employee.uid).is_none() {
        return Err(CommitError::Rejected(format!("no employee '{}' to update", employee.uid)));
    }
    Ok(snapshot.with_employee(employee.clone()))
}

/// Sign-in form; the credentials go to an external authenticator
#[must_use]
pub fn sign_in_flow(registry: &SchemaRegistry) -> FormFlow<'_, SignIn> {
    FormFlow::for_type(registry)
}

/// W4 withholding form; the document goes to an external collaborator
#[must_use]
pub fn w4_flow(registry: &SchemaRegistry) -> FormFlow<'_, W4Form> {
    FormFlow::for_type(registry)
}
