//! Testing utilities for staffdesk workspace
//!
//! Shared candidate fixtures, valid unless stated otherwise.

#![allow(missing_docs)]

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::{json, Value};
use staffdesk_model::{ContactRef, Employee, Status};

/// Fixed timestamp used by every fixture
pub const CREATED_AT: &str = "2024-01-15T09:00:00Z";

/// Fixed UUID used by form fixtures
pub const FORM_ID: &str = "7d9f6c3e-3b2a-4f1e-9d8c-0a1b2c3d4e5f";

pub fn created_at() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::seconds(1_705_309_200)
}

pub fn address_json() -> Value {
    json!({
        "street": "4120 Campus Dr",
        "city": "Irvine",
        "state": "CA",
        "zip": "92612"
    })
}

pub fn base_user_json() -> Value {
    json!({
        "id": FORM_ID,
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
        "name": "Ada Park",
        "address": address_json(),
        "email": "ada.park@example.com",
        "phone": "+19495550100"
    })
}

pub fn store_employee_json() -> Value {
    let mut user = base_user_json();
    let fields = json!({
        "position": "server",
        "social": "123-45-6789",
        "gender": "female",
        "maritalStatus": "single"
    });
    merge(&mut user, fields);
    user
}

pub fn store_profile_json() -> Value {
    json!({
        "storeName": "Kopan Irvine",
        "address": address_json(),
        "employees": [store_employee_json()]
    })
}

pub fn w4_form_json() -> Value {
    let mut form = base_user_json();
    let fields = json!({
        "marital": "married",
        "step3a": 2000.0,
        "step3b": 500.0,
        "step3c": 2500.0,
        "step4a": 0.0,
        "step4b": 1200.0,
        "step4c": 50.0,
        "signature": {"svg": "<svg xmlns=\"http://www.w3.org/2000/svg\"/>", "type": "drawn"},
        "entity": store_profile_json()
    });
    merge(&mut form, fields);
    form
}

pub fn employee_json(uid: &str, bid: &str, status: &str) -> Value {
    json!({
        "uid": uid,
        "bid": bid,
        "firstName": "Ada",
        "lastName": "Park",
        "contact": format!("c-{uid}"),
        "position": "server",
        "status": status,
        "documents": [],
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT
    })
}

pub fn employee(uid: &str, bid: &str, status: Status) -> Employee {
    Employee {
        uid: uid.to_string(),
        bid: bid.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Park".to_string(),
        contact: Some(ContactRef::Id(format!("c-{uid}"))),
        position: Some("server".to_string()),
        gender: None,
        marital: None,
        metrics: None,
        status,
        documents: Vec::new(),
        accounts: None,
        created_at: created_at(),
        updated_at: created_at(),
    }
}

pub fn section_json(title: &str, subsections: Option<Vec<Value>>) -> Value {
    let mut section = json!({ "title": title, "content": format!("{title} body") });
    if let Some(children) = subsections {
        section["subsections"] = Value::Array(children);
    }
    section
}

/// Handbook whose first section nests `depth` levels deep
pub fn handbook_json(depth: usize) -> Value {
    let mut section = section_json(&format!("Level {depth}"), None);
    for level in (1..depth).rev() {
        section = section_json(&format!("Level {level}"), Some(vec![section]));
    }
    json!({
        "id": FORM_ID,
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
        "title": "Team Handbook",
        "sections": [section]
    })
}

fn merge(target: &mut Value, fields: Value) {
    if let (Value::Object(target), Value::Object(fields)) = (target, fields) {
        target.extend(fields);
    }
}
