//! Record shapes of the organizational dataset
//!
//! Entity → Brand → Location → Employee → Documents → PII / DriversLicense /
//! ESig / W4. Relationships are plain string ids; nothing here checks that a
//! referenced id exists.

use crate::status::Status;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Contact id (`Contact::cid`)
pub type ContactId = String;
/// Entity id (`Entity::eid`)
pub type EntityId = String;
/// Brand id (`Brand::bid`)
pub type BrandId = String;
/// Location id (`Location::lid`)
pub type LocationId = String;
/// Employee id (`Employee::uid`)
pub type EmployeeId = String;
/// Documents id (`Documents::did`)
pub type DocumentsId = String;

fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Contact details record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub cid: ContactId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub modified_at: DateTime<Utc>,
}

/// Contact given either by id or inline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ContactRef {
    /// Reference to `Contact::cid`
    Id(ContactId),
    /// Embedded contact record
    Inline(Box<Contact>),
}

impl ContactRef {
    /// Id of the referenced or embedded contact
    #[inline]
    #[must_use]
    pub fn cid(&self) -> &str {
        match self {
            Self::Id(cid) => cid,
            Self::Inline(contact) => &contact.cid,
        }
    }
}

impl From<&str> for ContactRef {
    fn from(cid: &str) -> Self {
        Self::Id(cid.to_string())
    }
}

/// Operating company (a "store" in the dashboard)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub eid: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactRef>,
    #[serde(default)]
    pub employees: Vec<EmployeeId>,
    #[serde(default)]
    pub brands: Vec<BrandId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub modified_at: DateTime<Utc>,
}

/// Brand operated by an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub bid: BrandId,
    pub eid: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactRef>,
    #[serde(default)]
    pub employees: Vec<EmployeeId>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub modified_at: DateTime<Utc>,
}

/// Physical location of a brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lid: LocationId,
    pub bid: BrandId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    pub contact: ContactId,
    #[serde(default)]
    pub employees: Vec<EmployeeId>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub modified_at: DateTime<Utc>,
}

/// Staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub uid: EmployeeId,
    pub bid: BrandId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub documents: Vec<DocumentsId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// "First Last"
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Paperwork bundle of an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Documents {
    pub did: DocumentsId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pii: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dlid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w4id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esid: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub updated_at: DateTime<Utc>,
}

/// Personally identifiable information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pii {
    pub piid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub modified_at: DateTime<Utc>,
}

/// Scanned driver's license
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriversLicense {
    pub dlid: String,
    /// SVG image data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub modified_at: DateTime<Utc>,
}

/// Electronic signature record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ESig {
    pub esid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub modified_at: DateTime<Utc>,
}

/// Stored W4 submission; `json` holds the raw form payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct W4Record {
    pub w4id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default = "now")]
    pub modified_at: DateTime<Utc>,
}

/// Performance metrics blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub mid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn employee_accepts_contact_id_or_inline_contact() {
        let by_id: Employee = serde_json::from_value(json!({
            "uid": "u-1",
            "bid": "b-1",
            "firstName": "Ada",
            "lastName": "Park",
            "contact": "c-1",
            "status": "ACTIVE",
            "createdAt": "2024-01-15T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(by_id.contact.as_ref().map(ContactRef::cid), Some("c-1"));

        let inline: Employee = serde_json::from_value(json!({
            "uid": "u-1",
            "bid": "b-1",
            "firstName": "Ada",
            "lastName": "Park",
            "contact": {
                "cid": "c-9",
                "status": "PENDING",
                "createdAt": "2024-01-15T09:00:00Z"
            },
            "status": "ACTIVE",
            "createdAt": "2024-01-15T09:00:00Z"
        }))
        .unwrap();
        assert!(matches!(inline.contact, Some(ContactRef::Inline(_))));
        assert_eq!(inline.contact.as_ref().map(ContactRef::cid), Some("c-9"));
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let brand: Brand = serde_json::from_value(json!({
            "bid": "b-1",
            "eid": "e-1",
            "name": "Yard House",
            "status": "ACTIVE",
            "createdAt": "2024-01-15T09:00:00Z"
        }))
        .unwrap();
        assert!(brand.employees.is_empty());
        assert!(brand.modified_at >= brand.created_at);
    }

    #[test]
    fn address_serializes_without_absent_country() {
        let address = Address {
            street: "1 Main St".into(),
            city: "Irvine".into(),
            state: "CA".into(),
            zip: "92618".into(),
            country: None,
        };
        let value = serde_json::to_value(&address).unwrap();
        assert_eq!(
            value,
            json!({"street": "1 Main St", "city": "Irvine", "state": "CA", "zip": "92618"})
        );
    }
}
