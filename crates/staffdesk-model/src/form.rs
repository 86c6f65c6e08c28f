//! Business-form shapes (W4, job application, handbook, sign-in)

use crate::record::Address;
use crate::status::{MaritalStatus, ScheduleType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity and audit timestamps shared by form documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseModel {
    /// UUID
    pub id: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// A person filling out a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseUser {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    pub address: Address,
    pub email: String,
    pub phone: String,
}

/// Captured signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub svg: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// One day of an availability schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    #[serde(rename = "type")]
    pub kind: ScheduleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Availability schedule keyed by day name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub days: BTreeMap<String, ScheduleDay>,
}

/// Previous employment entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobItem {
    pub employer: String,
    pub position: String,
    pub address: Address,
    /// Reason for leaving
    pub remarks: String,
    pub start_date: String,
    pub end_date: String,
}

/// Yes/no legal questions with optional explanations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegalItems {
    pub field1: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation1: Option<String>,
    pub field2: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation2: Option<String>,
    pub field3: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation3: Option<String>,
}

/// Employee as listed on a store profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreEmployee {
    #[serde(flatten)]
    pub user: BaseUser,
    pub position: String,
    /// SSN formatted `###-##-####`
    pub social: String,
    pub gender: String,
    pub marital_status: MaritalStatus,
}

/// Store profile embedded in tax forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreProfile {
    pub store_name: String,
    pub address: Address,
    pub employees: Vec<StoreEmployee>,
}

/// Handbook section; sections nest arbitrarily
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandbookSection {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsections: Option<Vec<HandbookSection>>,
}

impl HandbookSection {
    /// Depth of the deepest branch, counting this section as 1
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .subsections
            .iter()
            .flatten()
            .map(HandbookSection::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Employee handbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Handbook {
    #[serde(flatten)]
    pub base: BaseModel,
    pub title: String,
    pub sections: Vec<HandbookSection>,
}

/// Employee's withholding certificate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct W4Form {
    #[serde(flatten)]
    pub user: BaseUser,
    pub marital: MaritalStatus,
    pub step3a: f64,
    pub step3b: f64,
    /// Nominally `step3a + step3b`
    pub step3c: f64,
    pub step4a: f64,
    pub step4b: f64,
    pub step4c: f64,
    pub signature: Signature,
    pub entity: StoreProfile,
}

impl W4Form {
    /// Whether `step3c` equals `step3a + step3b` within a cent
    #[must_use]
    pub fn step3_total_matches(&self) -> bool {
        (self.step3a + self.step3b - self.step3c).abs() < 0.005
    }
}

/// Job application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    #[serde(flatten)]
    pub base: BaseModel,
    pub full_name: String,
    pub position: String,
    pub address: Address,
    pub start_date: String,
    pub salary_desired: String,
    pub contact_info: String,
    pub legal_status: bool,
    pub dob: String,
    pub schedule: Schedule,
    pub work_experience: Vec<JobItem>,
    pub other: LegalItems,
    pub signature: Signature,
}

/// Sign-in credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}
