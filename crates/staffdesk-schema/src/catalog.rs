//! Built-in schema catalog
//!
//! Every record and form shape of the data model, registered under the names
//! in [`names`]. Shapes that embed or extend one another do so through
//! [`Schema::Ref`] and [`ObjectSchema::extending`], so a constraint is stated
//! once and inherited everywhere.

use crate::registry::{SchemaRegistry, Validated};
use crate::schema::{
    DefaultValue, NumberRule, ObjectSchema, Refinement, Schema, StringFormat, StringRule,
};
use serde_json::{Map, Value};
use staffdesk_model::{
    Address, ApplicationForm, BaseModel, BaseUser, Brand, Contact, Documents, DriversLicense,
    ESig, Employee, Entity, Handbook, HandbookSection, JobItem, JobPosition, LegalItems, Location,
    MaritalStatus, Metrics, Pii, Schedule, ScheduleType, SignIn, Signature, Status, StoreEmployee,
    StoreProfile, W4Form, W4Record,
};

/// Registered schema names
pub mod names {
    pub const STATUS: &str = "status";
    pub const MARITAL_STATUS: &str = "marital_status";
    pub const SCHEDULE_TYPE: &str = "schedule_type";
    pub const JOB_POSITION: &str = "job_position";

    pub const ADDRESS: &str = "address";
    pub const CONTACT: &str = "contact";
    pub const ENTITY: &str = "entity";
    pub const BRAND: &str = "brand";
    pub const LOCATION: &str = "location";
    pub const EMPLOYEE: &str = "employee";
    pub const DOCUMENTS: &str = "documents";
    pub const PII: &str = "pii";
    pub const DRIVERS_LICENSE: &str = "drivers_license";
    pub const ESIG: &str = "esig";
    pub const W4: &str = "w4";
    pub const METRICS: &str = "metrics";

    pub const BASE_MODEL: &str = "base_model";
    pub const BASE_USER: &str = "base_user";
    pub const SIGNATURE: &str = "signature";
    pub const SCHEDULE: &str = "schedule";
    pub const JOB_ITEM: &str = "job_item";
    pub const LEGAL_ITEMS: &str = "legal_items";
    pub const STORE_EMPLOYEE: &str = "store_employee";
    pub const STORE_PROFILE: &str = "store_profile";
    pub const HANDBOOK_SECTION: &str = "handbook_section";
    pub const HANDBOOK: &str = "handbook";
    pub const W4_FORM: &str = "w4_form";
    pub const APPLICATION_FORM: &str = "application_form";
    pub const SIGN_IN: &str = "sign_in";
}

/// Register every built-in schema
pub(crate) fn register_all(registry: &mut SchemaRegistry) {
    let strict_w4_totals = registry.config().strict_w4_totals;

    registry.register(names::STATUS, Schema::one_of("status", Status::NAMES));
    registry.register(
        names::MARITAL_STATUS,
        Schema::one_of("marital status", MaritalStatus::NAMES),
    );
    registry.register(
        names::SCHEDULE_TYPE,
        Schema::one_of("schedule type", ScheduleType::NAMES),
    );
    registry.register(
        names::JOB_POSITION,
        Schema::one_of("job position", JobPosition::NAMES),
    );

    registry.register(names::ADDRESS, address());
    registry.register(names::CONTACT, contact());
    registry.register(names::ENTITY, entity());
    registry.register(names::BRAND, brand());
    registry.register(names::LOCATION, location());
    registry.register(names::EMPLOYEE, employee());
    registry.register(names::DOCUMENTS, documents());
    registry.register(names::PII, pii());
    registry.register(names::DRIVERS_LICENSE, drivers_license());
    registry.register(names::ESIG, esig());
    registry.register(names::W4, w4_record());
    registry.register(names::METRICS, metrics());

    registry.register(names::BASE_MODEL, base_model());
    registry.register(names::BASE_USER, base_user());
    registry.register(names::SIGNATURE, signature());
    registry.register(names::SCHEDULE, schedule());
    registry.register(names::JOB_ITEM, job_item());
    registry.register(names::LEGAL_ITEMS, legal_items());
    registry.register(names::STORE_EMPLOYEE, store_employee());
    registry.register(names::STORE_PROFILE, store_profile());
    registry.register(names::HANDBOOK_SECTION, handbook_section());
    registry.register(names::HANDBOOK, handbook());
    registry.register(names::W4_FORM, w4_form(strict_w4_totals));
    registry.register(names::APPLICATION_FORM, application_form());
    registry.register(names::SIGN_IN, sign_in());
}

fn bounded(min: usize, max: usize) -> StringRule {
    StringRule::new().bounds(min, max)
}

fn datetime() -> StringRule {
    StringRule::new().format(StringFormat::Datetime)
}

fn non_negative() -> NumberRule {
    NumberRule::new().min(0.0)
}

fn id_list() -> Schema {
    Schema::array(Schema::string())
}

/// Contact id or inline contact
fn contact_ref() -> Schema {
    Schema::Union(vec![Schema::string(), Schema::reference(names::CONTACT)])
}

/// Fields shared by every stored record: status plus audit timestamps
fn tracked(object: ObjectSchema) -> ObjectSchema {
    tracked_as(object, "modifiedAt")
}

/// Employee and document records name their last-change timestamp `updatedAt`
fn tracked_as(object: ObjectSchema, changed_at: &str) -> ObjectSchema {
    object
        .field("status", Schema::reference(names::STATUS))
        .field("createdAt", datetime())
        .defaulted(changed_at, datetime(), DefaultValue::Now)
}

fn address() -> ObjectSchema {
    ObjectSchema::new()
        .field("street", bounded(1, 50))
        .field("city", bounded(1, 50))
        .field("state", bounded(2, 50))
        .field("zip", bounded(5, 10).format(StringFormat::Zip))
        .optional("country", bounded(2, 50))
}

fn contact() -> ObjectSchema {
    tracked(
        ObjectSchema::new()
            .field("cid", Schema::string())
            .optional("street", Schema::string())
            .optional("street2", Schema::string())
            .optional("city", Schema::string())
            .optional("state", Schema::string())
            .optional("zip", Schema::string())
            .optional("phoneNumber", Schema::string())
            .optional("email", Schema::string()),
    )
}

fn entity() -> ObjectSchema {
    ObjectSchema::new()
        .field("eid", Schema::string())
        .field("name", Schema::string())
        .optional("url", Schema::string())
        .optional("contact", contact_ref())
        .defaulted("employees", id_list(), DefaultValue::EmptyArray)
        .defaulted("brands", id_list(), DefaultValue::EmptyArray)
        .optional("remarks", Schema::string())
        .field("createdAt", datetime())
        .defaulted("modifiedAt", datetime(), DefaultValue::Now)
}

fn brand() -> ObjectSchema {
    tracked(
        ObjectSchema::new()
            .field("bid", Schema::string())
            .field("eid", Schema::string())
            .field("name", Schema::string())
            .optional("url", Schema::string())
            .optional("contact", contact_ref())
            .defaulted("employees", id_list(), DefaultValue::EmptyArray)
            .optional("remarks", Schema::string()),
    )
}

fn location() -> ObjectSchema {
    ObjectSchema::new()
        .field("lid", Schema::string())
        .field("bid", Schema::string())
        .field("name", Schema::string())
        .optional("address", Schema::string())
        .optional("city", Schema::string())
        .optional("state", Schema::string())
        .optional("zip", Schema::string())
        .field("contact", Schema::string())
        .defaulted("employees", id_list(), DefaultValue::EmptyArray)
        .field("createdAt", datetime())
        .defaulted("modifiedAt", datetime(), DefaultValue::Now)
}

fn employee() -> ObjectSchema {
    tracked_as(
        ObjectSchema::new()
            .field("uid", Schema::string())
            .field("bid", Schema::string())
            .field("firstName", Schema::string())
            .field("lastName", Schema::string())
            .optional("contact", contact_ref())
            .optional("position", Schema::string())
            .optional("gender", Schema::string())
            .optional("marital", Schema::string())
            .optional("metrics", Schema::string())
            .defaulted("documents", id_list(), DefaultValue::EmptyArray)
            .optional("accounts", id_list()),
        "updatedAt",
    )
}

fn documents() -> ObjectSchema {
    tracked_as(
        ObjectSchema::new()
            .field("did", Schema::string())
            .optional("pii", Schema::string())
            .optional("dlid", Schema::string())
            .optional("w4id", Schema::string())
            .optional("esid", Schema::string()),
        "updatedAt",
    )
}

fn pii() -> ObjectSchema {
    tracked(
        ObjectSchema::new()
            .field("piid", Schema::string())
            .optional("ssn", Schema::string())
            .optional("dob", Schema::string()),
    )
}

fn drivers_license() -> ObjectSchema {
    tracked(
        ObjectSchema::new()
            .field("dlid", Schema::string())
            .optional("image", Schema::string())
            .optional("url", Schema::string()),
    )
}

fn esig() -> ObjectSchema {
    tracked(
        ObjectSchema::new()
            .field("esid", Schema::string())
            .optional("primary", Schema::string())
            .optional("secondary", Schema::string())
            .optional("url", Schema::string()),
    )
}

fn w4_record() -> ObjectSchema {
    tracked(
        ObjectSchema::new()
            .field("w4id", Schema::string())
            .optional("json", Schema::Any)
            .optional("url", Schema::string()),
    )
}

fn metrics() -> ObjectSchema {
    ObjectSchema::new()
        .field("mid", Schema::string())
        .optional("values", Schema::string())
}

fn base_model() -> ObjectSchema {
    ObjectSchema::new()
        .field("id", StringRule::new().format(StringFormat::Uuid))
        .field("createdAt", datetime())
        .field("updatedAt", datetime())
}

fn base_user() -> ObjectSchema {
    ObjectSchema::extending(&base_model())
        .field("name", bounded(1, 100))
        .field("address", Schema::reference(names::ADDRESS))
        .field("email", StringRule::new().max(100).format(StringFormat::Email))
        .field("phone", bounded(10, 15).format(StringFormat::Phone))
}

fn signature() -> ObjectSchema {
    ObjectSchema::new()
        .field("svg", StringRule::new().min(1))
        .optional("type", StringRule::new().min(1))
}

fn schedule() -> ObjectSchema {
    let day = ObjectSchema::new()
        .field("type", Schema::reference(names::SCHEDULE_TYPE))
        .optional("remarks", StringRule::new().max(200));
    ObjectSchema::new().field("days", Schema::record(day))
}

fn job_item() -> ObjectSchema {
    ObjectSchema::new()
        .field("employer", bounded(1, 50))
        .field("position", bounded(1, 50))
        .field("address", Schema::reference(names::ADDRESS))
        .field("remarks", StringRule::new().max(50))
        .field("startDate", StringRule::new().max(50))
        .field("endDate", StringRule::new().max(50))
}

fn legal_items() -> ObjectSchema {
    ObjectSchema::new()
        .field("field1", Schema::Boolean)
        .optional("explanation1", StringRule::new().max(100))
        .field("field2", Schema::Boolean)
        .optional("explanation2", StringRule::new().max(100))
        .field("field3", Schema::Boolean)
        .optional("explanation3", StringRule::new().max(100))
}

fn store_employee() -> ObjectSchema {
    ObjectSchema::extending(&base_user())
        .field("position", bounded(1, 50))
        .field("social", bounded(9, 11).format(StringFormat::Ssn))
        .field("gender", StringRule::new().max(10))
        .field("maritalStatus", Schema::reference(names::MARITAL_STATUS))
}

fn store_profile() -> ObjectSchema {
    ObjectSchema::new()
        .field("storeName", bounded(1, 100))
        .field("address", Schema::reference(names::ADDRESS))
        .field("employees", Schema::array(Schema::reference(names::STORE_EMPLOYEE)))
}

fn handbook_section() -> ObjectSchema {
    ObjectSchema::new()
        .field("title", StringRule::new().max(50))
        .field("content", Schema::string())
        .optional(
            "subsections",
            Schema::array(Schema::reference(names::HANDBOOK_SECTION)),
        )
}

fn handbook() -> ObjectSchema {
    ObjectSchema::extending(&base_model())
        .field("title", bounded(1, 100))
        .field(
            "sections",
            Schema::array(Schema::reference(names::HANDBOOK_SECTION)),
        )
}

fn w4_form(strict_totals: bool) -> ObjectSchema {
    let form = ObjectSchema::extending(&base_user())
        .field("marital", Schema::reference(names::MARITAL_STATUS))
        .field("step3a", non_negative())
        .field("step3b", non_negative())
        .field("step3c", non_negative())
        .field("step4a", non_negative())
        .field("step4b", non_negative())
        .field("step4c", non_negative())
        .field("signature", Schema::reference(names::SIGNATURE))
        .field("entity", Schema::reference(names::STORE_PROFILE));

    if strict_totals {
        form.refine(Refinement {
            name: "step3_total",
            field: "step3c",
            check: step3_total,
        })
    } else {
        form
    }
}

fn step3_total(form: &Map<String, Value>) -> Option<String> {
    let amount = |key: &str| form.get(key).and_then(Value::as_f64).unwrap_or(0.0);
    let expected = amount("step3a") + amount("step3b");
    if (expected - amount("step3c")).abs() < 0.005 {
        None
    } else {
        Some(format!("Step 3 total must equal 3a + 3b ({expected:.2})"))
    }
}

fn application_form() -> ObjectSchema {
    ObjectSchema::extending(&base_model())
        .field("fullName", bounded(1, 100))
        .field("position", Schema::reference(names::JOB_POSITION))
        .field("address", Schema::reference(names::ADDRESS))
        .field("startDate", StringRule::new().max(50))
        .field("salaryDesired", StringRule::new().max(50))
        .field("contactInfo", bounded(1, 100))
        .field("legalStatus", Schema::Boolean)
        .field("dob", StringRule::new().max(50))
        .field("schedule", Schema::reference(names::SCHEDULE))
        .field("workExperience", Schema::array(Schema::reference(names::JOB_ITEM)))
        .field("other", Schema::reference(names::LEGAL_ITEMS))
        .field("signature", Schema::reference(names::SIGNATURE))
}

fn sign_in() -> ObjectSchema {
    ObjectSchema::new()
        .field("email", StringRule::new().format(StringFormat::Email))
        .field("password", StringRule::new().min(1))
}

macro_rules! validated {
    ($($ty:ty => $name:expr),+ $(,)?) => {
        $(
            impl Validated for $ty {
                const SCHEMA: &'static str = $name;
            }
        )+
    };
}

validated! {
    Status => names::STATUS,
    MaritalStatus => names::MARITAL_STATUS,
    ScheduleType => names::SCHEDULE_TYPE,
    JobPosition => names::JOB_POSITION,
    Address => names::ADDRESS,
    Contact => names::CONTACT,
    Entity => names::ENTITY,
    Brand => names::BRAND,
    Location => names::LOCATION,
    Employee => names::EMPLOYEE,
    Documents => names::DOCUMENTS,
    Pii => names::PII,
    DriversLicense => names::DRIVERS_LICENSE,
    ESig => names::ESIG,
    W4Record => names::W4,
    Metrics => names::METRICS,
    BaseModel => names::BASE_MODEL,
    BaseUser => names::BASE_USER,
    Signature => names::SIGNATURE,
    Schedule => names::SCHEDULE,
    JobItem => names::JOB_ITEM,
    LegalItems => names::LEGAL_ITEMS,
    StoreEmployee => names::STORE_EMPLOYEE,
    StoreProfile => names::STORE_PROFILE,
    HandbookSection => names::HANDBOOK_SECTION,
    Handbook => names::HANDBOOK,
    W4Form => names::W4_FORM,
    ApplicationForm => names::APPLICATION_FORM,
    SignIn => names::SIGN_IN,
}
