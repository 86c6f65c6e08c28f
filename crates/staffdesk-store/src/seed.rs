//! Static seed dataset
//!
//! Two operating entities: Kopan Group runs the Kopan and BCD brands, Harbor
//! Hospitality runs Yard House.

use crate::snapshot::{LocationGroups, Snapshot};
use chrono::{DateTime, TimeDelta, Utc};
use staffdesk_model::{Brand, Contact, ContactRef, Employee, Entity, Location, Status};

/// 2024-01-15T09:00:00Z
const SEEDED_AT: i64 = 1_705_309_200;

fn at(offset_days: i64) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::seconds(SEEDED_AT) + TimeDelta::days(offset_days)
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Snapshot every store starts from
#[must_use]
pub fn initial_snapshot() -> Snapshot {
    Snapshot {
        entities: entities(),
        brands: brands(),
        locations: LocationGroups {
            kopan: kopan_locations(),
            bcd: bcd_locations(),
            yard_house: yard_house_locations(),
        },
        employees: employees(),
    }
}

fn entities() -> Vec<Entity> {
    vec![
        Entity {
            eid: "kopan".into(),
            name: "Kopan Group".into(),
            url: Some("https://kopan.example.com".into()),
            contact: Some(ContactRef::from("c-kopan")),
            employees: ids(&["u-1001", "u-1002"]),
            brands: ids(&["b-kopan", "b-bcd"]),
            remarks: None,
            created_at: at(0),
            modified_at: at(0),
        },
        Entity {
            eid: "harbor".into(),
            name: "Harbor Hospitality".into(),
            url: None,
            contact: Some(ContactRef::Inline(Box::new(Contact {
                cid: "c-harbor".into(),
                street: Some("71 Fortune Dr".into()),
                street2: None,
                city: Some("Irvine".into()),
                state: Some("CA".into()),
                zip: Some("92618".into()),
                phone_number: Some("9495550142".into()),
                email: Some("office@harbor.example.com".into()),
                status: Status::Active,
                created_at: at(0),
                modified_at: at(0),
            }))),
            employees: ids(&["u-2001"]),
            brands: ids(&["b-yard-house"]),
            remarks: Some("Franchise agreement renews in Q3".into()),
            created_at: at(2),
            modified_at: at(2),
        },
    ]
}

fn brands() -> Vec<Brand> {
    vec![
        Brand {
            bid: "b-kopan".into(),
            eid: "kopan".into(),
            name: "Kopan".into(),
            url: Some("https://kopan.example.com/restaurants".into()),
            contact: Some(ContactRef::from("c-kopan")),
            employees: ids(&["u-1001"]),
            status: Status::Active,
            remarks: None,
            created_at: at(0),
            modified_at: at(0),
        },
        Brand {
            bid: "b-bcd".into(),
            eid: "kopan".into(),
            name: "BCD Tofu House".into(),
            url: None,
            contact: Some(ContactRef::from("c-bcd")),
            employees: ids(&["u-1002"]),
            status: Status::Active,
            remarks: None,
            created_at: at(1),
            modified_at: at(1),
        },
        Brand {
            bid: "b-yard-house".into(),
            eid: "harbor".into(),
            name: "Yard House".into(),
            url: None,
            contact: None,
            employees: ids(&["u-2001"]),
            status: Status::Pending,
            remarks: Some("Awaiting signed lease".into()),
            created_at: at(2),
            modified_at: at(3),
        },
    ]
}

fn location(
    lid: &str,
    bid: &str,
    name: &str,
    city: &str,
    zip: &str,
    employees: &[&str],
) -> Location {
    Location {
        lid: lid.into(),
        bid: bid.into(),
        name: name.into(),
        address: None,
        city: Some(city.into()),
        state: Some("CA".into()),
        zip: Some(zip.into()),
        contact: format!("c-{lid}"),
        employees: ids(employees),
        created_at: at(1),
        modified_at: at(1),
    }
}

fn kopan_locations() -> Vec<Location> {
    vec![
        location("l-kopan-irvine", "b-kopan", "Kopan Irvine", "Irvine", "92612", &["u-1001"]),
        location("l-kopan-fullerton", "b-kopan", "Kopan Fullerton", "Fullerton", "92831", &[]),
    ]
}

fn bcd_locations() -> Vec<Location> {
    vec![location(
        "l-bcd-garden-grove",
        "b-bcd",
        "BCD Garden Grove",
        "Garden Grove",
        "92840",
        &["u-1002"],
    )]
}

fn yard_house_locations() -> Vec<Location> {
    vec![location(
        "l-yh-spectrum",
        "b-yard-house",
        "Yard House Irvine Spectrum",
        "Irvine",
        "92618",
        &["u-2001"],
    )]
}

fn employees() -> Vec<Employee> {
    vec![
        Employee {
            uid: "u-1001".into(),
            bid: "b-kopan".into(),
            first_name: "Mina".into(),
            last_name: "Choi".into(),
            contact: Some(ContactRef::from("c-u-1001")),
            position: Some("manager".into()),
            gender: Some("female".into()),
            marital: Some("married".into()),
            metrics: Some("m-1001".into()),
            status: Status::Active,
            documents: ids(&["d-1001"]),
            accounts: Some(ids(&["payroll"])),
            created_at: at(3),
            updated_at: at(3),
        },
        Employee {
            uid: "u-1002".into(),
            bid: "b-bcd".into(),
            first_name: "Daniel".into(),
            last_name: "Reyes".into(),
            contact: Some(ContactRef::from("c-u-1002")),
            position: Some("server".into()),
            gender: Some("male".into()),
            marital: Some("single".into()),
            metrics: None,
            status: Status::Active,
            documents: ids(&["d-1002"]),
            accounts: None,
            created_at: at(4),
            updated_at: at(4),
        },
        Employee {
            uid: "u-2001".into(),
            bid: "b-yard-house".into(),
            first_name: "Priya".into(),
            last_name: "Nair".into(),
            contact: None,
            position: Some("chef".into()),
            gender: None,
            marital: None,
            metrics: None,
            status: Status::UnderReview,
            documents: Vec::new(),
            accounts: None,
            created_at: at(5),
            updated_at: at(6),
        },
    ]
}
