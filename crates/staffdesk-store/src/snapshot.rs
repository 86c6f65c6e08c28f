//! Snapshot of the organizational dataset
//!
//! A [`Snapshot`] is the complete value held by the store at one time. It is
//! never edited in place: the `with_*` helpers return a new full snapshot with
//! one change applied, ready to hand to [`MockStore::replace`].
//!
//! [`MockStore::replace`]: crate::MockStore::replace

use crate::audit::ConsistencyReport;
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use staffdesk_model::{Brand, Employee, Entity, Location, Status};
use std::fmt;

/// Fixed location groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationGroup {
    Kopan,
    Bcd,
    YardHouse,
}

impl LocationGroup {
    /// Every group in display order
    pub const ALL: [LocationGroup; 3] = [Self::Kopan, Self::Bcd, Self::YardHouse];

    /// Wire name of the group
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kopan => "kopan",
            Self::Bcd => "bcd",
            Self::YardHouse => "yardHouse",
        }
    }
}

impl fmt::Display for LocationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locations keyed by group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationGroups {
    #[serde(default)]
    pub kopan: Vec<Location>,
    #[serde(default)]
    pub bcd: Vec<Location>,
    #[serde(default)]
    pub yard_house: Vec<Location>,
}

impl LocationGroups {
    /// Locations of one group
    #[inline]
    #[must_use]
    pub fn get(&self, group: LocationGroup) -> &[Location] {
        match group {
            LocationGroup::Kopan => &self.kopan,
            LocationGroup::Bcd => &self.bcd,
            LocationGroup::YardHouse => &self.yard_house,
        }
    }

    /// Mutable locations of one group
    #[inline]
    pub fn get_mut(&mut self, group: LocationGroup) -> &mut Vec<Location> {
        match group {
            LocationGroup::Kopan => &mut self.kopan,
            LocationGroup::Bcd => &mut self.bcd,
            LocationGroup::YardHouse => &mut self.yard_house,
        }
    }

    /// Every location with its group
    pub fn iter(&self) -> impl Iterator<Item = (LocationGroup, &Location)> {
        LocationGroup::ALL
            .into_iter()
            .flat_map(move |group| self.get(group).iter().map(move |location| (group, location)))
    }

    /// Total number of locations
    #[must_use]
    pub fn len(&self) -> usize {
        self.kopan.len() + self.bcd.len() + self.yard_house.len()
    }

    /// Check if no group has a location
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Complete value of the mock store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub brands: Vec<Brand>,
    #[serde(default)]
    pub locations: LocationGroups,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl Snapshot {
    /// Find entity by eid
    #[must_use]
    pub fn find_entity(&self, eid: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.eid == eid)
    }

    /// Find brand by bid
    #[must_use]
    pub fn find_brand(&self, bid: &str) -> Option<&Brand> {
        self.brands.iter().find(|brand| brand.bid == bid)
    }

    /// Find employee by uid
    #[must_use]
    pub fn find_employee(&self, uid: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.uid == uid)
    }

    /// Brands whose `eid` points at the entity
    pub fn brands_of<'a>(&'a self, eid: &'a str) -> impl Iterator<Item = &'a Brand> + 'a {
        self.brands.iter().filter(move |brand| brand.eid == eid)
    }

    /// Employees whose `bid` points at the brand
    pub fn employees_of_brand<'a>(
        &'a self,
        bid: &'a str,
    ) -> impl Iterator<Item = &'a Employee> + 'a {
        self.employees.iter().filter(move |employee| employee.bid == bid)
    }

    /// Employees listed on the entity; unknown uids are skipped
    pub fn employees_of_entity<'a>(
        &'a self,
        eid: &'a str,
    ) -> impl Iterator<Item = &'a Employee> + 'a {
        self.find_entity(eid)
            .into_iter()
            .flat_map(|entity| entity.employees.iter())
            .filter_map(move |uid| self.find_employee(uid))
    }

    /// Locations of one group
    #[inline]
    #[must_use]
    pub fn locations(&self, group: LocationGroup) -> &[Location] {
        self.locations.get(group)
    }

    /// Every location regardless of group
    pub fn all_locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().map(|(_, location)| location)
    }

    /// New snapshot with the employee of the same uid replaced, or appended
    /// when no such employee exists
    #[must_use]
    pub fn with_employee(&self, employee: Employee) -> Self {
        let mut next = self.clone();
        match next.employees.iter_mut().find(|e| e.uid == employee.uid) {
            Some(existing) => *existing = employee,
            None => next.employees.push(employee),
        }
        next
    }

    /// New snapshot with one employee's status changed and nothing else
    ///
    /// # Errors
    /// Returns `UnknownEmployee` if no employee has the uid
    pub fn with_employee_status(&self, uid: &str, status: Status) -> Result<Self, StoreError> {
        let mut next = self.clone();
        let employee = next
            .employees
            .iter_mut()
            .find(|e| e.uid == uid)
            .ok_or_else(|| StoreError::UnknownEmployee(uid.to_string()))?;
        employee.status = status;
        Ok(next)
    }

    /// Referential consistency findings
    #[must_use]
    pub fn audit(&self) -> ConsistencyReport {
        ConsistencyReport::of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_snapshot;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn location_groups_serialize_with_wire_names() {
        let value = serde_json::to_value(LocationGroups::default()).unwrap();
        assert_eq!(value, json!({"kopan": [], "bcd": [], "yardHouse": []}));
    }

    #[test]
    fn lookups_follow_string_ids() {
        let snapshot = initial_snapshot();
        assert_eq!(snapshot.find_entity("kopan").map(|e| e.name.as_str()), Some("Kopan Group"));
        assert_eq!(snapshot.brands_of("kopan").count(), 2);
        assert_eq!(snapshot.employees_of_entity("kopan").count(), 2);
        assert_eq!(snapshot.employees_of_brand("b-yard-house").count(), 1);
        assert!(snapshot.find_employee("nobody").is_none());
        assert_eq!(snapshot.employees_of_entity("nobody").count(), 0);
    }

    #[test]
    fn locations_by_group() {
        let snapshot = initial_snapshot();
        assert_eq!(snapshot.locations(LocationGroup::Kopan).len(), 2);
        assert_eq!(snapshot.all_locations().count(), snapshot.locations.len());
        assert!(snapshot
            .locations
            .iter()
            .all(|(group, location)| snapshot.locations(group).contains(location)));
    }

    #[test]
    fn with_employee_status_changes_only_status() {
        let snapshot = initial_snapshot();
        let next = snapshot.with_employee_status("u-1001", Status::OnHold).unwrap();

        let before = snapshot.find_employee("u-1001").unwrap();
        let after = next.find_employee("u-1001").unwrap();
        assert_eq!(after.status, Status::OnHold);
        assert_eq!(Employee { status: before.status, ..after.clone() }, *before);
        assert_eq!(next.entities, snapshot.entities);

        assert_eq!(
            snapshot.with_employee_status("u-0", Status::Active),
            Err(StoreError::UnknownEmployee("u-0".into()))
        );
    }

    #[test]
    fn with_employee_appends_new_uid() {
        let snapshot = initial_snapshot();
        let mut hire = snapshot.employees[0].clone();
        hire.uid = "u-9000".into();

        let next = snapshot.with_employee(hire);
        assert_eq!(next.employees.len(), snapshot.employees.len() + 1);
        assert!(next.find_employee("u-9000").is_some());
    }
}
