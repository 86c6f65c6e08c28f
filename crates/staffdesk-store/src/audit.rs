//! Advisory consistency audit
//!
//! Records link to each other through plain string ids. The store never
//! rejects a snapshot over a broken link; [`ConsistencyReport`] lists them so
//! callers and logs can surface the problem.

use crate::snapshot::Snapshot;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Record table a finding refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Entity,
    Brand,
    Location,
    Employee,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entity => "entity",
            Self::Brand => "brand",
            Self::Location => "location",
            Self::Employee => "employee",
        })
    }
}

/// One consistency problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "finding", rename_all = "snake_case")]
pub enum Finding {
    /// Two records of one table share an id
    DuplicateId { kind: RecordKind, id: String },
    /// A record points at an id that does not exist
    DanglingReference {
        kind: RecordKind,
        id: String,
        field: &'static str,
        target: String,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id '{id}'"),
            Self::DanglingReference {
                kind,
                id,
                field,
                target,
            } => write!(f, "{kind} '{id}' {field} references missing '{target}'"),
        }
    }
}

/// Findings of one audit, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub findings: Vec<Finding>,
}

impl ConsistencyReport {
    /// Audit a snapshot
    #[must_use]
    pub fn of(snapshot: &Snapshot) -> Self {
        let mut audit = Auditor::default();

        let eids = audit.unique(
            RecordKind::Entity,
            snapshot.entities.iter().map(|e| e.eid.as_str()),
        );
        let bids = audit.unique(
            RecordKind::Brand,
            snapshot.brands.iter().map(|b| b.bid.as_str()),
        );
        audit.unique(
            RecordKind::Location,
            snapshot.all_locations().map(|l| l.lid.as_str()),
        );
        let uids = audit.unique(
            RecordKind::Employee,
            snapshot.employees.iter().map(|e| e.uid.as_str()),
        );

        for entity in &snapshot.entities {
            audit.refs(RecordKind::Entity, &entity.eid, "brands", &entity.brands, &bids);
            audit.refs(RecordKind::Entity, &entity.eid, "employees", &entity.employees, &uids);
        }
        for brand in &snapshot.brands {
            audit.refs(RecordKind::Brand, &brand.bid, "eid", [&brand.eid], &eids);
            audit.refs(RecordKind::Brand, &brand.bid, "employees", &brand.employees, &uids);
        }
        for location in snapshot.all_locations() {
            audit.refs(RecordKind::Location, &location.lid, "bid", [&location.bid], &bids);
            audit.refs(
                RecordKind::Location,
                &location.lid,
                "employees",
                &location.employees,
                &uids,
            );
        }
        for employee in &snapshot.employees {
            audit.refs(RecordKind::Employee, &employee.uid, "bid", [&employee.bid], &bids);
        }

        Self {
            findings: audit.findings,
        }
    }

    /// Check if nothing was found
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Check if report is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return f.write_str("consistent");
        }
        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{finding}")?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct Auditor {
    findings: Vec<Finding>,
}

impl Auditor {
    fn unique<'a>(
        &mut self,
        kind: RecordKind,
        ids: impl Iterator<Item = &'a str>,
    ) -> HashSet<&'a str> {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                self.findings.push(Finding::DuplicateId {
                    kind,
                    id: id.to_string(),
                });
            }
        }
        seen
    }

    fn refs<'a>(
        &mut self,
        kind: RecordKind,
        id: &str,
        field: &'static str,
        targets: impl IntoIterator<Item = &'a String>,
        known: &HashSet<&str>,
    ) {
        for target in targets {
            if !known.contains(target.as_str()) {
                self.findings.push(Finding::DanglingReference {
                    kind,
                    id: id.to_string(),
                    field,
                    target: target.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::initial_snapshot;

    #[test]
    fn seed_is_consistent() {
        let report = initial_snapshot().audit();
        assert!(report.is_clean(), "{report}");
        assert_eq!(report.to_string(), "consistent");
    }

    #[test]
    fn dangling_and_duplicate_ids_are_reported() {
        let mut snapshot = initial_snapshot();
        snapshot.brands[0].eid = "ghost".into();
        let copy = snapshot.employees[0].clone();
        snapshot.employees.push(copy);

        let report = snapshot.audit();
        assert_eq!(report.len(), 2);
        assert!(report.findings.contains(&Finding::DanglingReference {
            kind: RecordKind::Brand,
            id: snapshot.brands[0].bid.clone(),
            field: "eid",
            target: "ghost".into(),
        }));
        assert!(matches!(
            report.findings[0],
            Finding::DuplicateId { kind: RecordKind::Employee, .. }
        ));
    }

    #[test]
    fn finding_display() {
        let finding = Finding::DanglingReference {
            kind: RecordKind::Employee,
            id: "u-1".into(),
            field: "bid",
            target: "b-0".into(),
        };
        assert_eq!(finding.to_string(), "employee 'u-1' bid references missing 'b-0'");
    }
}
