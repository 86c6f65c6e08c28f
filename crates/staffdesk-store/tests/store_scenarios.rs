use pretty_assertions::assert_eq;
use staffdesk_model::Status;
use staffdesk_store::{seed, MockProvider, MockStore, Snapshot, StoreError};
use staffdesk_test_utils::employee;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn kopan_employee_put_on_hold() {
    let provider = MockProvider::seeded();
    let context = provider.context();
    let before = context.get().unwrap();

    let kopan = before.find_entity("kopan").unwrap();
    assert_eq!(kopan.employees.len(), 2);
    let staff: Vec<_> = before.employees_of_entity("kopan").cloned().collect();
    assert!(staff.iter().all(|e| e.status == Status::Active));

    let (changed, untouched) = (&staff[0], &staff[1]);
    let next = before
        .with_employee_status(&changed.uid, Status::OnHold)
        .unwrap();
    context.replace(next).unwrap();

    let after = context.get().unwrap();
    let updated = after.find_employee(&changed.uid).unwrap();
    assert_eq!(updated.status, Status::OnHold);
    assert_eq!(
        staffdesk_model::Employee {
            status: Status::Active,
            ..updated.clone()
        },
        *changed
    );
    assert_eq!(after.find_employee(&untouched.uid).unwrap(), untouched);
    assert_eq!(after.find_entity("kopan").unwrap(), kopan);
    assert_eq!(after.brands, before.brands);
    assert_eq!(after.locations, before.locations);
}

#[test]
fn replaced_employee_record_is_returned_by_next_get() {
    let store = MockStore::seeded();
    let record = employee("u-1002", "b-bcd", Status::Flagged);

    store.replace(store.get().with_employee(record.clone()));
    assert_eq!(store.get().find_employee("u-1002"), Some(&record));
}

#[test]
fn last_write_wins_across_threads() {
    let store = Arc::new(MockStore::seeded());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let next = seed::initial_snapshot()
                    .with_employee(employee(&format!("u-t{i}"), "b-kopan", Status::Pending));
                store.replace(next)
            })
        })
        .collect();

    let mut revisions: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    revisions.sort_unstable();
    assert_eq!(revisions, (1..=8).collect::<Vec<_>>());
    assert_eq!(store.revision(), 8);

    // Exactly one writer's snapshot survives whole
    let current = store.get();
    let extra: Vec<_> = current
        .employees
        .iter()
        .filter(|e| e.uid.starts_with("u-t"))
        .collect();
    assert_eq!(extra.len(), 1);
}

#[tokio::test]
async fn subscriber_wakes_on_replace() {
    let provider = MockProvider::seeded();
    let context = provider.context();
    let mut subscription = context.subscribe().unwrap();

    let writer = context.clone();
    let task = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let next = writer
            .get()
            .unwrap()
            .with_employee_status("u-2001", Status::Approved)
            .unwrap();
        writer.replace(next).unwrap();
    });

    let seen = tokio::time::timeout(Duration::from_secs(5), subscription.changed())
        .await
        .expect("replacement observed")
        .unwrap();
    assert_eq!(seen.find_employee("u-2001").unwrap().status, Status::Approved);
    task.await.unwrap();
}

#[tokio::test]
async fn subscriber_sees_closed_when_provider_drops() {
    let provider = MockProvider::new(Snapshot::default());
    let mut subscription = provider.context().subscribe().unwrap();
    drop(provider);

    assert_eq!(subscription.changed().await.unwrap_err(), StoreError::Closed);
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn any_status() -> impl Strategy<Value = Status> {
        proptest::sample::select(Status::NAMES)
            .prop_map(|name| Status::from_str(name).unwrap())
    }

    proptest! {
        #[test]
        fn status_change_touches_one_employee(index in 0usize..3, status in any_status()) {
            let store = MockStore::seeded();
            let before = store.get();
            let uid = before.employees[index].uid.clone();

            store.replace(before.with_employee_status(&uid, status).unwrap());
            let after = store.get();

            prop_assert_eq!(&after.entities, &before.entities);
            prop_assert_eq!(&after.brands, &before.brands);
            prop_assert_eq!(&after.locations, &before.locations);
            for (old, new) in before.employees.iter().zip(&after.employees) {
                if old.uid == uid {
                    prop_assert_eq!(new.status, status);
                    prop_assert_eq!(
                        staffdesk_model::Employee { status: old.status, ..new.clone() },
                        old.clone()
                    );
                } else {
                    prop_assert_eq!(new, old);
                }
            }
            prop_assert!(after.audit().is_clean());
        }
    }
}
