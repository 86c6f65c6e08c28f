use proptest::prelude::*;
use serde_json::{json, Value};
use staffdesk_model::Address;
use staffdesk_schema::{names, SchemaRegistry};

fn valid_address() -> impl Strategy<Value = Value> {
    (
        "[A-Za-z0-9 ]{1,50}",
        "[A-Za-z ]{1,50}",
        "[A-Z]{2,50}",
        "[0-9]{5,10}",
        proptest::option::of("[A-Za-z ]{2,50}"),
    )
        .prop_map(|(street, city, state, zip, country)| {
            let mut address = json!({
                "street": street,
                "city": city,
                "state": state,
                "zip": zip,
            });
            if let Some(country) = country {
                address["country"] = json!(country);
            }
            address
        })
}

proptest! {
    #[test]
    fn prop_valid_address_is_returned_unchanged(address in valid_address()) {
        let registry = SchemaRegistry::with_defaults();
        let checked = registry.check(names::ADDRESS, &address).unwrap();
        prop_assert_eq!(&checked, &address);

        let typed: Address = registry.parse(&address).unwrap();
        prop_assert_eq!(serde_json::to_value(&typed).unwrap(), address);
    }

    #[test]
    fn prop_non_digit_zip_fails_at_zip(
        address in valid_address(),
        head in "[0-9]{0,4}",
        bad in "[^0-9]",
        tail in "[0-9]{0,4}",
    ) {
        let mut address = address;
        address["zip"] = json!(format!("{head}{bad}{tail}"));

        let registry = SchemaRegistry::with_defaults();
        let err = registry.check(names::ADDRESS, &address).unwrap_err();
        let report = err.report().unwrap();
        prop_assert!(report.has_rule_at("zip", "format"));
        prop_assert!(report.issues.iter().all(|issue| issue.path.to_string() == "zip"));
    }

    #[test]
    fn prop_check_never_panics_on_arbitrary_json(
        zip in prop_oneof![
            Just(json!(null)),
            any::<i64>().prop_map(|n| json!(n)),
            any::<bool>().prop_map(|b| json!(b)),
            ".{0,20}".prop_map(|s| json!(s)),
            Just(json!([1, 2, 3])),
            Just(json!({"nested": true})),
        ]
    ) {
        let registry = SchemaRegistry::with_defaults();
        let candidate = json!({"street": "1 Main", "city": "Irvine", "state": "CA", "zip": zip});
        let _ = registry.check(names::ADDRESS, &candidate);
    }
}

#[test]
fn absent_country_is_valid_but_short_country_is_not() {
    let registry = SchemaRegistry::with_defaults();
    let mut address = json!({
        "street": "1 Main St",
        "city": "Irvine",
        "state": "CA",
        "zip": "92618"
    });
    assert!(registry.check(names::ADDRESS, &address).is_ok());

    address["country"] = json!("U");
    let err = registry.check(names::ADDRESS, &address).unwrap_err();
    assert!(err.report().unwrap().has_rule_at("country", "min_length"));
}

#[test]
fn every_failing_field_is_reported() {
    let registry = SchemaRegistry::with_defaults();
    let err = registry
        .check(names::ADDRESS, &json!({"street": "", "state": "C", "zip": 92618}))
        .unwrap_err();
    let report = err.report().unwrap();

    assert!(report.has_rule_at("street", "min_length"));
    assert!(report.has_rule_at("city", "required"));
    assert!(report.has_rule_at("state", "min_length"));
    assert!(report.has_rule_at("zip", "type"));
    assert_eq!(report.len(), 4);
}
