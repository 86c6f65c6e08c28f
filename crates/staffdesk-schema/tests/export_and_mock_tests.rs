use jsonschema::JSONSchema;
use serde_json::{json, Value};
use staffdesk_model::{
    ApplicationForm, Brand, Employee, Entity, Handbook, Location, W4Form,
};
use staffdesk_schema::export::json_schema;
use staffdesk_schema::{names, MockGenerator, SchemaRegistry, Validated};
use staffdesk_test_utils::{address_json, handbook_json, w4_form_json};

fn compiled(registry: &SchemaRegistry, name: &str) -> JSONSchema {
    let document = json_schema(registry, name).unwrap();
    JSONSchema::compile(&document).unwrap()
}

#[test]
fn exported_schemas_agree_on_fixtures() {
    let registry = SchemaRegistry::with_defaults();
    let cases: Vec<(&str, Value)> = vec![
        (names::ADDRESS, address_json()),
        (names::HANDBOOK, handbook_json(3)),
        (names::W4_FORM, w4_form_json()),
    ];

    for (name, candidate) in cases {
        let schema = compiled(&registry, name);
        assert!(registry.check(name, &candidate).is_ok(), "{name} fixture");
        assert!(schema.is_valid(&candidate), "{name} exported schema");
    }
}

#[test]
fn exported_schema_rejects_what_the_registry_rejects() {
    let registry = SchemaRegistry::with_defaults();
    let schema = compiled(&registry, names::ADDRESS);

    for zip in [json!("92A18"), json!("1234"), json!(92618)] {
        let mut candidate = address_json();
        candidate["zip"] = zip;
        assert!(registry.check(names::ADDRESS, &candidate).is_err());
        assert!(!schema.is_valid(&candidate));
    }
}

#[test]
fn every_catalog_schema_exports() {
    let registry = SchemaRegistry::with_defaults();
    for name in registry.names() {
        let document = json_schema(&registry, name).unwrap();
        assert!(JSONSchema::compile(&document).is_ok(), "{name}");
    }
}

#[test]
fn mock_candidates_pass_every_schema() {
    let registry = SchemaRegistry::with_defaults();
    for name in registry.names() {
        let schema = compiled(&registry, name);
        for seed in 0..20 {
            let candidate = MockGenerator::seeded(seed).generate(&registry, name).unwrap();
            if let Err(err) = registry.check(name, &candidate) {
                panic!("{name} seed {seed}: {err}\n{candidate:#}");
            }
            assert!(schema.is_valid(&candidate), "{name} seed {seed}: {candidate:#}");
        }
    }
}

fn narrows<T: Validated>(registry: &SchemaRegistry, seeds: u64) {
    let mut generator = MockGenerator::seeded(seeds);
    for _ in 0..10 {
        let candidate = generator.generate(registry, T::SCHEMA).unwrap();
        if let Err(err) = registry.parse::<T>(&candidate) {
            panic!("{}: {err}\n{candidate:#}", T::SCHEMA);
        }
    }
}

#[test]
fn mock_candidates_narrow_into_model_types() {
    let registry = SchemaRegistry::with_defaults();
    narrows::<Entity>(&registry, 1);
    narrows::<Brand>(&registry, 2);
    narrows::<Location>(&registry, 3);
    narrows::<Employee>(&registry, 4);
    narrows::<Handbook>(&registry, 5);
    narrows::<W4Form>(&registry, 6);
    narrows::<ApplicationForm>(&registry, 7);
}

/// Mocks generated from the catalog also satisfy the schema derived from the
/// Rust type itself
#[test]
fn mocks_satisfy_derived_type_schemas() {
    let registry = SchemaRegistry::with_defaults();
    let derived = [
        (names::ADDRESS, schemars::schema_for!(staffdesk_model::Address)),
        (names::SIGN_IN, schemars::schema_for!(staffdesk_model::SignIn)),
        (names::SIGNATURE, schemars::schema_for!(staffdesk_model::Signature)),
    ];

    for (name, root) in derived {
        let document = serde_json::to_value(root).unwrap();
        let schema = JSONSchema::compile(&document).unwrap();
        let mut generator = MockGenerator::seeded(11);
        for _ in 0..10 {
            let candidate = generator.generate(&registry, name).unwrap();
            assert!(schema.is_valid(&candidate), "{name}: {candidate}");
        }
    }
}
