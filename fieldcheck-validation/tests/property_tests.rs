//! Property-based tests for fieldcheck-validation.

use fieldcheck_validation::*;
use proptest::prelude::*;

fn mixed_schema() -> Schema {
    Schema::new()
        .field(
            FieldRules::for_field("name")
                .add(NotBlank::new())
                .add(Length::new(2, 8).unwrap())
                .add(DoesntStartWith::new(["x", "y"])),
        )
        .field(
            FieldRules::for_field("score")
                .add(Numeric::new())
                .add(Gte::new(0))
                .add(Lt::new(100)),
        )
        .field(FieldRules::for_field("file").add(AllowedFile::new()))
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1e6f64..1e6).prop_map(Value::from),
        ".{0,12}".prop_map(Value::from),
    ]
}

fn values_strategy() -> impl Strategy<Value = Values> {
    (
        prop::option::of(value_strategy()),
        prop::option::of(value_strategy()),
        prop::option::of(value_strategy()),
    )
        .prop_map(|(name, score, file)| {
            let mut values = Values::new();
            for (key, value) in [("name", name), ("score", score), ("file", file)] {
                if let Some(value) = value {
                    values.insert(key.to_string(), value);
                }
            }
            values
        })
}

// ============================================================================
// DETERMINISM: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn validate_is_deterministic(values in values_strategy()) {
        let schema = mixed_schema();
        let first = validate(&schema, &values, false);
        let second = validate(&schema, &values, false);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rules_are_deterministic(value in value_strategy()) {
        let rule = DigitsBetween::new(1, 4).unwrap();
        prop_assert_eq!(rule.validate(&value, "f"), rule.validate(&value, "f"));
    }
}

// ============================================================================
// FLATTENING LAW: flat == concat(grouped) in schema order
// ============================================================================

proptest! {
    #[test]
    fn flat_is_concatenation_of_grouped(values in values_strategy()) {
        let schema = mixed_schema();
        let grouped = validate(&schema, &values, false).errors;
        let flat = validate(&schema, &values, true).errors;

        let mut expected = Vec::new();
        let grouped = grouped.as_grouped().unwrap();
        for field in schema.field_names() {
            if let Some(messages) = grouped.get(field) {
                expected.extend_from_slice(messages);
            }
        }

        prop_assert_eq!(flat.as_flat().unwrap(), expected.as_slice());
    }

    #[test]
    fn validated_covers_exactly_schema_fields(values in values_strategy()) {
        let schema = mixed_schema();
        let result = validate(&schema, &values, false);

        let keys: Vec<&str> = result.validated.keys().map(String::as_str).collect();
        prop_assert_eq!(keys, schema.field_names().collect::<Vec<_>>());
        for (field, value) in &result.validated {
            prop_assert_eq!(value, values.get(field).unwrap_or(&Value::Null));
        }
    }
}

// ============================================================================
// NULL POLICY: only the required-ness rules reject null
// ============================================================================

proptest! {
    #[test]
    fn threshold_rules_pass_null(threshold in -1000i32..1000) {
        prop_assert!(GreaterThan::new(threshold).validate(&Value::Null, "f").is_none());
        prop_assert!(LessThanOrEqual::new(threshold).validate(&Value::Null, "f").is_none());
    }

    #[test]
    fn greater_than_matches_comparison(n in -1000i64..1000, threshold in -1000i32..1000) {
        let passed = GreaterThan::new(threshold).validate(&Value::from(n), "f").is_none();
        prop_assert_eq!(passed, n > i64::from(threshold));
    }
}
