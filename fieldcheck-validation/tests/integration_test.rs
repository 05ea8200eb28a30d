//! Integration tests for fieldcheck-validation

use chrono::{Duration, Local};
use fieldcheck_validation::*;
use std::sync::Arc;
use std::thread;

fn registration_schema() -> Schema {
    Schema::new()
        .field(
            FieldRules::for_field("username")
                .add(NotBlank::new())
                .add(Length::new(3, 20).unwrap())
                .add(DoesntStartWith::new(["admin", "root"])),
        )
        .field(FieldRules::for_field("email").add(NotBlank::new()).add(Email::new()))
        .field(FieldRules::for_field("age").add(Numeric::new()).add(Gte::new(18)))
        .field(FieldRules::for_field("avatar").add(AllowedFile::new()))
        .field(
            FieldRules::for_field("role")
                .add(InList::new(["user", "editor"]))
                .add(NotEquals::new("guest")),
        )
}

#[test]
fn test_valid_registration() {
    let input = values! {
        "username" => "ada",
        "email" => "ada@example.com",
        "age" => 36,
        "avatar" => "me.PNG",
        "role" => "editor",
        "unrelated" => "ignored",
    };

    let result = validate(&registration_schema(), &input, false);

    assert!(result.is_valid());
    assert_eq!(
        result.validated.keys().collect::<Vec<_>>(),
        vec!["username", "email", "age", "avatar", "role"]
    );
    assert_eq!(result.validated["age"], Value::Int(36));
}

#[test]
fn test_invalid_registration_grouped() {
    let input = values! {
        "username" => "administrator",
        "email" => "not-an-email",
        "age" => "seventeen",
        "avatar" => "cv.docx",
    };

    let result = validate(&registration_schema(), &input, false);
    let errors = result.errors.as_grouped().unwrap();

    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec!["username", "email", "age", "avatar"]
    );
    assert_eq!(
        errors.get("age").unwrap(),
        &[
            "age only accept numbers",
            "age should be greater then or equal 18 and must be a number",
        ]
    );
    assert_eq!(errors.get("avatar").unwrap(), &["avatar only accepts [png, jpg, jpeg]"]);
    // missing role is null, and both of its rules pass on null
    assert!(errors.get("role").is_none());
    assert_eq!(result.validated["role"], Value::Null);
}

#[test]
fn test_later_rule_runs_after_earlier_failure() {
    let schema = Schema::new().field(
        FieldRules::for_field("age")
            .add(GreaterThan::new(18))
            .add(LessThan::new(10)),
    );

    let result = validate(&schema, &values! { "age" => 12 }, false);

    assert_eq!(
        serde_json::to_value(&result.errors).unwrap(),
        serde_json::json!({
            "age": ["age should be greater then 18", "age should be less then 10"]
        })
    );
}

#[test]
fn test_flattening_matches_grouped() {
    let schema = registration_schema();
    let input = values! { "username" => "", "email" => "x", "age" => 3 };

    let grouped = validate(&schema, &input, false).errors;
    let flat = validate(&schema, &input, true).errors;

    let concatenated: Vec<String> = grouped
        .as_grouped()
        .unwrap()
        .iter()
        .flat_map(|(_, messages)| messages.to_vec())
        .collect();
    assert_eq!(flat.as_flat().unwrap(), concatenated.as_slice());
    assert_eq!(flat.len(), grouped.len());
}

#[test]
fn test_boundary_inclusivity() {
    assert_eq!(GreaterThanOrEqual::new(10).validate(&Value::from(10), "x"), None);
    assert!(GreaterThan::new(10).validate(&Value::from(10), "x").is_some());
    assert_eq!(LessThanOrEqual::new(10).validate(&Value::from(10), "x"), None);
    assert!(LessThan::new(10).validate(&Value::from(10), "x").is_some());
    assert_eq!(NumberRange::new(1, 10).unwrap().validate(&Value::from(10), "x"), None);
    assert_eq!(Length::new(2, 2).unwrap().validate(&Value::from("ab"), "x"), None);
}

#[test]
fn test_null_and_blank_policy() {
    assert_eq!(MinLength::new(5).validate(&Value::Null, "x"), None);
    assert!(NotBlank::new().validate(&Value::from("   "), "x").is_some());
    assert!(NotBlank::new().validate(&Value::Null, "x").is_some());
    assert!(NotNull::new().validate(&Value::Null, "x").is_some());
    assert_eq!(NotNull::new().validate(&Value::from(""), "x"), None);
}

#[test]
fn test_allowed_file_and_email() {
    let file = AllowedFile::new();
    assert_eq!(file.validate(&Value::from("a.png"), "f"), None);
    assert!(file.validate(&Value::from("a.docx"), "f").is_some());
    assert_eq!(file.validate(&Value::from(""), "f"), None);

    let email = Email::new();
    assert_eq!(email.validate(&Value::from("user@example.com"), "e"), None);
    assert!(email.validate(&Value::from("not-an-email"), "e").is_some());
}

#[test]
fn test_date_after_yesterday() {
    let rule = DateAfter::new("yesterday").unwrap();
    let today = Local::now().date_naive();

    assert_eq!(rule.validate(&Value::from(today), "d"), None);
    assert!(rule.validate(&Value::from(today - Duration::days(2)), "d").is_some());
}

#[test]
fn test_undefined_placeholder_renders_empty() {
    let rule = MinLength::new(3).with_message("{field_name}{undefined} is short");
    assert_eq!(
        rule.validate(&Value::from("a"), "name"),
        Some("name is short".to_string())
    );
}

#[test]
fn test_prefix_any_candidate() {
    let rule = StartsWith::new(["+1", "+44"]);
    assert_eq!(rule.validate(&Value::from("+44 20"), "phone"), None);
    assert!(rule.validate(&Value::from("+33 1"), "phone").is_some());

    let rule = DoesntEndWith::new([".exe", ".bat"]);
    assert!(rule.validate(&Value::from("setup.exe"), "file").is_some());
    assert_eq!(rule.validate(&Value::from("notes.txt"), "file"), None);
}

#[test]
fn test_json_input() {
    let input = values_from_json(serde_json::json!({
        "username": "grace",
        "email": "grace@example.com",
        "age": 17,
    }));

    let result = registration_schema().validate_flat(&input);
    assert_eq!(
        result.errors.into_flat(),
        vec!["age should be greater then or equal 18"]
    );
}

#[test]
fn test_error_messages_to_json() {
    let result = registration_schema().validate(&values! { "email" => "nope" });
    let Errors::Grouped(errors) = result.errors else {
        panic!("expected grouped errors");
    };

    let body = errors.to_json();
    assert_eq!(
        body["errors"]["email"],
        serde_json::json!(["field email is not a valid email address"])
    );
    assert_eq!(
        body["errors"]["username"],
        serde_json::json!(["field username must not be blank"])
    );
}

#[test]
fn test_shared_schema_across_threads() {
    let schema = Arc::new(registration_schema());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let input = values! { "age" => i * 10 };
                schema.validate_flat(&input).errors.len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    // username and email are required; ages below 18 add one more
    assert_eq!(counts, vec![3, 3, 2, 2]);
}
