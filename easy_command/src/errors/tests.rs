//! Unit tests for error collection bookkeeping and merging.

use super::*;
use crate::error::CommandError;
use crate::localizer::{LocalizationArgs, Localizer};
use fluent_bundle::FluentValue;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[fixture]
fn errors() -> ErrorCollection {
    ErrorCollection::new()
}

/// Records every lookup and translates a fixed set of scoped keys.
#[derive(Default)]
struct TableLocalizer {
    table: HashMap<String, String>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl TableLocalizer {
    fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect(),
            calls: Mutex::default(),
        }
    }
}

impl Localizer for TableLocalizer {
    fn lookup(
        &self,
        key: &str,
        scope: Option<&str>,
        args: Option<&LocalizationArgs<'_>>,
    ) -> Option<String> {
        self.calls
            .lock()
            .expect("call log mutex poisoned")
            .push((key.to_owned(), scope.map(str::to_owned)));
        let template = self
            .table
            .get(&crate::localizer::scoped_key(scope, key).into_owned())?;
        let count = args
            .and_then(|values| values.get("count"))
            .map(|value| match value {
                FluentValue::Number(number) => number.as_string().into_owned(),
                _ => String::from("?"),
            });
        Some(count.map_or_else(
            || template.clone(),
            |rendered| template.replace("{count}", &rendered),
        ))
    }
}

#[rstest]
fn add_records_code_and_message(mut errors: ErrorCollection) {
    errors.add("attribute", "some_error", Some("some error description"));
    assert_eq!(
        errors.get("attribute"),
        Some([ErrorEntry::new("some_error", "some error description")].as_slice())
    );
}

#[rstest]
fn add_ignores_exact_duplicates(mut errors: ErrorCollection) {
    errors
        .add("email", "invalid", Some("bad format"))
        .add("email", "invalid", Some("bad format"));
    assert_eq!(errors.get("email").map(<[_]>::len), Some(1));
    assert_eq!(errors.len(), 1);
}

#[rstest]
fn add_keeps_same_code_with_different_messages(mut errors: ErrorCollection) {
    errors
        .add("email", "invalid", Some("bad format"))
        .add("email", "invalid", Some("unknown domain"))
        .add("email", "invalid", Some("bad format"));
    assert_eq!(
        errors.get("email"),
        Some(
            [
                ErrorEntry::new("invalid", "bad format"),
                ErrorEntry::new("invalid", "unknown domain"),
            ]
            .as_slice()
        )
    );
}

#[rstest]
fn add_defaults_message_to_code(mut errors: ErrorCollection) {
    errors.add(Attribute::BASE, "forbidden", None);
    assert_eq!(
        errors.get(Attribute::BASE),
        Some([ErrorEntry::new("forbidden", "forbidden")].as_slice())
    );
}

#[rstest]
fn add_normalises_owned_codes(mut errors: ErrorCollection) {
    errors.add("attribute", String::from("some_error"), Some("described"));
    assert!(errors.exists("attribute", "some_error"));
    assert_eq!(
        errors.get("attribute"),
        Some([ErrorEntry::new("some_error", "described")].as_slice())
    );
}

#[rstest]
fn exists_tracks_attribute_and_code(mut errors: ErrorCollection) {
    assert!(!errors.exists("attribute", "some_error"));
    errors.add("attribute", "some_error", Some("some message"));
    assert!(errors.exists("attribute", "some_error"));
    assert!(!errors.exists("attribute", "other_error"));
    assert!(!errors.exists("other", "some_error"));
}

#[rstest]
fn add_localises_through_scope() {
    let localizer = Arc::new(TableLocalizer::with(&[(
        "errors.messages.bad_post_code",
        "Very bad post code",
    )]));
    let mut errors = ErrorCollection::new()
        .with_localizer(localizer.clone())
        .with_scope("errors.messages");

    errors.add("address", "invalid", Some("bad_post_code"));

    assert_eq!(
        errors.get("address"),
        Some([ErrorEntry::new("invalid", "Very bad post code")].as_slice())
    );
    let calls = localizer.calls.lock().expect("call log mutex poisoned");
    assert_eq!(
        calls.as_slice(),
        [(
            String::from("bad_post_code"),
            Some(String::from("errors.messages"))
        )]
    );
}

#[rstest]
fn add_uses_custom_scope_for_lookup() {
    let localizer = Arc::new(TableLocalizer::with(&[
        ("errors.messages.bad_post_code", "Bad error message"),
        ("my.custom.scope.bad_post_code", "Correct error message"),
    ]));
    let mut errors = ErrorCollection::new()
        .with_localizer(localizer)
        .with_scope("my.custom.scope");

    errors.add("address", "invalid", Some("bad_post_code"));

    assert_eq!(
        errors.get("address"),
        Some([ErrorEntry::new("invalid", "Correct error message")].as_slice())
    );
}

#[rstest]
fn add_falls_back_to_key_when_translation_missing() {
    let mut errors = ErrorCollection::new()
        .with_localizer(Arc::new(TableLocalizer::default()))
        .with_scope("errors.messages");
    errors.add("name", "blank", None);
    assert_eq!(
        errors.get("name"),
        Some([ErrorEntry::new("blank", "blank")].as_slice())
    );
}

#[rstest]
fn add_with_args_forwards_interpolation() {
    let localizer = Arc::new(TableLocalizer::with(&[(
        "errors.messages.too_short",
        "is too short (minimum is {count})",
    )]));
    let mut errors = ErrorCollection::new()
        .with_localizer(localizer)
        .with_scope("errors.messages");
    let mut args: LocalizationArgs<'static> = HashMap::new();
    args.insert("count", FluentValue::from(8));

    errors.add_with_args("password", "too_short", None, &args);

    assert_eq!(
        errors.full_messages(),
        ["Password is too short (minimum is 8)"]
    );
}

#[rstest]
fn merge_from_copies_native_collections(mut errors: ErrorCollection) {
    let mut other = ErrorCollection::new();
    other.add("name", "bad_name", Some("Bad name!"));
    errors.add("name", "bad_name", Some("Bad name!"));
    errors.add("email", "blank", None);

    errors.merge_from(&other).expect("native merge succeeds");

    assert_eq!(
        errors.get("name"),
        Some([ErrorEntry::new("bad_name", "Bad name!")].as_slice())
    );
    assert_eq!(
        errors.attributes().map(Attribute::as_str).collect::<Vec<_>>(),
        ["name", "email"]
    );
}

#[rstest]
fn merge_from_native_does_not_relocalise() {
    let localizer = Arc::new(TableLocalizer::with(&[(
        "errors.messages.Bad name!",
        "translated",
    )]));
    let mut errors = ErrorCollection::new()
        .with_localizer(localizer.clone())
        .with_scope("errors.messages");
    let mut other = ErrorCollection::new();
    other.add("name", "bad_name", Some("Bad name!"));

    errors.merge_from(&other).expect("native merge succeeds");

    assert!(errors.exists("name", "bad_name"));
    assert_eq!(
        errors.full_messages(),
        ["Name Bad name!"]
    );
    assert!(localizer.calls.lock().expect("call log mutex poisoned").is_empty());
}

#[rstest]
fn merge_from_pairs_messages_with_details(mut errors: ErrorCollection) {
    let mut report = ValidationReport::new();
    report
        .push("name", "bad_name", "Bad name!")
        .push("name", "too_short", "Too short")
        .push("age", "not_a_number", "is not a number");

    errors.merge_from(&report).expect("aligned report merges");

    assert_eq!(
        errors.get("name"),
        Some(
            [
                ErrorEntry::new("bad_name", "Bad name!"),
                ErrorEntry::new("too_short", "Too short"),
            ]
            .as_slice()
        )
    );
    assert!(errors.exists("age", "not_a_number"));
}

#[rstest]
fn merge_from_reads_reports_from_json(mut errors: ErrorCollection) {
    let report: ValidationReport = serde_json::from_str(
        r#"{
            "messages": { "zeta": ["last"], "alpha": ["first"] },
            "details": { "alpha": [{ "error": "a" }], "zeta": [{ "error": "z", "count": 3 }] }
        }"#,
    )
    .expect("report json parses");

    errors.merge_from(&report).expect("aligned report merges");

    assert_eq!(errors.full_messages(), ["Zeta last", "Alpha first"]);
}

#[rstest]
fn report_json_folds_repeated_attributes(mut errors: ErrorCollection) {
    let report: ValidationReport = serde_json::from_str(
        r#"{
            "messages": { "name": ["a"], "age": ["old"], "name": ["b"] },
            "details": {
                "name": [{ "error": "x" }],
                "age": [{ "error": "o" }],
                "name": [{ "error": "y" }]
            }
        }"#,
    )
    .expect("report json parses");

    assert_eq!(report.messages("name"), ["a", "b"]);
    assert_eq!(
        report.details("name"),
        [ErrorDetail::new("x"), ErrorDetail::new("y")]
    );

    errors.merge_from(&report).expect("aligned report merges");

    assert_eq!(
        errors.get("name"),
        Some([ErrorEntry::new("x", "a"), ErrorEntry::new("y", "b")].as_slice())
    );
    assert!(errors.exists("age", "o"));
}

#[rstest]
fn report_tracks_messages_per_attribute() {
    let mut report = ValidationReport::new();
    assert!(report.is_empty());
    assert!(report.messages("name").is_empty());

    report.set_details("name", [ErrorDetail::new("bad_name")]);
    assert!(report.is_empty());

    report.push("email", "taken", "is taken");
    assert!(!report.is_empty());
    assert_eq!(report.messages("email"), ["is taken"]);
    assert_eq!(report.details("email"), [ErrorDetail::new("taken")]);
}

#[rstest]
fn merge_from_rejects_misaligned_reports(mut errors: ErrorCollection) {
    let mut report = ValidationReport::new();
    report
        .set_messages("name", [String::from("one"), String::from("two")])
        .set_details("name", [ErrorDetail::new("bad_name")]);

    let err = errors.merge_from(&report).expect_err("lists are misaligned");

    assert_eq!(
        err,
        CommandError::MismatchedDetails {
            attribute: Attribute::from("name"),
            messages: 2,
            details: 1,
        }
    );
    assert!(errors.is_empty());
}

#[rstest]
fn merge_from_rejects_sources_without_errors(mut errors: ErrorCollection) {
    let absent: Option<ErrorCollection> = None;
    assert_eq!(errors.merge_from(&absent), Err(CommandError::MissingErrors));

    let mut inner = ErrorCollection::new();
    inner.add("x", "y", None);
    errors.merge_from(&Some(inner)).expect("present source merges");
    assert!(errors.exists("x", "y"));
}

#[rstest]
fn add_multiple_accepts_records_and_pairs(mut errors: ErrorCollection) {
    errors
        .add_multiple([
            ("attribute_a", vec![ErrorEntry::new("some_error", "some error description")]),
            ("attribute_b", vec![ErrorEntry::new("another_error", "another error description")]),
        ])
        .add_multiple([("attribute_c", vec![("bare_pair", None), ("full_pair", Some("described"))])])
        .add_multiple([("attribute_d", ["only_code"])]);

    assert_eq!(
        errors.get("attribute_a"),
        Some([ErrorEntry::new("some_error", "some error description")].as_slice())
    );
    assert_eq!(
        errors.get("attribute_b"),
        Some([ErrorEntry::new("another_error", "another error description")].as_slice())
    );
    assert_eq!(
        errors.get("attribute_c"),
        Some(
            [
                ErrorEntry::new("bare_pair", "bare_pair"),
                ErrorEntry::new("full_pair", "described"),
            ]
            .as_slice()
        )
    );
    assert_eq!(
        errors.get("attribute_d"),
        Some([ErrorEntry::new("only_code", "only_code")].as_slice())
    );
}

#[rstest]
fn full_messages_follow_insertion_order(mut errors: ErrorCollection) {
    errors.add_multiple([
        (
            "attribute_a",
            vec![("some_error", "x"), ("another_error", "y")],
        ),
        ("attribute_b", vec![("another_error", "z")]),
    ]);
    assert_eq!(
        errors.full_messages(),
        ["Attribute_a x", "Attribute_a y", "Attribute_b z"]
    );
}

#[rstest]
#[case::base(Attribute::BASE, "is wrong", "is wrong")]
#[case::dotted(Attribute::from("address.post_code"), "is invalid", "Address_post_code is invalid")]
#[case::mixed_case(Attribute::from("userName"), "is taken", "Username is taken")]
#[case::empty(Attribute::from(""), "oops", " oops")]
fn full_message_humanises_attribute(
    #[case] attribute: Attribute,
    #[case] message: &str,
    #[case] expected: &str,
) {
    assert_eq!(ErrorCollection::full_message(&attribute, message), expected);
}

#[rstest]
fn clear_empties_the_collection(mut errors: ErrorCollection) {
    errors.add("a", "b", None);
    assert!(!errors.is_empty());
    errors.clear();
    assert!(errors.is_empty());
    assert_eq!(errors.len(), 0);
    assert!(!errors.contains_attribute("a"));
}

#[rstest]
fn equality_ignores_localiser(mut errors: ErrorCollection) {
    let mut localised = ErrorCollection::new().with_localizer(Arc::new(TableLocalizer::default()));
    errors.add("a", "b", Some("c"));
    localised.add("a", "b", Some("c"));
    assert_eq!(errors, localised);
}

#[rstest]
fn serialises_as_ordered_map(mut errors: ErrorCollection) {
    errors.add("zeta", "z", Some("last")).add("alpha", "a", Some("first"));
    let json = serde_json::to_string(&errors).expect("collection serialises");
    assert_eq!(
        json,
        r#"{"zeta":[{"code":"z","message":"last"}],"alpha":[{"code":"a","message":"first"}]}"#
    );
}
