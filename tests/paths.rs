//! Path resolver laws: parse/print round-trips and read/write behavior
//! over arbitrary nested trees.

use formspec::{
    PathSegment, delete_value, get_value, is_unique_key, parse_path, path_to_string, set_value,
};
use proptest::prelude::*;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case("email", 1)]
#[case("user.address.street", 3)]
#[case("contacts[0].value", 3)]
#[case("contacts[__k3f9x27ab01cd__].value", 3)]
#[case("a[3][4].b", 4)]
fn parse_segment_counts(#[case] path: &str, #[case] count: usize) {
    assert_eq!(parse_path(path).len(), count);
}

#[rstest]
#[case("a.0.b", "a[0].b")]
#[case("a.__k3f9x27ab01cd__.b", "a[__k3f9x27ab01cd__].b")]
#[case("a[b]", "a.b")]
fn non_canonical_inputs_normalize(#[case] input: &str, #[case] canonical: &str) {
    assert_eq!(path_to_string(&parse_path(input)), canonical);
}

#[test]
fn unique_key_shape() {
    assert!(is_unique_key("__k3f9x27ab01cd__"));
    assert!(!is_unique_key("__short__"));
    assert!(!is_unique_key("__K3F9X27AB01CD__"));
    assert!(!is_unique_key("k3f9x27ab01cdxx"));
}

#[test]
fn generated_keys_are_well_formed() {
    for _ in 0..32 {
        assert!(is_unique_key(&formspec::generate_unique_key()));
    }
}

// ----------------------------------------------------------------------
// Property tests
// ----------------------------------------------------------------------

fn name_segment() -> impl Strategy<Value = PathSegment> {
    "[a-z][a-z0-9_]{0,7}".prop_map(PathSegment::Name)
}

fn any_segment() -> impl Strategy<Value = PathSegment> {
    prop_oneof![
        name_segment(),
        (0usize..16).prop_map(PathSegment::Index),
        "__[a-z0-9]{13}__".prop_map(PathSegment::Key),
    ]
}

fn canonical_path() -> impl Strategy<Value = Vec<PathSegment>> {
    (name_segment(), prop::collection::vec(any_segment(), 0..5))
        .prop_map(|(first, mut rest)| {
            let mut segments = vec![first];
            segments.append(&mut rest);
            segments
        })
}

proptest! {
    #[test]
    fn print_then_parse_round_trips(segments in canonical_path()) {
        let printed = path_to_string(&segments);
        let reparsed = parse_path(&printed);
        prop_assert_eq!(reparsed.as_slice(), segments.as_slice());
    }

    #[test]
    fn get_after_set_returns_the_value(segments in canonical_path(), n in any::<i64>()) {
        let written = set_value(&json!({}), &segments, json!(n));
        prop_assert_eq!(get_value(&written, &segments), Some(&json!(n)));
    }

    #[test]
    fn set_never_mutates_the_original(segments in canonical_path(), n in any::<i64>()) {
        let original = json!({"existing": {"data": [1, 2, 3]}});
        let before = original.clone();
        let _ = set_value(&original, &segments, json!(n));
        prop_assert_eq!(original, before);
    }

    #[test]
    fn delete_after_set_removes_the_value(segments in canonical_path(), n in any::<i64>()) {
        let written = set_value(&json!({}), &segments, json!(n));
        let deleted = delete_value(&written, &segments);
        prop_assert_eq!(get_value(&deleted, &segments), None);
    }
}

// ----------------------------------------------------------------------
// Targeted edge cases
// ----------------------------------------------------------------------

#[test]
fn get_never_panics_on_shape_mismatches() {
    let data = json!({"a": [1, 2], "b": {"c": null}});
    for path in ["a.c", "a[9]", "b.c.d", "b[0]", "a[0].x", ""] {
        // Either resolves or misses; must not panic.
        let _ = get_value(&data, &parse_path(path));
    }
    assert_eq!(get_value(&data, &parse_path("")), Some(&data));
}

#[test]
fn set_pads_arrays_with_nulls() {
    let written = set_value(&json!({}), &parse_path("items[2]"), json!("x"));
    assert_eq!(written, json!({"items": [null, null, "x"]}));
}

#[test]
fn unterminated_bracket_consumes_to_end() {
    let segments = parse_path("a[unclosed");
    assert_eq!(
        segments.as_slice(),
        &[
            PathSegment::Name("a".into()),
            PathSegment::Name("unclosed".into())
        ]
    );
}

#[test]
fn delete_mid_array_shifts_following_items() {
    let data = json!({"contacts": [{"v": 1}, {"v": 2}, {"v": 3}]});
    let deleted = delete_value(&data, &parse_path("contacts[0]"));
    assert_eq!(deleted, json!({"contacts": [{"v": 2}, {"v": 3}]}));
}
