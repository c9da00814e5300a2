//! Integration tests for JAX-RS path matching.

use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use trellis_core::path::{PathPattern, RemainingPath};

fn hash_of(pattern: &PathPattern) -> u64 {
    let mut hasher = DefaultHasher::new();
    pattern.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Documented scenarios
// =============================================================================

#[test]
fn test_exact_match_leaves_nothing() {
    let pattern = PathPattern::new("/users/{id}", false).unwrap();
    let result = pattern.match_str("/users/42").unwrap();

    assert_eq!(result.variable("id"), Some("42"));
    assert_eq!(result.variables().len(), 1);
    assert_eq!(result.final_matching_group(), "");
    assert!(pattern.matches_with_empty(&"/users/42".into()));
}

#[test]
fn test_residue_goes_to_final_group() {
    let pattern = PathPattern::new("/users/{id}", false).unwrap();
    let result = pattern.match_str("/users/42/orders").unwrap();

    assert_eq!(result.variable("id"), Some("42"));
    assert_eq!(result.final_matching_group(), "/orders");
    assert_eq!(result.final_capturing_group(), "/orders");
    assert!(!pattern.matches_with_empty(&"/users/42/orders".into()));
}

#[test]
fn test_limited_variable_stays_in_segment() {
    let pattern = PathPattern::new("/users/{id}", true).unwrap();
    let result = pattern.match_str("/users/42/x").unwrap();

    assert_eq!(result.variable("id"), Some("42"));
    assert_eq!(result.final_matching_group(), "/x");
}

#[test]
fn test_empty_pattern_is_root() {
    let pattern = PathPattern::new("", false).unwrap();
    assert_eq!(pattern.path_pattern(), "/");
    assert!(pattern.is_empty_or_slash());

    let result = pattern.match_str("/").unwrap();
    assert!(result.variables().is_empty());
    assert_eq!(result.final_matching_group(), "");
    assert_eq!(pattern, *PathPattern::empty());
}

// =============================================================================
// Edge cases
// =============================================================================

#[test]
fn test_query_and_matrix_parameters_ignored() {
    let pattern = PathPattern::new("/users/{id}", true).unwrap();

    let result = pattern.match_str("/users;v=2/42;format=json?expand=true").unwrap();
    assert_eq!(result.variable("id"), Some("42"));
    assert_eq!(result.final_matching_group(), "");

    assert!(pattern.matches_with_empty(&RemainingPath::new("/users/7#top")));
}

#[test]
fn test_trailing_slash_of_request_is_kept() {
    let pattern = PathPattern::new("/users/{id}", true).unwrap();

    let result = pattern.match_str("/users/42/").unwrap();
    assert_eq!(result.final_matching_group(), "");

    let result = pattern.match_str("/users/42/orders/").unwrap();
    assert_eq!(result.final_matching_group(), "/orders/");
}

#[test]
fn test_non_matching_paths() {
    let pattern = PathPattern::new("/users/{id}", true).unwrap();
    assert!(pattern.match_str("/groups/1").is_none());
    assert!(pattern.match_str("/users").is_none());
    assert!(pattern.match_str("/users/").is_none());
    assert!(pattern.match_str("").is_none());
    assert!(!pattern.matches_with_empty(&"/groups/1".into()));
}

#[test]
fn test_reserved_variable_rejected() {
    assert!(PathPattern::new("/files/{trellis.rest}", false).is_err());
    assert!(PathPattern::new("/files/{", false).is_err());
    assert!(PathPattern::new("/files/}", true).is_err());
}

#[test]
fn test_literal_chars_and_groups_order_candidates() {
    let literal = PathPattern::new("/users/me", true).unwrap();
    let variable = PathPattern::new("/users/{id}", true).unwrap();
    let two_vars = PathPattern::new("/{a}/{b}", true).unwrap();

    assert_eq!(literal.number_of_literal_chars(), "/users/me/".len());
    assert_eq!(variable.number_of_literal_chars(), "/users//".len());
    assert!(literal.number_of_literal_chars() > variable.number_of_literal_chars());

    assert_eq!(literal.number_of_capturing_groups(), 0);
    assert_eq!(variable.number_of_capturing_groups(), 1);
    assert_eq!(two_vars.number_of_capturing_groups(), 2);
}

#[test]
fn test_equality_ignores_variable_names() {
    let a = PathPattern::new("/users/{id}", true).unwrap();
    let b = PathPattern::new("users/{name}", false).unwrap();
    let c = PathPattern::new("/users/{id}/", true).unwrap();
    let d = PathPattern::new("/groups/{id}", true).unwrap();

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(a, c);
    assert_ne!(a, d);
}

// =============================================================================
// Properties
// =============================================================================

fn template_segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,5}",
        "[a-z]{1,3}".prop_map(|name| format!("{{{}}}", name)),
        ("[a-z]{1,3}", "[a-z]{1,3}").prop_map(|(lit, name)| format!("{}{{{}}}", lit, name)),
    ]
}

fn template() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(template_segment(), 0..5),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(segments, leading, trailing)| {
            let mut pattern = segments.join("/");
            if leading {
                pattern.insert(0, '/');
            }
            if trailing && !pattern.ends_with('/') {
                pattern.push('/');
            }
            pattern
        })
}

/// Request paths with a leading and no trailing slash.
fn request_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9]{1,4}", 0..6).prop_map(|segments| format!("/{}", segments.join("/")))
}

fn strip_variables(pattern: &str) -> String {
    let mut out = String::new();
    let mut in_variable = false;
    for c in pattern.chars() {
        match c {
            '{' => in_variable = true,
            '}' => in_variable = false,
            c if !in_variable => out.push(c),
            _ => {}
        }
    }
    out
}

proptest! {
    #[test]
    fn prop_final_matching_group_shape(pattern in template(), limited in any::<bool>(), path in request_path()) {
        let compiled = PathPattern::new(&pattern, limited).unwrap();
        if let Some(result) = compiled.match_str(&path) {
            let group = result.final_matching_group();
            prop_assert!(group.is_empty() || (group.starts_with('/') && !group.ends_with('/')), "group {:?}", group);
            prop_assert_eq!(result.final_capturing_group(), group);
        }
    }

    #[test]
    fn prop_matches_with_empty_agrees_with_match(pattern in template(), limited in any::<bool>(), path in request_path()) {
        let compiled = PathPattern::new(&pattern, limited).unwrap();
        let remaining = RemainingPath::new(path);
        let expected = compiled
            .match_path(&remaining)
            .is_some_and(|result| result.is_final_capturing_group_empty_or_slash());
        prop_assert_eq!(compiled.matches_with_empty(&remaining), expected);
    }

    #[test]
    fn prop_literal_chars_count_pattern_without_variables(pattern in template(), limited in any::<bool>()) {
        let compiled = PathPattern::new(&pattern, limited).unwrap();
        let mut expected = strip_variables(compiled.path_pattern());
        if !compiled.path_pattern().ends_with('/') {
            expected.push('/');
        }
        prop_assert_eq!(compiled.number_of_literal_chars(), expected.chars().count());
    }

    #[test]
    fn prop_equality_consistent_with_hash(a in template(), b in template(), limited in any::<bool>()) {
        let x = PathPattern::new(&a, limited).unwrap();
        let y = PathPattern::new(&b, !limited).unwrap();
        let x2 = PathPattern::new(&a, limited).unwrap();

        prop_assert_eq!(&x, &x2);
        prop_assert_eq!(x == y, y == x);
        if x == y {
            prop_assert_eq!(hash_of(&x), hash_of(&y));
        }
    }

    #[test]
    fn prop_exact_literal_path_matches_with_empty(segments in prop::collection::vec("[a-z]{1,5}", 0..5)) {
        let path = format!("/{}", segments.join("/"));
        let compiled = PathPattern::new(&path, true).unwrap();
        prop_assert!(compiled.matches_with_empty(&RemainingPath::new(path.clone())));
        prop_assert!(compiled.match_str(&path).unwrap().variables().is_empty());
    }
}
