//! Field path derivation and map merging through the public API.

use envshape::{EnvKeyMap, FieldPath, SchemaNode, derive_paths, merge_config_maps, unwrap_shape};
use rstest::rstest;
use test_helpers::fixtures::{api_schema, complex_schema};

fn as_strings(paths: &[FieldPath]) -> Vec<&str> {
    paths.iter().map(FieldPath::as_str).collect()
}

#[rstest]
fn flat_schemas_yield_field_names_in_order() {
    let paths = derive_paths(&api_schema(), None);
    assert_eq!(as_strings(&paths), ["hostName", "port", "autoStart"]);
}

#[rstest]
fn nested_schemas_yield_only_leaves() {
    let paths = derive_paths(&complex_schema(), None);
    assert_eq!(
        as_strings(&paths),
        ["a.b", "a.c", "b.c", "b.d", "b.e.f", "b.e.g"]
    );
}

#[test]
fn wrappers_unwrap_to_the_same_node() {
    let base = SchemaNode::string();
    let wrapped = base.clone().refine("non-empty", |_| true).nullable().optional();
    let SchemaNode::Optional(outer) = &wrapped else {
        panic!("optional wrapper expected");
    };
    let SchemaNode::Nullable(middle) = outer.as_ref() else {
        panic!("nullable wrapper expected");
    };
    let SchemaNode::Refined { base: inner, .. } = middle.as_ref() else {
        panic!("refined wrapper expected");
    };
    assert!(std::ptr::eq(unwrap_shape(&wrapped), inner.as_ref()));
    assert!(std::ptr::eq(unwrap_shape(&base), &base));
}

#[test]
fn grouped_maps_merge_with_prefixes() {
    let a: EnvKeyMap = [("b.c", "d"), ("b.e", "f")].into_iter().collect();
    let g: EnvKeyMap = [("h.i", "j")].into_iter().collect();

    let merged = merge_config_maps([("a", &a), ("g", &g)]);

    let entries: Vec<_> = merged
        .iter()
        .map(|(path, key)| (path.as_str(), key))
        .collect();
    assert_eq!(entries, [("a.b.c", "d"), ("a.b.e", "f"), ("g.h.i", "j")]);
}
