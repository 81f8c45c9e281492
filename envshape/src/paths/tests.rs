use std::sync::Arc;

use rstest::{fixture, rstest};

use super::{derive_paths, unwrap_shape};
use crate::FieldPath;
use crate::schema::{NodeKind, ObjectShape, Refinement, SchemaNode, SchemaShape};

#[fixture]
fn complex_schema() -> SchemaNode {
    SchemaNode::object([
        (
            "a",
            SchemaNode::object([("b", SchemaNode::string()), ("c", SchemaNode::number())]),
        ),
        (
            "b",
            SchemaNode::object([
                ("c", SchemaNode::boolean()),
                ("d", SchemaNode::string()),
                (
                    "e",
                    SchemaNode::object([("f", SchemaNode::number()), ("g", SchemaNode::boolean())]),
                ),
            ]),
        ),
    ])
}

#[rstest]
fn nested_objects_flatten_to_leaf_paths(complex_schema: SchemaNode) {
    assert_eq!(
        derive_paths(&complex_schema, None),
        ["a.b", "a.c", "b.c", "b.d", "b.e.f", "b.e.g"]
    );
}

#[test]
fn flat_schemas_list_field_names_in_order() {
    let schema = SchemaNode::object([
        ("hostName", SchemaNode::string().coerce()),
        ("port", SchemaNode::number().coerce()),
        ("autoStart", SchemaNode::boolean().coerce()),
    ]);
    assert_eq!(derive_paths(&schema, None), ["hostName", "port", "autoStart"]);
}

#[test]
fn wrapped_objects_are_recursed_into() {
    let inner = SchemaNode::object([("x", SchemaNode::string())]);
    let schema = SchemaNode::object([
        ("opt", inner.clone().optional()),
        ("nul", inner.clone().nullable()),
        ("ref", inner.clone().optional().refine("always", |_| true)),
        ("leaf", SchemaNode::string().optional()),
    ]);
    assert_eq!(
        derive_paths(&schema, None),
        ["opt.x", "nul.x", "ref.x", "leaf"]
    );
}

#[test]
fn empty_objects_contribute_no_paths() {
    let schema = SchemaNode::object([
        ("empty", SchemaNode::Object(ObjectShape::new())),
        ("port", SchemaNode::number()),
    ]);
    assert_eq!(derive_paths(&schema, None), ["port"]);
}

#[rstest]
#[case::no_parent(None, &[])]
#[case::with_parent(Some("parentKey"), &["parentKey"])]
#[case::root_parent(Some(""), &[])]
fn shapeless_nodes_yield_their_parent(#[case] parent: Option<&str>, #[case] expected: &[&str]) {
    let parent_path = parent.map(FieldPath::from);
    let paths = derive_paths(&SchemaNode::string(), parent_path.as_ref());
    assert_eq!(paths, expected);
}

#[rstest]
fn refined_top_level_nodes_are_not_unwrapped(complex_schema: SchemaNode) {
    let refined = complex_schema.refine("never checked here", |_| true);
    assert!(derive_paths(&refined, None).is_empty());
}

#[rstest]
fn unwrap_returns_unwrapped_nodes_unchanged(complex_schema: SchemaNode) {
    assert!(std::ptr::eq(unwrap_shape(&complex_schema), &complex_schema));
}

#[rstest]
fn unwrap_strips_every_wrapper_layer(complex_schema: SchemaNode) {
    let base = Arc::new(complex_schema);
    let refined = SchemaNode::Refined {
        base: Arc::clone(&base),
        refinement: Refinement::new("a.b must be set", |_| true),
    };
    let wrapped = SchemaNode::Optional(Arc::new(SchemaNode::Nullable(Arc::new(refined))));

    assert!(std::ptr::eq(unwrap_shape(&wrapped), Arc::as_ptr(&base)));
}

#[rstest]
fn unwrap_handles_wrappers_around_optionals(complex_schema: SchemaNode) {
    let base = Arc::new(complex_schema);
    let wrapped = SchemaNode::Refined {
        base: Arc::new(SchemaNode::Optional(Arc::clone(&base))),
        refinement: Refinement::new("unused", |_| true),
    };

    assert!(std::ptr::eq(unwrap_shape(&wrapped), Arc::as_ptr(&base)));
}

/// Adapter whose object nodes may fail to report their fields.
enum ForeignNode {
    Leaf,
    Object(Vec<(&'static str, ForeignNode)>),
    Unreadable,
}

impl SchemaShape for ForeignNode {
    fn kind(&self) -> NodeKind<'_, Self> {
        match self {
            Self::Leaf => NodeKind::Scalar,
            Self::Object(_) | Self::Unreadable => NodeKind::Object,
        }
    }

    fn fields(&self) -> Option<Vec<(&str, &Self)>> {
        match self {
            Self::Object(fields) => Some(fields.iter().map(|(name, node)| (*name, node)).collect()),
            Self::Leaf | Self::Unreadable => None,
        }
    }
}

#[test]
fn unreadable_objects_degrade_to_leaf_paths() {
    let schema = ForeignNode::Object(vec![
        ("ok", ForeignNode::Object(vec![("inner", ForeignNode::Leaf)])),
        ("broken", ForeignNode::Unreadable),
    ]);
    assert_eq!(derive_paths(&schema, None), ["ok.inner", "broken"]);
    assert!(derive_paths(&ForeignNode::Unreadable, None).is_empty());
}
