//! Field-path derivation over a schema tree.

use crate::FieldPath;
use crate::schema::{NodeKind, SchemaShape};

/// List the leaf field paths defined by `schema`, in declaration order.
///
/// Object fields are recursed into after stripping optional, nullable, and
/// refinement wrappers with [`unwrap_shape`]; only their leaves are listed,
/// so an object with no fields contributes nothing. A node without a readable
/// field list (a scalar, or a malformed object) yields `parent` alone, or
/// nothing when there is no parent or the parent is the empty root path. The top-level node itself is not
/// unwrapped.
///
/// # Examples
///
/// ```
/// use envshape::{FieldPath, SchemaNode, derive_paths};
///
/// let schema = SchemaNode::object([
///     ("a", SchemaNode::object([("b", SchemaNode::string())]).optional()),
///     ("c", SchemaNode::number()),
/// ]);
/// assert_eq!(derive_paths(&schema, None), ["a.b", "c"]);
///
/// let parent = FieldPath::from("root");
/// assert_eq!(derive_paths(&SchemaNode::string(), Some(&parent)), ["root"]);
/// ```
#[must_use]
pub fn derive_paths<S>(schema: &S, parent: Option<&FieldPath>) -> Vec<FieldPath>
where
    S: SchemaShape + ?Sized,
{
    let fields = match (schema.kind(), schema.fields()) {
        (NodeKind::Object, Some(fields)) => fields,
        _ => {
            return parent
                .filter(|path| !path.is_root())
                .cloned()
                .into_iter()
                .collect();
        }
    };

    fields
        .into_iter()
        .flat_map(|(name, node)| {
            let path = parent.cloned().unwrap_or_default().child(name);
            let effective = unwrap_shape(node);
            if effective.is_object_like() {
                derive_paths(effective, Some(&path))
            } else {
                vec![path]
            }
        })
        .collect()
}

/// Strip optional, nullable, and refinement wrappers from `node`.
///
/// Wrappers are removed repeatedly, so any nesting of them resolves to the
/// innermost node. The returned reference points at that node itself; a node
/// that is not a wrapper is returned unchanged.
#[must_use]
pub fn unwrap_shape<S>(node: &S) -> &S
where
    S: SchemaShape + ?Sized,
{
    match node.kind() {
        NodeKind::Optional(inner) | NodeKind::Nullable(inner) | NodeKind::Refined(inner) => {
            unwrap_shape(inner)
        }
        NodeKind::Scalar | NodeKind::Object => node,
    }
}

#[cfg(test)]
mod tests;
