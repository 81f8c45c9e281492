//! Schema capability traits and the bundled schema implementation.
//!
//! The path deriver and the loaders only talk to schemas through two traits:
//!
//! - [`SchemaShape`] classifies a node into the closed set of [`NodeKind`]s
//!   and enumerates the named children of object nodes.
//! - [`Validate`] parses an assembled raw value, coercing and checking it.
//!
//! [`SchemaNode`] implements both and is what most callers use. Adapters for
//! other schema representations only need to classify themselves the same
//! way.

mod coerce;
mod node;

pub use node::{ObjectShape, Refinement, Scalar, ScalarKind, SchemaNode};

use serde_json::Value;

use crate::SchemaValidationError;

/// Classification of a schema node.
///
/// Wrapper kinds borrow the node they decorate so callers can strip them
/// without knowing the concrete schema type.
#[derive(Debug)]
pub enum NodeKind<'a, N: ?Sized> {
    /// A leaf value such as a string, number, or boolean.
    Scalar,
    /// A node with named child fields.
    Object,
    /// A node that may be absent.
    Optional(&'a N),
    /// A node that may be null.
    Nullable(&'a N),
    /// A node carrying an extra validation predicate over its base.
    Refined(&'a N),
}

/// Structural view of a schema node.
pub trait SchemaShape {
    /// Classify this node.
    fn kind(&self) -> NodeKind<'_, Self>;

    /// Named child nodes in declaration order.
    ///
    /// Returns `None` for nodes that are not objects, and for object nodes
    /// whose field list cannot be read. Callers treat both the same way: as
    /// a node without fields.
    fn fields(&self) -> Option<Vec<(&str, &Self)>>;

    /// Whether this node is object-like.
    fn is_object_like(&self) -> bool {
        matches!(self.kind(), NodeKind::Object)
    }
}

/// Parse capability of a schema.
pub trait Validate {
    /// Coerce and validate `input`, returning the validated value.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaValidationError`] listing every failing path when
    /// `input` does not satisfy the schema.
    fn parse(&self, input: &Value) -> Result<Value, SchemaValidationError>;
}
