//! Concrete schema nodes and their builders.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{NodeKind, SchemaShape, Validate, coerce};
use crate::SchemaValidationError;

/// Type of a scalar leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    /// Text.
    String,
    /// Any finite number.
    Number,
    /// A whole number.
    Integer,
    /// `true` or `false`.
    Boolean,
}

impl ScalarKind {
    /// Name used in validation messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// A scalar leaf and whether raw values are coerced into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scalar {
    /// Declared type.
    pub kind: ScalarKind,
    /// Whether values of other primitive types are converted rather than
    /// rejected.
    pub coerce: bool,
}

/// Ordered field list of an object node.
#[derive(Clone, Debug, Default)]
pub struct ObjectShape {
    fields: Vec<(String, Arc<SchemaNode>)>,
}

impl ObjectShape {
    /// Create an object shape with no fields.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field. Field order is declaration order.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, node: impl Into<Arc<SchemaNode>>) -> Self {
        self.fields.push((name.into(), node.into()));
        self
    }

    /// Iterate over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields
            .iter()
            .map(|(name, node)| (name.as_str(), node.as_ref()))
    }

    /// Number of declared fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

type Predicate = dyn Fn(Option<&Value>) -> bool + Send + Sync;

/// Validation predicate attached to a refined node.
///
/// The predicate sees the value already produced by the base node, or `None`
/// when the base accepted an absent value (an optional base), and reports
/// `message` when it returns `false`. It does not run when the base itself
/// failed.
#[derive(Clone)]
pub struct Refinement {
    message: String,
    check: Arc<Predicate>,
}

impl Refinement {
    /// Create a refinement from a predicate and its failure message.
    pub fn new<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            check: Arc::new(check),
        }
    }

    /// Message reported when the predicate fails.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Run the predicate.
    #[must_use]
    pub fn accepts(&self, value: Option<&Value>) -> bool {
        (self.check)(value)
    }
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("message", &self.message)
            .field("check", &"<predicate>")
            .finish()
    }
}

/// A node of a configuration schema.
///
/// Wrapped nodes hold their inner node behind an [`Arc`] so one base schema
/// can be shared by several wrappers.
///
/// # Examples
///
/// ```
/// use envshape::{SchemaNode, derive_paths};
///
/// let schema = SchemaNode::object([
///     ("api", SchemaNode::object([
///         ("host", SchemaNode::string()),
///         ("port", SchemaNode::integer().coerce()),
///     ])),
///     ("debug", SchemaNode::boolean().coerce().optional()),
/// ]);
///
/// let paths = derive_paths(&schema, None);
/// assert_eq!(paths, ["api.host", "api.port", "debug"]);
/// ```
#[derive(Clone, Debug)]
pub enum SchemaNode {
    /// A scalar leaf.
    Scalar(Scalar),
    /// An object with named fields.
    Object(ObjectShape),
    /// The inner node, or nothing.
    Optional(Arc<SchemaNode>),
    /// The inner node, or null.
    Nullable(Arc<SchemaNode>),
    /// The base node, further checked by a predicate.
    Refined {
        /// Node validated first.
        base: Arc<SchemaNode>,
        /// Predicate applied to the base node's output.
        refinement: Refinement,
    },
}

impl SchemaNode {
    /// Strict string leaf.
    #[must_use]
    pub const fn string() -> Self {
        Self::scalar(ScalarKind::String)
    }

    /// Strict number leaf.
    #[must_use]
    pub const fn number() -> Self {
        Self::scalar(ScalarKind::Number)
    }

    /// Strict integer leaf.
    #[must_use]
    pub const fn integer() -> Self {
        Self::scalar(ScalarKind::Integer)
    }

    /// Strict boolean leaf.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::scalar(ScalarKind::Boolean)
    }

    const fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar(Scalar {
            kind,
            coerce: false,
        })
    }

    /// Object node with the given fields in order.
    #[must_use]
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        let shape = fields
            .into_iter()
            .fold(ObjectShape::new(), |shape, (name, node)| shape.field(name, node));
        Self::Object(shape)
    }

    /// Make a scalar leaf coerce raw values into its type.
    ///
    /// Has no effect on other nodes.
    #[must_use]
    pub fn coerce(self) -> Self {
        match self {
            Self::Scalar(Scalar { kind, .. }) => Self::Scalar(Scalar { kind, coerce: true }),
            other => other,
        }
    }

    /// Wrap this node so it may be absent.
    #[must_use]
    pub fn optional(self) -> Self {
        Self::Optional(Arc::new(self))
    }

    /// Wrap this node so it may be null.
    #[must_use]
    pub fn nullable(self) -> Self {
        Self::Nullable(Arc::new(self))
    }

    /// Attach a validation predicate.
    ///
    /// The predicate receives `None` when an optional base is absent, so
    /// `string().optional().refine(..)` can still reject a missing value.
    #[must_use]
    pub fn refine<F>(self, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self::Refined {
            base: Arc::new(self),
            refinement: Refinement::new(message, check),
        }
    }
}

impl SchemaShape for SchemaNode {
    fn kind(&self) -> NodeKind<'_, Self> {
        match self {
            Self::Scalar(_) => NodeKind::Scalar,
            Self::Object(_) => NodeKind::Object,
            Self::Optional(inner) => NodeKind::Optional(inner),
            Self::Nullable(inner) => NodeKind::Nullable(inner),
            Self::Refined { base, .. } => NodeKind::Refined(base),
        }
    }

    fn fields(&self) -> Option<Vec<(&str, &Self)>> {
        match self {
            Self::Object(shape) => Some(shape.iter().collect()),
            _ => None,
        }
    }
}

impl Validate for SchemaNode {
    fn parse(&self, input: &Value) -> Result<Value, SchemaValidationError> {
        coerce::parse_root(self, input)
    }
}
