//! Declarative schema nodes.

use envshape::schema::ObjectShape;
use envshape::{FieldPath, SchemaNode};
use serde::Deserialize;
use serde_json::Value;

use crate::error::CliError;

/// Type of a schema node.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Text.
    String,
    /// Any finite number.
    Number,
    /// Whole number.
    Integer,
    /// Boolean.
    Boolean,
    /// Nested object with ordered fields.
    Object,
}

/// One node of a manifest schema.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeSpec {
    /// Node type.
    #[serde(rename = "type")]
    pub kind: NodeType,
    /// Convert raw environment strings to the scalar type.
    #[serde(default)]
    pub coerce: bool,
    /// Accept an absent value.
    #[serde(default)]
    pub optional: bool,
    /// Accept null.
    #[serde(default)]
    pub nullable: bool,
    /// Object fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    /// Checks applied after type validation.
    #[serde(default)]
    pub checks: Vec<CheckSpec>,
}

/// Named object field.
#[derive(Clone, Debug, Deserialize)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Field schema.
    #[serde(flatten)]
    pub node: NodeSpec,
}

/// Declarative refinement.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckSpec {
    /// String must contain at least one character.
    NonEmpty,
    /// Number must lie within the inclusive bounds.
    Range {
        /// Lower bound.
        #[serde(default)]
        min: Option<f64>,
        /// Upper bound.
        #[serde(default)]
        max: Option<f64>,
    },
    /// Value must equal one of the listed values.
    OneOf {
        /// Allowed values.
        values: Vec<Value>,
    },
}

impl CheckSpec {
    fn message(&self) -> String {
        match self {
            Self::NonEmpty => "must not be empty".to_owned(),
            Self::Range {
                min: Some(lo),
                max: Some(hi),
            } => format!("must be between {lo} and {hi}"),
            Self::Range {
                min: Some(lo),
                max: None,
            } => format!("must be at least {lo}"),
            Self::Range {
                min: None,
                max: Some(hi),
            } => format!("must be at most {hi}"),
            Self::Range {
                min: None,
                max: None,
            } => "must be a number".to_owned(),
            Self::OneOf { values } => {
                let allowed: Vec<String> = values.iter().map(Value::to_string).collect();
                format!("must be one of {}", allowed.join(", "))
            }
        }
    }

    fn apply(&self, node: SchemaNode) -> SchemaNode {
        let message = self.message();
        match self {
            Self::NonEmpty => node.refine(message, |value| {
                value
                    .and_then(Value::as_str)
                    .is_some_and(|text| !text.is_empty())
            }),
            Self::Range { min, max } => {
                let (lo, hi) = (*min, *max);
                node.refine(message, move |value| {
                    value.and_then(Value::as_f64).is_some_and(|number| {
                        lo.is_none_or(|bound| number >= bound)
                            && hi.is_none_or(|bound| number <= bound)
                    })
                })
            }
            Self::OneOf { values } => {
                let allowed = values.clone();
                node.refine(message, move |value| {
                    value.is_some_and(|candidate| allowed.contains(candidate))
                })
            }
        }
    }
}

fn invalid(path: &FieldPath, message: &str) -> CliError {
    let location = if path.is_root() {
        "(root)".to_owned()
    } else {
        path.to_string()
    };
    CliError::InvalidSchema {
        path: location,
        message: message.to_owned(),
    }
}

impl NodeSpec {
    /// Build the [`SchemaNode`] this node describes.
    ///
    /// Checks wrap the base node first, then `nullable`, then `optional`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidSchema`] when a scalar declares fields or
    /// an object asks for coercion.
    pub fn to_schema(&self) -> Result<SchemaNode, CliError> {
        self.build(&FieldPath::root())
    }

    fn build(&self, path: &FieldPath) -> Result<SchemaNode, CliError> {
        let base = match self.kind {
            NodeType::Object => self.object(path)?,
            NodeType::String => self.scalar(path, SchemaNode::string())?,
            NodeType::Number => self.scalar(path, SchemaNode::number())?,
            NodeType::Integer => self.scalar(path, SchemaNode::integer())?,
            NodeType::Boolean => self.scalar(path, SchemaNode::boolean())?,
        };
        let checked = self
            .checks
            .iter()
            .fold(base, |node, check| check.apply(node));
        let nullable = if self.nullable {
            checked.nullable()
        } else {
            checked
        };
        Ok(if self.optional {
            nullable.optional()
        } else {
            nullable
        })
    }

    fn object(&self, path: &FieldPath) -> Result<SchemaNode, CliError> {
        if self.coerce {
            return Err(invalid(path, "objects cannot be coerced"));
        }
        let shape = self
            .fields
            .iter()
            .try_fold(ObjectShape::new(), |shape, field| {
                let child = field.node.build(&path.child(&field.name))?;
                Ok::<_, CliError>(shape.field(field.name.clone(), child))
            })?;
        Ok(SchemaNode::Object(shape))
    }

    fn scalar(&self, path: &FieldPath, node: SchemaNode) -> Result<SchemaNode, CliError> {
        if !self.fields.is_empty() {
            return Err(invalid(path, "only objects declare fields"));
        }
        Ok(if self.coerce { node.coerce() } else { node })
    }
}
