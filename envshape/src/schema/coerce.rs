//! Coercion and validation of assembled raw values against a [`SchemaNode`].
//!
//! The coercion table follows the loose conversions environment-driven
//! configuration traditionally relies on: numbers read from text, `""` reads
//! as `0` for numbers and `false` for booleans, and any other non-empty text
//! reads as `true`, including the text `"false"`.

use std::num::FpCategory;

use serde_json::{Map, Number, Value};

use super::node::{ObjectShape, Scalar, ScalarKind, SchemaNode};
use crate::{FieldPath, Issue, IssueKind, SchemaValidationError};

/// Outcome of parsing one node.
enum Parsed {
    Present(Value),
    Absent,
    Invalid,
}

struct Walker {
    issues: Vec<Issue>,
}

impl Walker {
    fn report(&mut self, path: &FieldPath, kind: IssueKind) -> Parsed {
        self.issues.push(Issue::new(path.clone(), kind));
        Parsed::Invalid
    }

    fn node(&mut self, node: &SchemaNode, input: Option<&Value>, path: &FieldPath) -> Parsed {
        match node {
            SchemaNode::Scalar(scalar) => self.scalar(*scalar, input, path),
            SchemaNode::Object(shape) => self.object(shape, input, path),
            SchemaNode::Optional(inner) => match input {
                None => Parsed::Absent,
                Some(_) => self.node(inner, input, path),
            },
            SchemaNode::Nullable(inner) => match input {
                Some(Value::Null) => Parsed::Present(Value::Null),
                _ => self.node(inner, input, path),
            },
            SchemaNode::Refined { base, refinement } => {
                let parsed = self.node(base, input, path);
                let is_accepted = match &parsed {
                    Parsed::Present(value) => refinement.accepts(Some(value)),
                    Parsed::Absent => refinement.accepts(None),
                    Parsed::Invalid => true,
                };
                if is_accepted {
                    parsed
                } else {
                    self.report(path, IssueKind::Refinement(refinement.message().to_owned()))
                }
            }
        }
    }

    fn object(&mut self, shape: &ObjectShape, input: Option<&Value>, path: &FieldPath) -> Parsed {
        let fields = match input {
            None => return self.report(path, IssueKind::Required),
            Some(Value::Object(fields)) => fields,
            Some(other) => {
                return self.report(
                    path,
                    IssueKind::InvalidType {
                        expected: "object",
                        received: type_name(Some(other)),
                    },
                );
            }
        };

        let mut output = Map::new();
        let mut is_valid = true;
        for (name, child) in shape.iter() {
            match self.node(child, fields.get(name), &path.child(name)) {
                Parsed::Present(value) => {
                    output.insert(name.to_owned(), value);
                }
                Parsed::Absent => {}
                Parsed::Invalid => is_valid = false,
            }
        }

        if is_valid {
            Parsed::Present(Value::Object(output))
        } else {
            Parsed::Invalid
        }
    }

    fn scalar(&mut self, scalar: Scalar, input: Option<&Value>, path: &FieldPath) -> Parsed {
        let result = match (scalar.kind, scalar.coerce) {
            (ScalarKind::Boolean, true) => Ok(Value::Bool(truthy(input))),
            (ScalarKind::String, true) => coerce_string(input),
            (ScalarKind::Number, true) => coerce_number(input).map(Value::Number),
            (ScalarKind::Integer, true) => coerce_number(input).and_then(require_integer),
            (kind, false) => strict(kind, input),
        };
        match result {
            Ok(value) => Parsed::Present(value),
            Err(kind) => self.report(path, kind),
        }
    }
}

/// Parse `input` against `schema`, collecting every issue.
pub(super) fn parse_root(schema: &SchemaNode, input: &Value) -> Result<Value, SchemaValidationError> {
    let mut walker = Walker { issues: Vec::new() };
    let parsed = walker.node(schema, Some(input), &FieldPath::root());
    match parsed {
        Parsed::Present(value) if walker.issues.is_empty() => Ok(value),
        _ => Err(SchemaValidationError::new(walker.issues)),
    }
}

const fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

const fn invalid(expected: &'static str, input: Option<&Value>) -> IssueKind {
    IssueKind::InvalidType {
        expected,
        received: type_name(input),
    }
}

fn strict(kind: ScalarKind, input: Option<&Value>) -> Result<Value, IssueKind> {
    match (kind, input) {
        (_, None) => Err(IssueKind::Required),
        (ScalarKind::String, Some(value @ Value::String(_)))
        | (ScalarKind::Number, Some(value @ Value::Number(_)))
        | (ScalarKind::Boolean, Some(value @ Value::Bool(_))) => Ok(value.clone()),
        (ScalarKind::Integer, Some(Value::Number(number))) => require_integer(number.clone()),
        (other, value) => Err(invalid(other.as_str(), value)),
    }
}

fn coerce_string(input: Option<&Value>) -> Result<Value, IssueKind> {
    let text = match input {
        None => return Err(IssueKind::Required),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Null) => "null".to_owned(),
        Some(other) => return Err(invalid("string", Some(other))),
    };
    Ok(Value::String(text))
}

fn coerce_number(input: Option<&Value>) -> Result<Number, IssueKind> {
    match input {
        None => Err(IssueKind::Required),
        Some(Value::Number(number)) => Ok(number.clone()),
        Some(Value::Bool(flag)) => Ok(Number::from(u8::from(*flag))),
        Some(Value::Null) => Ok(Number::from(0_u8)),
        Some(Value::String(text)) => parse_number(text.trim()).ok_or(IssueKind::InvalidType {
            expected: "number",
            received: "nan",
        }),
        Some(other) => Err(invalid("number", Some(other))),
    }
}

const RADIX_PREFIXES: [(&str, u32); 6] = [
    ("0x", 16),
    ("0X", 16),
    ("0o", 8),
    ("0O", 8),
    ("0b", 2),
    ("0B", 2),
];

fn parse_number(text: &str) -> Option<Number> {
    if text.is_empty() {
        return Some(Number::from(0_u8));
    }
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Number::from(integer));
    }
    if let Some(number) = parse_radix(text) {
        return Some(number);
    }
    text.parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .and_then(Number::from_f64)
}

/// Unsigned `0x`, `0o` and `0b` literals. Signs and separators are rejected.
fn parse_radix(text: &str) -> Option<Number> {
    let (digits, radix) = RADIX_PREFIXES
        .iter()
        .find_map(|(prefix, radix)| text.strip_prefix(prefix).map(|rest| (rest, *radix)))?;
    if digits.is_empty() || !digits.chars().all(|digit| digit.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(Number::from)
}

fn require_integer(number: Number) -> Result<Value, IssueKind> {
    if number.is_i64() || number.is_u64() {
        return Ok(Value::Number(number));
    }
    match number.as_f64() {
        Some(float) if float.is_finite() && float.fract().classify() == FpCategory::Zero => {
            Ok(Value::Number(whole_number(float).unwrap_or(number)))
        }
        _ => Err(IssueKind::NotInteger),
    }
}

/// Integral `float` as an integer number, when it fits `i64` or `u64`.
fn whole_number(float: f64) -> Option<Number> {
    // Display never uses exponents, so integral values print as digits.
    let digits = float.to_string();
    digits
        .parse::<i64>()
        .map(Number::from)
        .or_else(|_| digits.parse::<u64>().map(Number::from))
        .ok()
}

fn truthy(input: Option<&Value>) -> bool {
    match input {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Number(number)) => number
            .as_f64()
            .is_some_and(|float| !matches!(float.classify(), FpCategory::Zero | FpCategory::Nan)),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}
