//! Schemas, key maps, and example records used across test suites.

use envshape::{EnvKeyMap, EnvRecord, EnvValue, SchemaNode};

/// `{hostName: string, port: number, autoStart: boolean}`, all coerced.
#[must_use]
pub fn api_schema() -> SchemaNode {
    SchemaNode::object([
        ("hostName", SchemaNode::string().coerce()),
        ("port", SchemaNode::number().coerce()),
        ("autoStart", SchemaNode::boolean().coerce()),
    ])
}

/// Environment keys for [`api_schema`].
#[must_use]
pub fn api_map() -> EnvKeyMap {
    [
        ("hostName", "API_HOST"),
        ("port", "API_PORT"),
        ("autoStart", "API_AUTO_START"),
    ]
    .into_iter()
    .collect()
}

/// Example record rendered into the [`api_schema`] template.
#[must_use]
pub fn api_example() -> EnvRecord {
    [
        ("API_HOST", EnvValue::from("test-env-var")),
        ("API_PORT", EnvValue::from(123_i64)),
        ("API_AUTO_START", EnvValue::from(false)),
    ]
    .into_iter()
    .collect()
}

/// Template expected from [`api_schema`], [`api_map`] and [`api_example`].
pub const API_TEMPLATE: &str = "#config.hostName\nAPI_HOST=\"test-env-var\"\n\n\
#config.port\nAPI_PORT=123\n\n\
#config.autoStart\nAPI_AUTO_START=\n";

/// Two-level schema mixing wrapped objects and leaves.
///
/// Its leaf paths are `a.b`, `a.c`, `b.c`, `b.d`, `b.e.f` and `b.e.g`.
#[must_use]
pub fn complex_schema() -> SchemaNode {
    SchemaNode::object([
        (
            "a",
            SchemaNode::object([
                ("b", SchemaNode::string()),
                ("c", SchemaNode::number().optional()),
            ]),
        ),
        (
            "b",
            SchemaNode::object([
                ("c", SchemaNode::boolean()),
                ("d", SchemaNode::string().nullable()),
                (
                    "e",
                    SchemaNode::object([
                        ("f", SchemaNode::integer()),
                        ("g", SchemaNode::string()),
                    ])
                    .optional(),
                ),
            ])
            .nullable(),
        ),
    ])
}
