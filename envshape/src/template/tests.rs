use std::io;

use camino::Utf8Path;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{
    ExampleValue, FileSink, TemplateOptions, TemplateSink, format_example_value, generate_config_file,
    generate_string,
};
use crate::schema::ObjectShape;
use crate::{EnvKeyMap, EnvRecord, EnvShapeError, EnvValue, SchemaNode};

#[rstest]
#[case::string(EnvValue::from("test"), "\"test\"")]
#[case::empty_string(EnvValue::from(""), "\"\"")]
#[case::truth(EnvValue::from(true), "true")]
#[case::falsehood(EnvValue::from(false), "")]
#[case::null(EnvValue::Null, "")]
fn example_values_are_rewritten(#[case] value: EnvValue, #[case] expected: &str) {
    assert_eq!(
        format_example_value(&value),
        ExampleValue::Text(expected.to_owned())
    );
}

#[rstest]
#[case::number(EnvValue::from(123_i64), "123")]
#[case::undefined(EnvValue::Undefined, "undefined")]
fn other_example_values_pass_through(#[case] value: EnvValue, #[case] rendered: &str) {
    let formatted = format_example_value(&value);
    assert_eq!(formatted, ExampleValue::Unchanged(&value));
    assert_eq!(formatted.to_string(), rendered);
}

#[fixture]
fn api_schema() -> SchemaNode {
    SchemaNode::object([(
        "config",
        SchemaNode::object([
            ("hostName", SchemaNode::string().coerce()),
            ("port", SchemaNode::number().coerce()),
            ("autoStart", SchemaNode::boolean().coerce()),
        ]),
    )])
}

#[fixture]
fn api_map() -> EnvKeyMap {
    [
        ("config.hostName", "API_HOST"),
        ("config.port", "API_PORT"),
        ("config.autoStart", "API_AUTO_START"),
    ]
    .into_iter()
    .collect()
}

#[fixture]
fn api_example() -> EnvRecord {
    [
        ("API_HOST", EnvValue::from("test-env-var")),
        ("API_PORT", EnvValue::from(123_i64)),
        ("API_AUTO_START", EnvValue::from(false)),
    ]
    .into_iter()
    .collect()
}

const API_TEMPLATE: &str = "#config.config.hostName\nAPI_HOST=\"test-env-var\"\n\n\
#config.config.port\nAPI_PORT=123\n\n\
#config.config.autoStart\nAPI_AUTO_START=\n";

#[rstest]
fn stanzas_follow_declaration_order(
    api_schema: SchemaNode,
    api_map: EnvKeyMap,
    api_example: EnvRecord,
) {
    assert_eq!(
        generate_string(&api_schema, &api_map, &api_example),
        API_TEMPLATE
    );
}

#[rstest]
fn top_level_fields_use_bare_paths(api_map: EnvKeyMap, api_example: EnvRecord) {
    let schema = SchemaNode::object([
        ("hostName", SchemaNode::string()),
        ("port", SchemaNode::number()),
        ("autoStart", SchemaNode::boolean()),
    ]);
    let map: EnvKeyMap = api_map
        .iter()
        .map(|(path, key)| (path.as_str().trim_start_matches("config."), key))
        .collect();

    assert_eq!(
        generate_string(&schema, &map, &api_example),
        "#config.hostName\nAPI_HOST=\"test-env-var\"\n\n\
#config.port\nAPI_PORT=123\n\n\
#config.autoStart\nAPI_AUTO_START=\n"
    );
}

#[test]
fn nested_paths_and_missing_mappings_render() {
    let schema = SchemaNode::object([
        ("db", SchemaNode::object([("url", SchemaNode::string())])),
        ("debug", SchemaNode::boolean()),
    ]);
    let map: EnvKeyMap = [("db.url", "DATABASE_URL")].into_iter().collect();
    let example: EnvRecord = [("DATABASE_URL", "postgres://localhost/app")]
        .into_iter()
        .collect();

    let rendered = generate_string(&schema, &map, &example);

    assert_eq!(
        rendered,
        "#config.db.url\nDATABASE_URL=\"postgres://localhost/app\"\n\n#config.debug\nundefined=undefined\n"
    );
}

#[test]
fn empty_schemas_render_a_single_newline() {
    let rendered = generate_string(
        &SchemaNode::Object(ObjectShape::new()),
        &EnvKeyMap::new(),
        &EnvRecord::new(),
    );
    assert_eq!(rendered, "\n");
}

struct FailingSink;

impl TemplateSink for FailingSink {
    fn write(&mut self, _path: &Utf8Path, _contents: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

#[test]
fn sink_failures_propagate_with_the_path() {
    let schema = SchemaNode::object([("port", SchemaNode::number())]);
    let map: EnvKeyMap = [("port", "PORT")].into_iter().collect();
    let options = TemplateOptions {
        schema: &schema,
        config_map: &map,
        example: &EnvRecord::new(),
        file_path: Utf8Path::new("/readonly/.env.example"),
    };

    let err = generate_config_file(&options, &mut FailingSink).expect_err("sink refuses writes");

    assert!(matches!(
        &*err,
        EnvShapeError::Io { path, source }
            if path.as_str() == "/readonly/.env.example"
                && source.kind() == io::ErrorKind::PermissionDenied
    ));
}

#[rstest]
fn file_sink_writes_the_rendered_template(
    api_schema: SchemaNode,
    api_map: EnvKeyMap,
    api_example: EnvRecord,
) {
    let dir = TempDir::new().expect("create temp dir");
    let target = camino::Utf8PathBuf::from_path_buf(dir.path().join(".env.example"))
        .expect("temp path is UTF-8");
    std::fs::write(&target, "stale contents that are longer than the template\n".repeat(8))
        .expect("seed stale file");

    let contents = generate_config_file(
        &TemplateOptions {
            schema: &api_schema,
            config_map: &api_map,
            example: &api_example,
            file_path: &target,
        },
        &mut FileSink,
    )
    .expect("write template");

    assert_eq!(contents, API_TEMPLATE);
    assert_eq!(
        std::fs::read_to_string(&target).expect("read template"),
        API_TEMPLATE
    );
}

#[test]
fn file_sink_rejects_paths_without_a_file_name() {
    let err = FileSink
        .write(Utf8Path::new("/"), "")
        .expect_err("root is not a file");
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}
