//! End-to-end loading of the three-field API schema.
//!
//! Covers the coercion behaviour callers rely on when a flat environment is
//! turned into a validated nested configuration.

use anyhow::{Result, anyhow, ensure};
use envshape::{EnvRecord, EnvValue, load_validated_schema};
use rstest::rstest;
use serde_json::{Value, json};
use test_helpers::fixtures::{api_map, api_schema};

fn load(env: EnvRecord) -> Result<Value> {
    load_validated_schema(&api_schema(), &api_map(), &env).map_err(|err| anyhow!(err.to_string()))
}

fn api_env(auto_start: Option<&str>) -> EnvRecord {
    let mut env: EnvRecord = [
        ("API_HOST", EnvValue::from(123_i64)),
        ("API_PORT", EnvValue::from("456")),
    ]
    .into_iter()
    .collect();
    if let Some(raw) = auto_start {
        env.insert("API_AUTO_START", raw);
    }
    env
}

#[rstest]
#[case::empty_string(Some(""), false)]
#[case::false_is_truthy(Some("false"), true)]
#[case::zero_is_truthy(Some("0"), true)]
#[case::omitted(None, false)]
fn auto_start_follows_string_truthiness(
    #[case] auto_start: Option<&str>,
    #[case] expected: bool,
) -> Result<()> {
    let config = load(api_env(auto_start))?;
    let want = json!({"hostName": "123", "port": 456, "autoStart": expected});
    ensure!(config == want, "expected {want}, got {config}");
    Ok(())
}

#[test]
fn missing_port_is_a_validation_error() -> Result<()> {
    let env: EnvRecord = [("API_HOST", "localhost"), ("API_AUTO_START", "1")]
        .into_iter()
        .collect();

    let Err(err) = load_validated_schema(&api_schema(), &api_map(), &env) else {
        return Err(anyhow!("expected API_PORT to be required"));
    };
    ensure!(err.has_issue_at("port"), "issues: {err}");
    ensure!(err.len() == 1, "expected one issue, got {}", err.len());
    Ok(())
}

#[test]
fn unparseable_port_is_a_validation_error() -> Result<()> {
    let mut env = api_env(None);
    env.insert("API_PORT", "eighty");

    let Err(err) = load_validated_schema(&api_schema(), &api_map(), &env) else {
        return Err(anyhow!("expected a non-numeric port to fail"));
    };
    ensure!(err.has_issue_at("port"), "issues: {err}");
    Ok(())
}
