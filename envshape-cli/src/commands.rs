//! Command implementations.
//!
//! Commands write their normal output to the supplied writer and return
//! errors to the caller, so they run unchanged against in-memory buffers.

use std::io::Write;

use envshape::template::{TemplateOptions, TemplateSink, generate_config_file, generate_string};
use envshape::{EnvRecord, load_validated_schema};
use tracing::info;

use crate::cli::{Args, CheckArgs, Command, TemplateArgs};
use crate::error::CliError;
use crate::manifest::Manifest;

/// Dispatch the parsed command.
///
/// # Errors
///
/// Returns the error of the command that ran.
pub fn run<S, W>(args: &Args, env: &EnvRecord, sink: &mut S, out: &mut W) -> Result<(), CliError>
where
    S: TemplateSink + ?Sized,
    W: Write + ?Sized,
{
    match &args.command {
        Command::Template(template) => run_template(template, sink, out),
        Command::Check(check) => run_check(check, env, out),
    }
}

/// Render the manifest's example file.
///
/// With `--stdout` the template is written to `out`; otherwise it goes to
/// `sink` at the `--out` path and a confirmation line is written to `out`.
///
/// # Errors
///
/// Returns manifest, schema, sink, and output errors.
pub fn run_template<S, W>(args: &TemplateArgs, sink: &mut S, out: &mut W) -> Result<(), CliError>
where
    S: TemplateSink + ?Sized,
    W: Write + ?Sized,
{
    let manifest = Manifest::load(&args.manifest)?;
    let schema = manifest.schema()?;
    let config_map = manifest.key_map();

    if args.should_print {
        let contents = generate_string(&schema, &config_map, &manifest.example);
        out.write_all(contents.as_bytes())?;
        return Ok(());
    }

    generate_config_file(
        &TemplateOptions {
            schema: &schema,
            config_map: &config_map,
            example: &manifest.example,
            file_path: &args.out,
        },
        sink,
    )?;
    info!(path = %args.out, "rendered example environment file");
    writeln!(out, "wrote {}", args.out)?;
    Ok(())
}

/// Validate `env` against the manifest and print the configuration as
/// pretty JSON.
///
/// # Errors
///
/// Returns [`CliError::Validation`] listing every issue when the
/// environment does not satisfy the schema.
pub fn run_check<W>(args: &CheckArgs, env: &EnvRecord, out: &mut W) -> Result<(), CliError>
where
    W: Write + ?Sized,
{
    let manifest = Manifest::load(&args.manifest)?;
    let schema = manifest.schema()?;
    let config = load_validated_schema(&schema, &manifest.key_map(), env)?;
    let rendered = serde_json::to_string_pretty(&config)?;
    writeln!(out, "{rendered}")?;
    Ok(())
}
