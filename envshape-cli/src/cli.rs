//! Command-line interface definitions for `envshape`.

use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Parsed CLI arguments for `envshape`.
#[derive(Debug, Parser)]
#[command(name = "envshape")]
#[command(about = "Render and check environment configuration from a schema manifest")]
#[command(version)]
pub struct Args {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render an example environment file from the manifest.
    Template(TemplateArgs),
    /// Validate the current environment against the manifest.
    Check(CheckArgs),
}

/// Arguments for `envshape template`.
#[derive(Debug, ClapArgs)]
pub struct TemplateArgs {
    /// Manifest describing the schema and keys (`.toml` or `.json`).
    #[arg(long, value_name = "path")]
    pub manifest: Utf8PathBuf,
    /// File to write.
    #[arg(long, value_name = "path", default_value = ".env.example")]
    pub out: Utf8PathBuf,
    /// Print the template instead of writing a file.
    #[arg(long = "stdout", conflicts_with = "out")]
    pub should_print: bool,
}

/// Arguments for `envshape check`.
#[derive(Debug, ClapArgs)]
pub struct CheckArgs {
    /// Manifest describing the schema and keys (`.toml` or `.json`).
    #[arg(long, value_name = "path")]
    pub manifest: Utf8PathBuf,
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::Parser;
    use rstest::rstest;

    #[rstest]
    fn template_defaults_to_env_example() {
        let args = Args::try_parse_from(["envshape", "template", "--manifest", "app.toml"])
            .expect("template arguments parse");
        let Command::Template(template) = args.command else {
            panic!("expected the template command");
        };
        assert_eq!(template.manifest, "app.toml");
        assert_eq!(template.out, ".env.example");
        assert!(!template.should_print);
    }

    #[rstest]
    fn stdout_conflicts_with_an_explicit_out() {
        let result = Args::try_parse_from([
            "envshape",
            "template",
            "--manifest",
            "app.toml",
            "--out",
            "x.env",
            "--stdout",
        ]);
        assert!(result.is_err());
    }

    #[rstest]
    fn check_requires_a_manifest() {
        assert!(Args::try_parse_from(["envshape", "check"]).is_err());
        let args = Args::try_parse_from(["envshape", "check", "--manifest", "app.json"])
            .expect("check arguments parse");
        assert!(matches!(args.command, Command::Check(check) if check.manifest == "app.json"));
    }
}
