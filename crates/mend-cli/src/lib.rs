//! Command-line runtime for the mend refactoring tool.
//!
//! The binary entrypoint delegates to [`run`], which parses arguments,
//! installs telemetry, and dispatches to the `list` and `apply`
//! commands. IO streams are passed in so the runtime can be exercised
//! with in-memory writers.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context as _, anyhow};
use camino::Utf8PathBuf;
use clap::Parser as _;
use mend_rewrite::{Context, Rewriter};
use mend_tree::{SourceParser, SourcePrinter};
use serde::Serialize;
use tracing::info;

mod cli;
pub mod telemetry;

use cli::{Cli, CliCommand};

const EXIT_UNKNOWN_RECIPE: u8 = 2;

/// Parses `args` and runs the selected command.
///
/// Output intended for consumption goes to `stdout`; diagnostics and
/// progress go to `stderr`. Returns the process exit code: zero on
/// success, one for I/O and parse failures, two for usage errors and
/// unknown recipes.
pub fn run<I, T, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return report_usage_error(&error, stdout, stderr),
    };
    if let Err(error) = telemetry::initialise(&cli.log_filter) {
        drop(writeln!(stderr, "mend: {error}"));
        return ExitCode::FAILURE;
    }

    let outcome = match cli.command {
        CliCommand::List { json } => list(json, stdout).map(|()| ExitCode::SUCCESS),
        CliCommand::Apply {
            recipe,
            write,
            files,
        } => apply(&recipe, write, &files, stdout, stderr),
    };
    match outcome {
        Ok(code) => code,
        Err(error) => {
            drop(writeln!(stderr, "mend: {error:#}"));
            ExitCode::FAILURE
        }
    }
}

fn report_usage_error<W: Write, E: Write>(
    error: &clap::Error,
    stdout: &mut W,
    stderr: &mut E,
) -> ExitCode {
    let rendered = error.render();
    if error.use_stderr() {
        drop(write!(stderr, "{rendered}"));
        ExitCode::from(EXIT_UNKNOWN_RECIPE)
    } else {
        // Help and version output belong on stdout and exit cleanly.
        drop(write!(stdout, "{rendered}"));
        ExitCode::SUCCESS
    }
}

#[derive(Serialize)]
struct RecipeInfo<'a> {
    name: &'a str,
    display_name: &'a str,
    description: &'a str,
}

fn list<W: Write>(json: bool, stdout: &mut W) -> anyhow::Result<()> {
    let recipes = mend_recipes::all()?;
    if json {
        let infos: Vec<RecipeInfo<'_>> = recipes
            .iter()
            .map(|recipe| RecipeInfo {
                name: recipe.name(),
                display_name: recipe.display_name(),
                description: recipe.description(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *stdout, &infos)?;
        writeln!(stdout)?;
    } else {
        for recipe in &recipes {
            writeln!(stdout, "{}: {}", recipe.name(), recipe.display_name())?;
            writeln!(stdout, "    {}", recipe.description())?;
        }
    }
    Ok(())
}

fn apply<W: Write, E: Write>(
    name: &str,
    write: bool,
    files: &[Utf8PathBuf],
    stdout: &mut W,
    stderr: &mut E,
) -> anyhow::Result<ExitCode> {
    let Some(recipe) = mend_recipes::find(name)? else {
        writeln!(stderr, "mend: unknown recipe '{name}'")?;
        return Ok(ExitCode::from(EXIT_UNKNOWN_RECIPE));
    };

    let parser = mend_lang::Parser::new();
    let printer = mend_lang::Printer::new();
    let rewriter = Rewriter::new(Context::new(&parser));

    for file in files {
        let source =
            fs::read_to_string(file).with_context(|| format!("reading {file}"))?;
        let root = parser
            .parse(&source)
            .map_err(|error| anyhow!("parsing {file}: {error}"))?;
        let outcome = rewriter
            .apply(recipe.as_ref(), &root)
            .with_context(|| format!("rewriting {file}"))?;
        let replacements = outcome.num_replacements();
        info!(file = %file, replacements, "recipe applied");

        if write {
            if outcome.has_changes() {
                let output = printer.print(outcome.root());
                fs::write(file, output).with_context(|| format!("writing {file}"))?;
            }
            writeln!(stderr, "{file}: {replacements} replacement(s)")?;
        } else {
            stdout.write_all(printer.print(outcome.root()).as_bytes())?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
