//! debcl - CLI entry point.
//!
//! Plays the editor's part: loads the changelog, takes the cursor and
//! selection from flags, and writes the planned edits back in one step.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use debcl::changelog::now_local;
use debcl::commands::{plan_continuation, plan_date_update, plan_new_entry, NewEntryRequest};
use debcl::document::{Document, Position, TextEdit, TextRange};
use debcl::identity::config::default_config_path;
use debcl::identity::{
    resolve_identity, DialoguerPrompter, EnvIdentity, IdentityConfig, IdentityPrompter,
};

/// Environment variable holding the log filter.
const LOG_ENV_VAR: &str = "DEBCL_LOG";

/// Create and update Debian changelog entries.
#[derive(Parser, Debug)]
#[command(name = "debcl")]
#[command(about = "Create and update Debian changelog entries")]
#[command(version)]
struct Cli {
    /// Path to the identity config file (default: $DEBCL_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert a new entry with the version after the nearest header below the cursor
    New(NewArgs),

    /// Set the date of the entry around the cursor to now
    UpdateDate(UpdateDateArgs),

    /// Store the name used in entry trailers
    SetName {
        /// Full name (prompted when omitted)
        name: Option<String>,
    },

    /// Store the email address used in entry trailers
    SetEmail {
        /// Email address (prompted when omitted)
        email: Option<String>,
    },

    /// Insert a "- " marker when moving from a bullet onto an indented blank line
    Continue(ContinueArgs),
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Path to the changelog file
    #[arg(default_value = "debian/changelog")]
    file: PathBuf,

    /// Cursor line (1-based)
    #[arg(short, long, default_value = "1", value_parser = parse_line)]
    line: usize,

    /// Act on the file even if its name does not end in "changelog"
    #[arg(long)]
    force: bool,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print the resulting changelog instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Print the computed plan as JSON instead of writing the file
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct NewArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Cursor column (0-based, in characters)
    #[arg(short, long, default_value_t = 0, conflicts_with = "at_end")]
    column: usize,

    /// Put the cursor at the end of its line, taking the line's text as the message
    #[arg(long)]
    at_end: bool,

    /// Select from the cursor to LINE:COLUMN and use the selection as the message
    #[arg(long, value_name = "LINE:COLUMN", value_parser = parse_position)]
    select_to: Option<Position>,

    /// Entry message; each line becomes a bullet
    #[arg(short, long, conflicts_with = "select_to")]
    message: Option<String>,

    /// Fail instead of prompting for a missing name or email
    #[arg(long)]
    no_prompt: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct UpdateDateArgs {
    #[command(flatten)]
    target: TargetArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ContinueArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Cursor column (0-based, in characters)
    #[arg(short, long, default_value_t = 0)]
    column: usize,

    /// Line the cursor moved from (1-based)
    #[arg(long, value_parser = parse_line)]
    from_line: usize,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::New(args) => run_new(&config_path(cli.config)?, args),
        Command::UpdateDate(args) => run_update_date(args),
        Command::SetName { name } => run_set_name(&config_path(cli.config)?, name),
        Command::SetEmail { email } => run_set_email(&config_path(cli.config)?, email),
        Command::Continue(args) => run_continue(args),
    }
}

fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(default_config_path()?),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_new(config_path: &Path, args: NewArgs) -> Result<()> {
    let mut config = IdentityConfig::load(config_path).context("Failed to load config")?;

    let interactive = !args.no_prompt && std::io::stdin().is_terminal();
    let prompter: Option<&dyn IdentityPrompter> = if interactive {
        Some(&DialoguerPrompter)
    } else {
        None
    };
    let resolved = resolve_identity(&mut config, &EnvIdentity::from_env(), prompter);

    // Prompted input is kept even when the other field is still missing.
    if config.is_modified() {
        config.save().context("Failed to save identity")?;
        eprintln!("✓ Identity saved to {}", config.path().display());
    }
    let resolved = resolved?;

    let document = load_document(&args.target)?;
    let line = args.target.line - 1;
    let column = match (&document, args.at_end) {
        (Some(doc), true) => doc.line(line).map_or(0, |l| l.chars().count()),
        _ => args.column,
    };
    let cursor = Position::new(line, column);

    let date = now_local();
    let request = NewEntryRequest {
        cursor,
        selection: args.select_to.map(|end| TextRange::new(cursor, end)),
        message: args.message.as_deref(),
        identity: &resolved.identity,
        date: &date,
    };
    let plan = plan_new_entry(document.as_ref(), &request)?;

    finish(
        &args.target.file,
        document,
        std::slice::from_ref(&plan.edit),
        &args.output,
        &plan,
    )?;

    if !args.output.json && !args.output.dry_run {
        println!(
            "✓ Added {} ({}) to {}; cursor at {}:{}",
            plan.previous.title,
            plan.new_version,
            args.target.file.display(),
            plan.cursor.line + 1,
            plan.cursor.column
        );
    }
    Ok(())
}

fn run_update_date(args: UpdateDateArgs) -> Result<()> {
    let document = load_document(&args.target)?;
    let date = now_local();
    let plan = plan_date_update(document.as_ref(), args.target.line - 1, &date)?;

    finish(
        &args.target.file,
        document,
        std::slice::from_ref(&plan.edit),
        &args.output,
        &plan,
    )?;

    if !args.output.json && !args.output.dry_run {
        println!("✓ Changelog date updated successfully!");
    }
    Ok(())
}

fn run_set_name(config_path: &Path, name: Option<String>) -> Result<()> {
    let mut config = IdentityConfig::load(config_path).context("Failed to load config")?;
    let Some(name) = name.or_else(|| DialoguerPrompter.prompt_name()) else {
        warn!("Name input was cancelled.");
        return Ok(());
    };

    config.set_name(&name)?;
    config.save().context("Failed to save name")?;
    println!("✓ Name saved successfully!");
    Ok(())
}

fn run_set_email(config_path: &Path, email: Option<String>) -> Result<()> {
    let mut config = IdentityConfig::load(config_path).context("Failed to load config")?;
    let Some(email) = email.or_else(|| DialoguerPrompter.prompt_email()) else {
        warn!("Email address input was cancelled.");
        return Ok(());
    };

    config.set_email(&email)?;
    config.save().context("Failed to save email address")?;
    println!("✓ Email address saved successfully!");
    Ok(())
}

fn run_continue(args: ContinueArgs) -> Result<()> {
    let document = load_document(&args.target)?;
    let cursor = Position::new(args.target.line - 1, args.column);
    let edit = plan_continuation(document.as_ref(), args.from_line - 1, cursor)?;
    let edits: Vec<TextEdit> = edit.into_iter().collect();

    finish(&args.target.file, document, &edits, &args.output, &edits)
}

/// Load the changelog. A missing file, or one that is not named like a
/// changelog, means there is no document to act on.
fn load_document(target: &TargetArgs) -> Result<Option<Document>> {
    let path = &target.file;
    if !target.force && !is_changelog_path(path) {
        warn!(
            "{} is not a changelog file (use --force to edit it anyway)",
            path.display()
        );
        return Ok(None);
    }
    if !path.exists() {
        warn!("{} does not exist", path.display());
        return Ok(None);
    }
    Ok(Some(Document::load(path)?))
}

/// Whether the file name ends in `changelog`, e.g. `debian/changelog`.
fn is_changelog_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with("changelog"))
}

/// Apply `edits` and write the file, or print instead for dry runs and JSON.
fn finish<T: Serialize>(
    path: &Path,
    document: Option<Document>,
    edits: &[TextEdit],
    output: &OutputArgs,
    plan: &T,
) -> Result<()> {
    if output.json {
        let json = serde_json::to_string_pretty(plan).context("Failed to serialize plan")?;
        println!("{}", json);
    }

    let Some(mut document) = document else {
        return Ok(());
    };
    if edits.is_empty() {
        return Ok(());
    }

    document.apply(edits)?;
    if output.dry_run {
        print!("{}", document.to_text());
    } else if !output.json {
        document
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn parse_line(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("lines are numbered from 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Parse `LINE:COLUMN` with a 1-based line and 0-based column.
fn parse_position(s: &str) -> Result<Position, String> {
    let (line, column) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COLUMN, got '{}'", s))?;
    let line = parse_line(line)?;
    let column = column.parse::<usize>().map_err(|e| e.to_string())?;
    Ok(Position::new(line - 1, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_rejects_zero() {
        assert!(parse_line("0").is_err());
        assert_eq!(parse_line("3"), Ok(3));
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("2:5"), Ok(Position::new(1, 5)));
        assert!(parse_position("2").is_err());
        assert!(parse_position("0:1").is_err());
    }

    #[test]
    fn test_is_changelog_path() {
        assert!(is_changelog_path(Path::new("debian/changelog")));
        assert!(is_changelog_path(Path::new("/tmp/pkg.changelog")));
        assert!(!is_changelog_path(Path::new("debian/control")));
        assert!(!is_changelog_path(Path::new("changelog/notes.txt")));
    }

    #[test]
    fn test_non_changelog_file_is_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("control");
        std::fs::write(&path, "myapp (1.0) stable; urgency=low\n").unwrap();

        let mut target = TargetArgs {
            file: path,
            line: 1,
            force: false,
        };
        assert!(load_document(&target).unwrap().is_none());

        target.force = true;
        assert!(load_document(&target).unwrap().is_some());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_message_conflicts_with_selection() {
        let result = Cli::try_parse_from([
            "debcl", "new", "-m", "x", "--select-to", "2:0",
        ]);
        assert!(result.is_err());
    }
}
