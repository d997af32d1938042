//! autoforge - CLI entry point.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dialoguer::{Confirm, Input};
use git2::Repository;

use autoforge::apply::{commit_staged, create_branch, validate_branch_name};
use autoforge::diff::collect::discover_repository;
use autoforge::diff::{collect_staged_diff, is_fully_redacted, redact_diff};
use autoforge::error::DiffError;
use autoforge::render::{MAX_SLUG_LENGTH, MIN_SLUG_LENGTH};
use autoforge::{CommitType, EngineConfig, FallbackEngine};

/// Generate commit messages and branch names from diffs, offline.
#[derive(Parser, Debug)]
#[command(name = "autoforge")]
#[command(about = "Generate Conventional Commit messages and branch names from git diffs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a commit message for the staged changes
    Commit {
        #[command(flatten)]
        input: DiffArgs,

        /// Mark the change as breaking (`type(scope)!:`)
        #[arg(long)]
        breaking: bool,

        /// Commit the staged changes with the generated message
        #[arg(long)]
        apply: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print a branch name for the staged changes
    Branch {
        #[command(flatten)]
        input: DiffArgs,

        /// Create and check out the branch
        #[arg(long)]
        create: bool,

        /// After creating the branch, commit the staged changes on it
        #[arg(long, requires = "create")]
        commit: bool,

        /// Skip the confirmation prompts
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the full analysis as JSON
    Analyze {
        #[command(flatten)]
        input: DiffArgs,
    },

    /// Answer a prompt read from stdin (diff after a `Diff:` marker)
    Complete {
        /// Do not redact secrets from the prompt
        #[arg(long)]
        no_redact: bool,
    },
}

#[derive(Args, Debug)]
struct DiffArgs {
    /// Read the diff from a file (`-` for stdin) instead of the staged changes
    #[arg(long, value_name = "PATH")]
    diff: Option<PathBuf>,

    /// Do not redact sensitive files and secret values
    #[arg(long)]
    no_redact: bool,

    /// Override the inferred commit type
    #[arg(long = "type", value_name = "TYPE")]
    commit_type: Option<CommitType>,

    /// Override the inferred scope
    #[arg(long)]
    scope: Option<String>,

    /// Maximum branch slug length
    #[arg(long, default_value_t = MAX_SLUG_LENGTH, value_parser = parse_slug_length)]
    max_slug_length: usize,

    /// Extra word to drop from branch names (repeatable)
    #[arg(long = "stop-word", value_name = "WORD")]
    stop_words: Vec<String>,
}

impl DiffArgs {
    fn engine(&self) -> FallbackEngine {
        let config = EngineConfig::default()
            .with_max_slug_length(self.max_slug_length)
            .with_stop_words(&self.stop_words)
            .with_scope(self.scope.clone())
            .with_type(self.commit_type);
        FallbackEngine::new(config)
    }

    /// Diff text to analyze, redacted unless disabled.
    fn load(&self) -> Result<String> {
        let raw = match &self.diff {
            Some(path) => read_diff_source(path)?,
            None => {
                let repo = open_repo()?;
                collect_staged_diff(&repo)
                    .context("Failed to collect staged changes")?
                    .diff_text
            }
        };

        if self.no_redact {
            return Ok(raw);
        }
        Ok(redact(&raw))
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Commit {
            input,
            breaking,
            apply,
            yes,
        } => {
            let diff = input.load()?;
            let message = input.engine().analyze(&diff).commit_message(breaking);

            if !apply {
                println!("{message}");
                return Ok(());
            }

            let message = confirm_or_edit("Commit message", message, yes)?;
            let repo = open_repo()?;
            let oid = commit_staged(&repo, &message).context("Failed to create commit")?;
            println!("✓ Committed {}: {}", short_oid(&oid.to_string()), message);
        }
        Command::Branch {
            input,
            create,
            commit,
            yes,
        } => {
            let diff = input.load()?;
            let analysis = input.engine().analyze(&diff);

            if !create {
                println!("{}", analysis.branch_name);
                return Ok(());
            }

            let name = confirm_or_edit("Branch name", analysis.branch_name.clone(), yes)?;
            validate_branch_name(&name)?;
            let repo = open_repo()?;
            create_branch(&repo, &name).context("Failed to create branch")?;
            println!("✓ Switched to new branch {name}");

            if commit {
                let message = confirm_or_edit("Commit message", analysis.commit_message(false), yes)?;
                let oid = commit_staged(&repo, &message).context("Failed to create commit")?;
                println!("✓ Committed {}: {}", short_oid(&oid.to_string()), message);
            }
        }
        Command::Analyze { input } => {
            let diff = input.load()?;
            let analysis = input.engine().analyze(&diff);
            let json = serde_json::to_string_pretty(&analysis)
                .context("Failed to serialize analysis")?;
            println!("{json}");
        }
        Command::Complete { no_redact } => {
            let prompt = read_stdin()?;
            let prompt = if no_redact {
                prompt
            } else {
                redact_diff(&prompt).text
            };
            println!("{}", FallbackEngine::default().complete(&prompt));
        }
    }

    Ok(())
}

fn open_repo() -> Result<Repository> {
    discover_repository(Path::new("."))
        .context("Not a git repository. Run autoforge from within a git repository or pass --diff.")
}

/// Read diff text from a file, or from stdin for `-`.
fn read_diff_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return read_stdin();
    }
    std::fs::read_to_string(path)
        .map_err(|source| DiffError::ReadFailed {
            path: path.display().to_string(),
            source,
        })
        .map_err(Into::into)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|source| DiffError::ReadFailed {
            path: "<stdin>".to_string(),
            source,
        })?;
    Ok(text)
}

/// Redact secrets; a diff made only of omitted files becomes empty.
fn redact(raw: &str) -> String {
    let redacted = redact_diff(raw);
    if redacted.sensitive_detected && is_fully_redacted(&redacted.text) {
        return String::new();
    }
    redacted.text
}

/// Let the user edit and confirm a generated value unless `yes` is set.
fn confirm_or_edit(label: &str, value: String, yes: bool) -> Result<String> {
    if yes {
        return Ok(value);
    }

    let edited: String = Input::new()
        .with_prompt(label)
        .with_initial_text(value)
        .interact_text()
        .context("Prompt cancelled")?;

    let edited = edited.trim().to_string();
    if edited.is_empty() {
        bail!("{label} cannot be empty");
    }

    let proceed = Confirm::new()
        .with_prompt("Proceed?")
        .default(true)
        .interact()
        .context("Prompt cancelled")?;
    if !proceed {
        bail!("Aborted by user");
    }

    Ok(edited)
}

fn short_oid(oid: &str) -> &str {
    &oid[..oid.len().min(7)]
}

/// `--max-slug-length` must leave room for a scope and at least one word.
fn parse_slug_length(raw: &str) -> Result<usize, String> {
    let value: usize = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if value < MIN_SLUG_LENGTH {
        return Err(format!("must be at least {MIN_SLUG_LENGTH}"));
    }
    Ok(value)
}
