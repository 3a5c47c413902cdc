//! commit-suggest - CLI entry point.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use tracing_subscriber::EnvFilter;

use commit_suggest::apply::commit_with_view;
use commit_suggest::error::CommitError;
use commit_suggest::surface::generate_commit_suggestion;
use commit_suggest::{
    CaptureMode, CommandPresenter, Endpoint, FormInput, FormPresenter, HttpGenerationClient,
    Orchestrator, Outcome, OutputFormat, ViewModel, Workspace, WorkspaceDiff,
};

/// Generate commit message and pull request suggestions from a git diff.
#[derive(Parser, Debug)]
#[command(name = "commit-suggest")]
#[command(about = "Generate commit message and pull request suggestions from a git diff")]
#[command(version)]
struct Cli {
    /// Base URL of the generation service (overrides COMMIT_SUGGEST_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Print the result as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Capture the workspace diff and generate a suggestion
    Generate {
        /// Workspace folder to bind (repeatable; the first one is used).
        /// Defaults to the repository containing the current directory.
        #[arg(long = "workspace")]
        workspaces: Vec<PathBuf>,

        /// Diff the index instead of everything since the last commit
        #[arg(long)]
        staged: bool,

        /// Commit the staged changes with the generated message
        #[arg(long, requires = "staged")]
        commit: bool,

        /// Skip the commit confirmation prompt
        #[arg(short = 'y', long, requires = "commit")]
        yes: bool,
    },

    /// Generate a suggestion from a pasted diff
    Form {
        /// File containing the diff ("-" or omitted reads stdin)
        #[arg(long)]
        diff_file: Option<PathBuf>,

        /// Commit style: CONVENTIONAL, GITMOJI or PLAIN
        #[arg(long, default_value = "CONVENTIONAL")]
        style: String,

        /// Number of alternative messages (1-5)
        #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
        alternatives: i64,

        /// Generate a pull request title and body (default)
        #[arg(long, overrides_with = "no_pr")]
        pr: bool,

        /// Do not generate a pull request title and body
        #[arg(long, overrides_with = "pr")]
        no_pr: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let endpoint = Endpoint::resolve(cli.endpoint.as_deref())
        .context("Failed to resolve generation service endpoint")?;
    let client = HttpGenerationClient::new(&endpoint)
        .context("Failed to set up generation client")?;
    let orchestrator = Orchestrator::new(client);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match cli.command {
        Commands::Generate {
            workspaces,
            staged,
            commit,
            yes,
        } => {
            let workspace = if workspaces.is_empty() {
                let cwd = std::env::current_dir().context("Failed to read current directory")?;
                Workspace::discover(&cwd)
            } else {
                Workspace::new(workspaces)
            };
            let mode = if staged {
                CaptureMode::Staged
            } else {
                CaptureMode::Head
            };
            let source = WorkspaceDiff::new(workspace, mode);

            let mut presenter = CommandPresenter::new(io::stdout(), io::stderr(), format);
            let outcome = generate_commit_suggestion(&orchestrator, &source, &mut presenter).await;
            presenter.finish().context("Failed to write output")?;

            let Outcome::Done(view) = outcome else {
                return Ok(ExitCode::FAILURE);
            };

            if commit {
                let workdir = source
                    .workspace()
                    .first_folder()
                    .context("No workspace folder to commit in")?;
                if let Err(e) = confirm_and_commit(workdir, &view, yes) {
                    eprintln!("Error: {}", e);
                    return Ok(ExitCode::FAILURE);
                }
                eprintln!("✓ Committed: {}", view.commit_message());
            }

            Ok(ExitCode::SUCCESS)
        }
        Commands::Form {
            diff_file,
            style,
            alternatives,
            pr,
            no_pr,
        } => {
            let diff = read_diff_input(diff_file.as_deref())?;
            let input = FormInput {
                diff,
                style,
                num_alternatives: alternatives,
                generate_pr: wants_pr(pr, no_pr),
            };

            let mut presenter = FormPresenter::new(io::stdout(), io::stderr(), format);
            let outcome = input.submit(&orchestrator, &mut presenter).await;
            presenter.finish().context("Failed to write output")?;

            Ok(if outcome.is_done() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// `--pr` and `--no-pr` override each other; the last one given wins.
fn wants_pr(pr: bool, no_pr: bool) -> bool {
    pr || !no_pr
}

/// Install the tracing subscriber; logs go to stderr.
fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(io::stderr)
        .try_init();
}

/// `RUST_LOG` (or `warn`) as the base, with `--verbose` layered on top.
fn log_filter(verbose: bool) -> EnvFilter {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if !verbose {
        return filter;
    }
    match "commit_suggest=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Read the diff text from a file, or from stdin for `None` / `-`.
fn read_diff_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read diff from {}", p.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read diff from stdin")?;
            Ok(text)
        }
    }
}

/// Ask before committing unless `yes` was given.
fn confirm_and_commit(workdir: &Path, view: &ViewModel, yes: bool) -> Result<(), CommitError> {
    if view.commit_message_missing() {
        return Err(CommitError::EmptyMessage);
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Commit staged changes as \"{}\"?", view.commit_message()))
            .default(true)
            .interact()
            .map_err(|_| CommitError::Cancelled)?;

        if !confirmed {
            return Err(CommitError::Cancelled);
        }
    }

    commit_with_view(workdir, view)
}
