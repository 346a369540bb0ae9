mod config;
mod error;
mod run;

use std::process::ExitCode;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ActionConfig;
use crate::error::{CliError, Result};

/// Each option falls back to the variable GitHub Actions sets for the
/// matching `with:` input.
#[derive(Parser)]
#[command(name = "changeset-action")]
#[command(version = env!("CHANGESET_ACTION_VERSION"))]
#[command(about = "Version or publish packages from pending changesets", long_about = None)]
pub(crate) struct Cli {
    /// Working directory of the project, relative to the current directory
    #[arg(long, env = "INPUT_CWD")]
    cwd: Option<String>,

    /// Set the git user to github-actions[bot]
    #[arg(
        long,
        env = "INPUT_SETUPGITUSER",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    setup_git_user: bool,

    /// Script that publishes unreleased packages
    #[arg(long, env = "INPUT_PUBLISH")]
    publish: Option<String>,

    /// Registry used for the auth check: npm, github or custom [default: npm]
    #[arg(long, env = "INPUT_REGISTRY")]
    registry: Option<String>,

    /// Pattern matched against .npmrc lines when the registry is custom
    #[arg(long, env = "INPUT_REGISTRYAUTHCHECK")]
    registry_auth_check: Option<String>,

    /// Script that versions packages and opens the release pull request
    #[arg(long, env = "INPUT_VERSION")]
    version_script: Option<String>,

    /// Title of the release pull request
    #[arg(long, env = "INPUT_TITLE")]
    title: Option<String>,

    /// Commit message of the version commit
    #[arg(long, env = "INPUT_COMMIT")]
    commit: Option<String>,

    /// Branch the release pull request targets
    #[arg(long, env = "INPUT_BRANCH")]
    branch: Option<String>,

    /// Create GitHub releases for published packages
    #[arg(
        long,
        env = "INPUT_CREATEGITHUBRELEASES",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    create_github_releases: bool,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    #[arg(long, env = "NPM_TOKEN", hide_env_values = true)]
    npm_token: Option<String>,

    /// Directory holding the user .netrc, .npmrc and .yarnrc.yml files
    #[arg(long, env = "HOME")]
    home: Option<String>,

    /// File that receives the action outputs; printed to stdout when unset
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<String>,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            print_error(&CliError::Usage(e));
            return ExitCode::FAILURE;
        }
    };

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<()> {
    let current_dir = std::env::current_dir().map_err(CliError::CurrentDir)?;
    let config = ActionConfig::from_cli(cli, &current_dir)?;

    let result = run::run(&config)?;
    info!(
        published = result.is_published(),
        has_changesets = result.has_changesets(),
        "changeset action finished"
    );
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_error(error: &CliError) {
    let mut lines = vec![error.to_string()];

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        lines.push(format!("caused by: {cause}"));
        source = std::error::Error::source(cause);
    }

    let message = lines.join("\n");
    error!("{message}");
    println!("::error::{}", escape_workflow_data(&message));
}

/// Escapes a message for use as the data of a workflow command.
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
