//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::domain::review::RunOptions;
use crate::domain::target::TargetOverrides;

#[derive(Debug, Parser)]
#[command(name = "prfeedback")]
#[command(about = "Publish AI review feedback as one pull request comment per file")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Feedback JSON file (reads stdin when omitted or "-")
    #[arg(long, short = 'f')]
    feedback: Option<String>,

    /// Sign-off appended to every comment; also identifies the bot's comments
    #[arg(long)]
    sign_off: Option<String>,

    /// Pull request URL (overrides the CI event)
    #[arg(long, conflicts_with_all = ["repository", "pr_number"])]
    pr_url: Option<String>,

    /// Repository as owner/repo (defaults to GITHUB_REPOSITORY)
    #[arg(long)]
    repository: Option<String>,

    /// Pull request number (defaults to the CI event payload)
    #[arg(long)]
    pr_number: Option<u64>,

    /// Print comments to stdout, do not post
    #[arg(long)]
    dry_run: bool,

    /// Exit non-zero when any feedback fails to publish
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and token sources
    Config,
}

pub enum CliAction {
    InspectConfig,
    Publish(RunOptions),
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            Some(Commands::Config) => CliAction::InspectConfig,
            None => CliAction::Publish(RunOptions {
                feedback_path: self.feedback,
                sign_off: self.sign_off.filter(|s| !s.trim().is_empty()),
                target: TargetOverrides {
                    pr_url: self.pr_url,
                    repository: self.repository,
                    pr_number: self.pr_number,
                },
                dry_run: self.dry_run,
                strict: self.strict,
            }),
        }
    }
}
