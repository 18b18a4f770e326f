use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "gh-project-badge")]
#[command(about = "Status badges for classic GitHub project boards", version)]
#[command(after_help = "EXAMPLES:
    gh-project-badge project github 1        Open/closed state of a project
    gh-project-badge cards github 1          Card count per column
    gh-project-badge cards github 1 -o json  Badge descriptor as JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress informational messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and the full error chain
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Badge showing whether a project is open or closed
    #[command(
        alias = "p",
        after_help = "EXAMPLES:
    gh-project-badge project github 1
    gh-project-badge project my-org 12 --format compact"
    )]
    Project(BadgeArgs),
    /// Badge listing each column of a project with its card count
    #[command(
        alias = "c",
        after_help = "EXAMPLES:
    gh-project-badge cards github 1
    gh-project-badge cards my-org 12 --json"
    )]
    Cards(BadgeArgs),
    /// List the available badge services with their routes and examples
    Services,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    gh-project-badge completions bash > ~/.bash_completion.d/gh-project-badge
    gh-project-badge completions zsh > ~/.zfunc/_gh-project-badge")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Args, Clone, Debug)]
pub struct BadgeArgs {
    /// Organization login (e.g., github)
    pub org: String,

    /// Project number as shown in the project URL
    pub project_id: String,
}
