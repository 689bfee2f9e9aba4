//! Clap CLI definitions for the `jira` command.
//!
//! The `issue` subtree is also the command surface that script actions are
//! dispatched to, so its flag names are part of the script format.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// jira -- scriptable Jira issue automation.
#[derive(Parser, Debug)]
#[command(
    name = "jira",
    about = "Scriptable Jira issue automation",
    long_about = "Create, edit and move Jira issues from the command line, and run YAML scripts that chain those operations together.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: $JIRA_CONFIG_FILE or ~/.config/.jira/.config.yml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Jira project key (overrides project.key from the config).
    #[arg(short = 'p', long, global = true)]
    pub project: Option<String>,

    /// Log HTTP traffic.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with issues.
    Issue(IssueArgs),

    /// Print the login of the authenticated user.
    Me,

    /// Print version information.
    Version,

    /// Generate shell completions.
    Completion(CompletionArgs),
}

// ---------------------------------------------------------------------------
// issue
// ---------------------------------------------------------------------------

/// Arguments for `jira issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    #[command(subcommand)]
    pub command: IssueCommands,
}

/// Issue subcommands.
#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// Create an issue.
    Create(CreateArgs),

    /// Duplicate an issue, optionally overriding some fields.
    #[command(name = "clone")]
    CloneIssue(CloneArgs),

    /// Edit an issue.
    Edit(EditArgs),

    /// Add or remove labels.
    Label(LabelArgs),

    /// Assign an issue to a user.
    Assign(AssignArgs),

    /// Manage comments.
    Comment(CommentArgs),

    /// Link two issues.
    Link(LinkArgs),

    /// Transition an issue to another state.
    #[command(name = "move", alias = "transition")]
    MoveCmd(MoveArgs),

    /// Show an issue.
    View(ViewArgs),

    /// Attach a TeamCity build artifact to an issue.
    Tclog(TclogArgs),

    /// Run a YAML script of issue actions.
    Script(ScriptArgs),
}

/// Arguments for `jira issue create`.
#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Issue type (default: issue.default_type from the config).
    #[arg(short = 't', long = "type")]
    pub issue_type: Option<String>,

    /// Issue summary.
    #[arg(short = 's', long)]
    pub summary: Option<String>,

    /// Issue description.
    #[arg(short = 'b', long)]
    pub body: Option<String>,

    /// Priority name.
    #[arg(short = 'y', long)]
    pub priority: Option<String>,

    /// Assignee (login, e-mail or display name).
    #[arg(short = 'a', long)]
    pub assignee: Option<String>,

    /// Reporter (login, e-mail or display name).
    #[arg(short = 'r', long)]
    pub reporter: Option<String>,

    /// Label (repeatable).
    #[arg(short = 'l', long = "label")]
    pub labels: Vec<String>,

    /// Component (repeatable).
    #[arg(short = 'C', long = "component")]
    pub components: Vec<String>,

    /// Fix version (repeatable).
    #[arg(long = "fix-version")]
    pub fix_versions: Vec<String>,

    /// Parent issue key, for sub-tasks.
    #[arg(short = 'P', long)]
    pub parent: Option<String>,

    /// Custom field as name=value or json:name=<json> (repeatable).
    #[arg(long)]
    pub custom: Vec<String>,

    /// Do not prompt for missing fields.
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for `jira issue clone`.
#[derive(Args, Debug, Default)]
pub struct CloneArgs {
    /// Issue to clone.
    pub key: Option<String>,

    /// Summary of the copy.
    #[arg(short = 's', long)]
    pub summary: Option<String>,

    /// Priority of the copy.
    #[arg(short = 'y', long)]
    pub priority: Option<String>,

    /// Assignee of the copy.
    #[arg(short = 'a', long)]
    pub assignee: Option<String>,

    /// Labels of the copy (repeatable, replaces the original labels).
    #[arg(short = 'l', long = "label")]
    pub labels: Vec<String>,

    /// Components of the copy (repeatable, replaces the original components).
    #[arg(short = 'C', long = "component")]
    pub components: Vec<String>,

    /// Replace text in summary and description, as find:replace (repeatable).
    #[arg(short = 'H', long)]
    pub replace: Vec<String>,

    /// Do not prompt for missing fields.
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for `jira issue edit`.
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Issue to edit.
    pub key: Option<String>,

    /// New summary.
    #[arg(short = 's', long)]
    pub summary: Option<String>,

    /// New description.
    #[arg(short = 'b', long)]
    pub body: Option<String>,

    /// New priority.
    #[arg(short = 'y', long)]
    pub priority: Option<String>,

    /// New assignee.
    #[arg(short = 'a', long)]
    pub assignee: Option<String>,

    /// Label to add, or to remove with a leading '-' (repeatable).
    #[arg(short = 'l', long = "label", allow_hyphen_values = true)]
    pub labels: Vec<String>,

    /// Component to add, or to remove with a leading '-' (repeatable).
    #[arg(short = 'C', long = "component", allow_hyphen_values = true)]
    pub components: Vec<String>,

    /// Custom field as name=value or json:name=<json> (repeatable).
    #[arg(long)]
    pub custom: Vec<String>,

    /// Do not prompt for missing fields.
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for `jira issue label`.
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Issue to label.
    pub key: String,

    /// Label to add, or to remove with a leading '-' (repeatable).
    #[arg(long = "labels", required = true, allow_hyphen_values = true)]
    pub labels: Vec<String>,
}

/// Arguments for `jira issue assign`.
#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Issue to assign.
    pub key: String,

    /// User to assign: a login, e-mail or display name; `me`; `default`
    /// for the project default; `x` to unassign.
    pub user: String,
}

/// Arguments for `jira issue comment`.
#[derive(Args, Debug)]
pub struct CommentArgs {
    #[command(subcommand)]
    pub command: CommentCommands,
}

/// Comment subcommands.
#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// Add a comment to an issue.
    Add {
        /// Issue to comment on.
        key: String,
        /// Comment text.
        body: String,
    },
}

/// Arguments for `jira issue link`.
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Inward issue key.
    pub inward: String,
    /// Outward issue key.
    pub outward: String,
    /// Link type, e.g. Blocks or Relates.
    pub link_type: String,
}

/// Arguments for `jira issue move`.
#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Issue to transition.
    pub key: String,
    /// Target state or transition name.
    pub state: String,
}

/// Arguments for `jira issue view`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Issue to show.
    pub key: String,
}

/// Arguments for `jira issue tclog`.
#[derive(Args, Debug)]
pub struct TclogArgs {
    /// Issue to attach to.
    pub key: String,
    /// Build id from the TeamCity URL (not the build number shown in the UI).
    pub build: u64,
    /// Name of the artifact to attach.
    pub filename: String,
}

/// Arguments for `jira issue script`.
#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Script file.
    pub filename: PathBuf,

    /// Values for the script's `~1`, `~2`, ... variables.
    pub args: Vec<String>,

    /// Do not prompt in the actions the script runs.
    #[arg(long)]
    pub no_input: bool,

    /// Print the commands the script would run without running them.
    #[arg(long)]
    pub dry_run: bool,
}

// ---------------------------------------------------------------------------
// completion
// ---------------------------------------------------------------------------

/// Arguments for `jira completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_script_invocation() {
        let cli = Cli::try_parse_from([
            "jira", "issue", "script", "release.yml", "1.2", "--dry-run", "-p", "PROJ",
        ])
        .unwrap();
        assert_eq!(cli.global.project.as_deref(), Some("PROJ"));
        let Some(Commands::Issue(IssueArgs {
            command: IssueCommands::Script(args),
        })) = cli.command
        else {
            panic!("expected issue script");
        };
        assert_eq!(args.args, vec!["1.2".to_string()]);
        assert!(args.dry_run);
    }

    #[test]
    fn edit_accepts_label_removals() {
        let cli =
            Cli::try_parse_from(["jira", "issue", "edit", "PROJ-1", "--label", "-stale"]).unwrap();
        let Some(Commands::Issue(IssueArgs {
            command: IssueCommands::Edit(args),
        })) = cli.command
        else {
            panic!("expected issue edit");
        };
        assert_eq!(args.labels, vec!["-stale".to_string()]);
    }
}
