//! Runs script actions through the `jira issue` command tree.

use clap::{CommandFactory, Parser};
use jira_script::error::BoxError;
use jira_script::{Dispatcher, Invocation, IssueKeySink, Subcommand};
use jira_ui::styles;

use crate::cli::{Cli, Commands};
use crate::commands;
use crate::context::RuntimeContext;

const NO_INPUT_LONG: &str = "no-input";

/// Dispatches invocations as `jira issue <action> <args...>` within the
/// current process, sharing the caller's context.
pub struct CliDispatcher<'a> {
    ctx: &'a RuntimeContext,
}

impl<'a> CliDispatcher<'a> {
    pub fn new(ctx: &'a RuntimeContext) -> Self {
        Self { ctx }
    }
}

impl Dispatcher for CliDispatcher<'_> {
    fn find(&self, action: &str) -> Option<Subcommand> {
        let cli = Cli::command();
        let subcommand = cli.find_subcommand("issue")?.find_subcommand(action)?;
        Some(Subcommand {
            name: subcommand.get_name().to_string(),
            accepts_no_input: subcommand
                .get_arguments()
                .any(|arg| arg.get_long() == Some(NO_INPUT_LONG)),
        })
    }

    fn dispatch(
        &mut self,
        invocation: &Invocation,
        sink: Option<&mut dyn IssueKeySink>,
    ) -> Result<(), BoxError> {
        let line = invocation.command_line();
        if !self.ctx.quiet {
            styles::step(&format!("Running: jira issue {}", display_args(&line)));
        }

        let argv = ["jira", "issue"]
            .into_iter()
            .map(String::from)
            .chain(line);
        let cli = Cli::try_parse_from(argv)?;
        match cli.command {
            Some(Commands::Issue(args)) => Ok(commands::issue::run(self.ctx, &args, sink)?),
            _ => Err(format!("'{}' is not an issue subcommand", invocation.action).into()),
        }
    }
}

/// Join arguments for display, quoting the ones a shell would split.
pub fn display_args(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
                format!("{arg:?}")
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
