//! `jira issue` -- the issue subcommands.
//!
//! These are also the targets of script actions, so every handler here runs
//! against a shared [`RuntimeContext`] and returns instead of exiting.

use anyhow::{Context, Result, anyhow, bail};
use jira_core::custom::CustomArg;
use jira_core::user::User;
use jira_script::IssueKeySink;
use jira_ui::prompt::Prompter;
use serde_json::Value;

use crate::cli::{IssueArgs, IssueCommands};
use crate::context::RuntimeContext;

pub mod assign;
pub mod clone;
pub mod comment;
pub mod create;
pub mod edit;
pub mod label;
pub mod link;
pub mod move_cmd;
pub mod script;
pub mod tclog;
pub mod view;

#[cfg(test)]
pub(crate) mod fake;

/// Execute a `jira issue` subcommand.
///
/// `sink` receives the key of the issue `create` or `clone` produced.
pub fn run(
    ctx: &RuntimeContext,
    args: &IssueArgs,
    sink: Option<&mut dyn IssueKeySink>,
) -> Result<()> {
    match &args.command {
        IssueCommands::Create(args) => create::run(ctx, args, sink),
        IssueCommands::CloneIssue(args) => clone::run(ctx, args, sink),
        IssueCommands::Edit(args) => edit::run(ctx, args),
        IssueCommands::Label(args) => label::run(ctx, args),
        IssueCommands::Assign(args) => assign::run(ctx, args),
        IssueCommands::Comment(args) => comment::run(ctx, args),
        IssueCommands::Link(args) => link::run(ctx, args),
        IssueCommands::MoveCmd(args) => move_cmd::run(ctx, args),
        IssueCommands::View(args) => view::run(ctx, args),
        IssueCommands::Tclog(args) => tclog::run(ctx, args),
        IssueCommands::Script(args) => script::run(ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// The identifier to send for a user given as login, e-mail, display name
/// or `me`.
pub(crate) fn user_id(ctx: &RuntimeContext, query: &str) -> Result<String> {
    let tracker = ctx.tracker()?;
    if query.eq_ignore_ascii_case("me") {
        let me = User::from(tracker.me()?);
        return Ok(me.assignable_id().to_string());
    }
    let users = tracker.assignable_users(ctx.require_project()?, Some(query))?;
    users
        .iter()
        .find(|u| u.matches(query))
        .map(|u| u.assignable_id().to_string())
        .ok_or_else(|| anyhow!("user not found {query:?}"))
}

/// Convert `--custom` arguments into `(field id, value)` pairs using the
/// field declarations from the config.
pub(crate) fn custom_fields(ctx: &RuntimeContext, raw: &[String]) -> Result<Vec<(String, Value)>> {
    raw.iter()
        .map(|raw| {
            let arg = CustomArg::parse(raw)?;
            let field = ctx.config.custom_field(&arg.name).ok_or_else(|| {
                anyhow!(
                    "unknown custom field '{}'; declare it under issue.custom_fields in the config",
                    arg.name
                )
            })?;
            let value = arg.to_json(field.schema)?;
            Ok((field.key.clone(), value))
        })
        .collect()
}

/// Use `value` if given, otherwise ask for it when prompting is allowed.
pub(crate) fn required(
    ctx: &RuntimeContext,
    value: Option<&str>,
    no_input: bool,
    label: &str,
) -> Result<String> {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        return Ok(value.to_string());
    }
    if !ctx.can_prompt(no_input) {
        bail!("{} is required", label.to_lowercase());
    }
    Prompter::stdio()
        .input(&format!("{label}:"), |answer| {
            if answer.is_empty() {
                Err(format!("{label} is required"))
            } else {
                Ok(())
            }
        })
        .with_context(|| format!("failed to read {}", label.to_lowercase()))
}
