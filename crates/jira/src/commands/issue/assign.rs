//! `jira issue assign` -- set the assignee of an issue.

use anyhow::{Context, Result};
use jira_api::traits::Assignee;
use jira_ui::styles;

use super::user_id;
use crate::cli::AssignArgs;
use crate::context::RuntimeContext;

/// Unassigns the issue.
const NOBODY: &str = "x";
/// Assigns the project default.
const DEFAULT: &str = "default";

/// Execute the `jira issue assign` command.
pub fn run(ctx: &RuntimeContext, args: &AssignArgs) -> Result<()> {
    let key = ctx.issue_key(&args.key);
    let user = args.user.trim();

    let id;
    let (assignee, shown) = if user.eq_ignore_ascii_case(NOBODY) {
        (Assignee::Nobody, "nobody")
    } else if user.eq_ignore_ascii_case(DEFAULT) {
        (Assignee::Default, "the default assignee")
    } else {
        id = user_id(ctx, user)?;
        (Assignee::User(&id), id.as_str())
    };

    ctx.tracker()?
        .assign(&key, assignee)
        .with_context(|| format!("failed to assign {key}"))?;

    if !ctx.quiet {
        styles::success(&format!("{} assigned to {}", styles::render_key(&key), shown));
    }
    Ok(())
}
