//! `jira issue label` -- add or remove labels.

use anyhow::{Context, Result};
use jira_core::issue::IssueEdit;
use jira_ui::styles;

use crate::cli::LabelArgs;
use crate::context::RuntimeContext;

/// Execute the `jira issue label` command.
///
/// Labels prefixed with `-` are removed, all others are added.
pub fn run(ctx: &RuntimeContext, args: &LabelArgs) -> Result<()> {
    let key = ctx.issue_key(&args.key);
    let edit = IssueEdit {
        labels: args.labels.clone(),
        ..IssueEdit::default()
    };
    ctx.tracker()?
        .edit_issue(&key, &edit)
        .with_context(|| format!("failed to update labels of {key}"))?;

    if !ctx.quiet {
        styles::success(&format!("Labels of {} updated", styles::render_key(&key)));
    }
    Ok(())
}
