//! `jira issue edit` -- update fields of an issue.

use anyhow::{Context, Result, bail};
use jira_core::issue::IssueEdit;
use jira_ui::styles;

use super::{custom_fields, required, user_id};
use crate::cli::EditArgs;
use crate::context::RuntimeContext;

/// Execute the `jira issue edit` command.
pub fn run(ctx: &RuntimeContext, args: &EditArgs) -> Result<()> {
    let key = ctx.issue_key(&required(ctx, args.key.as_deref(), args.no_input, "Issue key")?);

    let edit = IssueEdit {
        summary: args.summary.clone(),
        body: args.body.clone(),
        priority: args.priority.clone(),
        assignee: args
            .assignee
            .as_deref()
            .map(|a| user_id(ctx, a))
            .transpose()?,
        labels: args.labels.clone(),
        components: args.components.clone(),
        custom: custom_fields(ctx, &args.custom)?,
    };
    if edit.is_empty() {
        bail!("nothing to change; pass at least one field to edit");
    }

    ctx.tracker()?
        .edit_issue(&key, &edit)
        .with_context(|| format!("failed to edit {key}"))?;

    if !ctx.quiet {
        styles::success(&format!("Issue {} updated", styles::render_key(&key)));
    }
    Ok(())
}
