//! `jira issue create` -- create an issue.

use anyhow::{Context, Result};
use jira_core::issue::NewIssue;
use jira_script::IssueKeySink;
use jira_ui::styles;

use super::{custom_fields, required, user_id};
use crate::cli::CreateArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `jira issue create` command.
pub fn run(
    ctx: &RuntimeContext,
    args: &CreateArgs,
    sink: Option<&mut dyn IssueKeySink>,
) -> Result<()> {
    let project = ctx.require_project()?.to_string();

    let default_type = ctx.config.issue.default_type.as_deref();
    let issue_type = required(
        ctx,
        args.issue_type.as_deref().or(default_type),
        args.no_input,
        "Issue type",
    )?;
    let summary = required(ctx, args.summary.as_deref(), args.no_input, "Summary")?;

    let assignee = args
        .assignee
        .as_deref()
        .map(|a| user_id(ctx, a))
        .transpose()?;
    let reporter = args
        .reporter
        .as_deref()
        .map(|r| user_id(ctx, r))
        .transpose()?;

    let issue = NewIssue {
        project,
        issue_type,
        summary,
        body: args.body.clone(),
        priority: args.priority.clone(),
        assignee,
        reporter,
        parent: args.parent.as_deref().map(|p| ctx.issue_key(p)),
        labels: args.labels.clone(),
        components: args.components.clone(),
        fix_versions: args.fix_versions.clone(),
        custom: custom_fields(ctx, &args.custom)?,
    };

    tracing::debug!(project = %issue.project, summary = %issue.summary, "creating issue");
    let created = ctx
        .tracker()?
        .create_issue(&issue)
        .context("failed to create issue")?;

    if let Some(sink) = sink {
        sink.accept(&created.key);
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "id": created.id,
            "key": created.key,
            "url": ctx.browse_url(&created.key),
        }));
    } else if !ctx.quiet {
        styles::success(&format!("Issue created: {}", styles::render_key(&created.key)));
        if let Some(url) = ctx.browse_url(&created.key) {
            println!("{url}");
        }
    }
    Ok(())
}
