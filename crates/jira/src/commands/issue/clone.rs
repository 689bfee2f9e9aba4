//! `jira issue clone` -- duplicate an issue.

use anyhow::{Context, Result, anyhow};
use jira_core::issue::NewIssue;
use jira_core::key::project_of;
use jira_script::IssueKeySink;
use jira_ui::styles;

use super::{required, user_id};
use crate::cli::CloneArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `jira issue clone` command.
pub fn run(
    ctx: &RuntimeContext,
    args: &CloneArgs,
    sink: Option<&mut dyn IssueKeySink>,
) -> Result<()> {
    let key = ctx.issue_key(&required(ctx, args.key.as_deref(), args.no_input, "Issue key")?);
    let replacements = args
        .replace
        .iter()
        .map(|r| parse_replacement(r))
        .collect::<Result<Vec<_>>>()?;

    let tracker = ctx.tracker()?;
    let original = tracker
        .get_issue(&key)
        .with_context(|| format!("failed to fetch issue {key}"))?;

    let project = match project_of(&original.key) {
        Some(project) => project.to_string(),
        None => ctx.require_project()?.to_string(),
    };
    let mut issue = NewIssue::from_existing(&project, &original);

    if let Some(ref summary) = args.summary {
        issue.summary = summary.clone();
    }
    if let Some(ref priority) = args.priority {
        issue.priority = Some(priority.clone());
    }
    if let Some(ref assignee) = args.assignee {
        issue.assignee = Some(user_id(ctx, assignee)?);
    }
    if !args.labels.is_empty() {
        issue.labels = args.labels.clone();
    }
    if !args.components.is_empty() {
        issue.components = args.components.clone();
    }
    for (find, replace) in &replacements {
        issue.summary = issue.summary.replace(find, replace);
        issue.body = issue.body.map(|body| body.replace(find, replace));
    }

    tracing::debug!(from = %key, summary = %issue.summary, "cloning issue");
    let created = tracker
        .create_issue(&issue)
        .with_context(|| format!("failed to clone {key}"))?;

    if let Some(sink) = sink {
        sink.accept(&created.key);
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "id": created.id,
            "key": created.key,
            "clonedFrom": key,
        }));
    } else if !ctx.quiet {
        styles::success(&format!(
            "Issue {} cloned as {}",
            key,
            styles::render_key(&created.key)
        ));
        if let Some(url) = ctx.browse_url(&created.key) {
            println!("{url}");
        }
    }
    Ok(())
}

/// Split a `find:replace` argument at the first `:`.
fn parse_replacement(raw: &str) -> Result<(String, String)> {
    let (find, replace) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("invalid replacement {raw:?}: expected find:replace"))?;
    if find.is_empty() {
        return Err(anyhow!("invalid replacement {raw:?}: nothing to find"));
    }
    Ok((find.to_string(), replace.to_string()))
}
