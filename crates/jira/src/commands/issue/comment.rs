//! `jira issue comment` -- manage comments.

use anyhow::{Context, Result, bail};
use jira_ui::styles;

use crate::cli::{CommentArgs, CommentCommands};
use crate::context::RuntimeContext;

/// Execute the `jira issue comment` command.
pub fn run(ctx: &RuntimeContext, args: &CommentArgs) -> Result<()> {
    match &args.command {
        CommentCommands::Add { key, body } => add(ctx, key, body),
    }
}

fn add(ctx: &RuntimeContext, key: &str, body: &str) -> Result<()> {
    if body.trim().is_empty() {
        bail!("comment body is empty");
    }
    let key = ctx.issue_key(key);
    ctx.tracker()?
        .add_comment(&key, body)
        .with_context(|| format!("failed to comment on {key}"))?;

    if !ctx.quiet {
        styles::success(&format!("Comment added to {}", styles::render_key(&key)));
    }
    Ok(())
}
