//! `jira issue link` -- link two issues.

use anyhow::{Context, Result};
use jira_ui::styles;

use crate::cli::LinkArgs;
use crate::context::RuntimeContext;

/// Execute the `jira issue link` command.
pub fn run(ctx: &RuntimeContext, args: &LinkArgs) -> Result<()> {
    let inward = ctx.issue_key(&args.inward);
    let outward = ctx.issue_key(&args.outward);
    ctx.tracker()?
        .link(&inward, &outward, &args.link_type)
        .with_context(|| format!("failed to link {inward} and {outward}"))?;

    if !ctx.quiet {
        styles::success(&format!(
            "{} and {} linked as {:?}",
            styles::render_key(&inward),
            styles::render_key(&outward),
            args.link_type
        ));
    }
    Ok(())
}
