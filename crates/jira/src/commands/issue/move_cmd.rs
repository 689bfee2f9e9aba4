//! `jira issue move` -- transition an issue to another state.

use anyhow::{Context, Result, bail};
use jira_ui::styles;

use crate::cli::MoveArgs;
use crate::context::RuntimeContext;

/// Execute the `jira issue move` command.
///
/// The state matches a transition by its name or by the status it leads
/// to, ignoring case.
pub fn run(ctx: &RuntimeContext, args: &MoveArgs) -> Result<()> {
    let key = ctx.issue_key(&args.key);
    let tracker = ctx.tracker()?;

    let transitions = tracker
        .transitions(&key)
        .with_context(|| format!("failed to fetch transitions of {key}"))?;
    let Some(transition) = transitions.iter().find(|t| t.matches(&args.state)) else {
        let available: Vec<_> = transitions.iter().map(|t| t.name.as_str()).collect();
        bail!(
            "invalid transition state {:?} for {key}; available: {}",
            args.state,
            available.join(", ")
        );
    };

    tracing::debug!(%key, id = %transition.id, name = %transition.name, "applying transition");
    tracker
        .transition(&key, &transition.id)
        .with_context(|| format!("failed to move {key}"))?;

    if !ctx.quiet {
        styles::success(&format!(
            "Issue {} moved to {}",
            styles::render_key(&key),
            styles::render_status(&args.state)
        ));
    }
    Ok(())
}
