//! `jira issue tclog` -- attach a TeamCity build artifact to an issue.

use anyhow::{Context, Result};
use jira_api::TeamCityClient;
use jira_ui::styles;

use crate::cli::TclogArgs;
use crate::context::RuntimeContext;

/// Execute the `jira issue tclog` command.
pub fn run(ctx: &RuntimeContext, args: &TclogArgs) -> Result<()> {
    let teamcity = ctx.teamcity()?;
    attach_artifact(ctx, &teamcity, args)
}

fn attach_artifact(ctx: &RuntimeContext, teamcity: &TeamCityClient, args: &TclogArgs) -> Result<()> {
    let key = ctx.issue_key(&args.key);
    let tracker = ctx.tracker()?;

    if !ctx.quiet {
        styles::info(&format!("Locating {} in build {}", args.filename, args.build));
    }
    let path = teamcity
        .find_artifact(args.build, &args.filename)
        .with_context(|| format!("failed to locate {}", args.filename))?;

    if !ctx.quiet {
        styles::info(&format!("Downloading {path}"));
    }
    let data = teamcity
        .download_artifact(args.build, &path)
        .with_context(|| format!("failed to download {path}"))?;

    if !ctx.quiet {
        styles::info(&format!("Uploading attachment to {key}"));
    }
    tracker
        .attach(&key, &args.filename, &data)
        .with_context(|| format!("failed to attach {} to {key}", args.filename))?;

    if !ctx.quiet {
        styles::success(&format!("Issue {} updated", styles::render_key(&key)));
    }
    Ok(())
}
