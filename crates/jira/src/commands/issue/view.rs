//! `jira issue view` -- show an issue.

use anyhow::{Context, Result};

use crate::cli::ViewArgs;
use crate::context::RuntimeContext;
use crate::output::{format_issue_detail, output_json};

/// Execute the `jira issue view` command.
pub fn run(ctx: &RuntimeContext, args: &ViewArgs) -> Result<()> {
    let key = ctx.issue_key(&args.key);
    let issue = ctx
        .tracker()?
        .get_issue(&key)
        .with_context(|| format!("failed to fetch issue {key}"))?;

    if ctx.json {
        output_json(&issue);
    } else {
        print!("{}", format_issue_detail(&issue));
        if let Some(url) = ctx.browse_url(&issue.key) {
            println!("\n{url}");
        }
    }
    Ok(())
}
