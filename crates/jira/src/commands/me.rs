//! `jira me` -- show the authenticated user.

use anyhow::{Context, Result};

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `jira me` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let me = ctx
        .tracker()?
        .me()
        .context("failed to fetch the current user")?;

    if ctx.json {
        output_json(&serde_json::json!({
            "login": me.login,
            "accountId": me.account_id,
            "email": me.email,
            "name": me.name,
        }));
    } else if ctx.verbose && !me.name.is_empty() {
        println!("{} ({})", me.login, me.name);
    } else {
        println!("{}", me.login);
    }
    Ok(())
}
