//! `jira version` -- print the tool version and where it is configured.

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::output_json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build identifier, injected by release builds through `JIRA_BUILD`.
const BUILD: &str = match option_env!("JIRA_BUILD") {
    Some(build) => build,
    None => "dev",
};

/// Execute the `jira version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let server = ctx.config.server_url().unwrap_or_default();
    let config = ctx
        .config_path
        .as_ref()
        .map(|path| path.display().to_string());

    if ctx.json {
        output_json(&serde_json::json!({
            "version": VERSION,
            "build": BUILD,
            "server": server,
            "config": config,
        }));
        return Ok(());
    }

    println!("jira {VERSION} ({BUILD})");
    if ctx.verbose {
        println!("config: {}", config.as_deref().unwrap_or("(none)"));
        if !server.is_empty() {
            println!("server: {server}");
        }
    }
    Ok(())
}
