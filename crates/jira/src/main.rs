//! `jira` -- scriptable Jira issue automation.
//!
//! Parses CLI arguments with clap, loads the configuration into a runtime
//! context, and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod dispatch;
mod output;
mod users;

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // First Ctrl+C: exit cleanly. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
        std::process::exit(130);
    });

    let cli = Cli::parse();

    if cli.global.verbose || cli.global.debug {
        let filter = if cli.global.debug {
            "jira=debug,jira_script=debug,jira_api=trace,ureq=debug"
        } else {
            "jira=debug,jira_script=debug,jira_api=debug"
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| run(&ctx, cli.command));

    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(ctx: &RuntimeContext, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Issue(args)) => commands::issue::run(ctx, &args, None),
        Some(Commands::Me) => commands::me::run(ctx),
        Some(Commands::Version) => commands::version::run(ctx),
        Some(Commands::Completion(args)) => commands::completion::run(&args),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    }
}
