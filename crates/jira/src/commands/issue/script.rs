//! `jira issue script` -- run a YAML script of issue actions.

use std::collections::BTreeSet;
use std::io::{Stderr, StdinLock};

use anyhow::{Context, Result};
use jira_core::user::User;
use jira_script::error::BoxError;
use jira_script::interpolate::references;
use jira_script::registry::ISSUE_KEY_VAR;
use jira_script::{
    ActionRegistry, RunOptions, RunReport, Script, ScriptError, ScriptRunner, UserChoice,
    UserDirectory,
};
use jira_ui::prompt::Prompter;
use jira_ui::styles;

use crate::cli::ScriptArgs;
use crate::context::RuntimeContext;
use crate::dispatch::{CliDispatcher, display_args};
use crate::output::output_json;
use crate::users::{Cancelled, UserLookup};

/// Execute the `jira issue script` command.
pub fn run(ctx: &RuntimeContext, args: &ScriptArgs) -> Result<()> {
    let script = Script::load(&args.filename)
        .with_context(|| format!("cannot run script {}", args.filename.display()))?;
    tracing::debug!(
        path = %args.filename.display(),
        variables = script.define.len(),
        actions = script.actions.len(),
        "script loaded"
    );

    let options = RunOptions {
        no_input: args.no_input,
        dry_run: args.dry_run,
    };
    let mut users = ScriptUsers::new(ctx);
    let mut dispatcher = CliDispatcher::new(ctx);
    let runner = ScriptRunner::new(ActionRegistry::default(), options);

    let report = match runner.run(&script, &args.args, &mut users, &mut dispatcher) {
        Ok(report) => report,
        Err(err) if is_cancelled(&err) => {
            styles::fail("Action aborted");
            return Ok(());
        }
        Err(err) => {
            let path = args.filename.display();
            let context = if err.is_structure_error() {
                format!("invalid script {path}")
            } else if err.is_resolution_error() {
                format!("cannot resolve the variables of {path}")
            } else {
                format!("script {path} failed")
            };
            return Err(err).context(context);
        }
    };

    if args.dry_run {
        print_plan(ctx, &script, &report);
    } else if !ctx.quiet {
        styles::success(&format!(
            "Script finished: {} action(s) run",
            report.invocations.len()
        ));
    }
    Ok(())
}

fn is_cancelled(err: &ScriptError) -> bool {
    match err {
        ScriptError::UserLookup { source, .. } => source.is::<Cancelled>(),
        _ => false,
    }
}

/// Print what a dry run resolved and would execute.
fn print_plan(ctx: &RuntimeContext, script: &Script, report: &RunReport) {
    let referenced: BTreeSet<String> = script.actions.iter().flat_map(references).collect();

    if ctx.json {
        let commands: Vec<Vec<String>> = report
            .invocations
            .iter()
            .map(|inv| inv.command_line())
            .collect();
        output_json(&serde_json::json!({
            "variables": report.variables,
            "referenced": referenced,
            "commands": commands,
        }));
        return;
    }

    if !ctx.quiet {
        for (name, value) in &report.variables {
            if name != ISSUE_KEY_VAR {
                styles::info(&format!("{name} = {value}"));
            }
        }
        let unused: Vec<_> = script
            .define
            .keys()
            .filter(|name| !referenced.contains(*name))
            .map(String::as_str)
            .collect();
        if !unused.is_empty() {
            styles::warn(&format!("defined but never used: {}", unused.join(", ")));
        }
    }
    for invocation in &report.invocations {
        println!("jira issue {}", display_args(&invocation.command_line()));
    }
}

/// [`UserDirectory`] for scripts: the interactive lookup, created on first
/// use so that scripts without user directives never connect to Jira.
struct ScriptUsers<'a> {
    ctx: &'a RuntimeContext,
    lookup: Option<TerminalLookup<'a>>,
}

type TerminalLookup<'a> = UserLookup<'a, StdinLock<'static>, Stderr>;

impl<'a> ScriptUsers<'a> {
    fn new(ctx: &'a RuntimeContext) -> Self {
        Self { ctx, lookup: None }
    }

    fn lookup(&mut self) -> Result<&mut TerminalLookup<'a>> {
        if self.lookup.is_none() {
            let ctx = self.ctx;
            let tracker = ctx.tracker()?;
            let project = ctx.require_project()?;
            self.lookup = Some(UserLookup::new(tracker, project, Prompter::stdio()));
        }
        self.lookup
            .as_mut()
            .context("user lookup is not available")
    }
}

impl UserDirectory for ScriptUsers<'_> {
    fn select_user(&mut self, prompt: &str) -> std::result::Result<UserChoice, BoxError> {
        self.lookup()?.select_user(prompt)
    }

    fn find_user(&mut self, query: &str) -> std::result::Result<Option<User>, BoxError> {
        self.lookup()?.find_user(query)
    }

    fn find_current_user(&mut self) -> std::result::Result<User, BoxError> {
        self.lookup()?.find_current_user()
    }
}
