//! Script execution: resolve once, then interpolate, translate and
//! dispatch each action in order.

use crate::error::{BoxError, Result, ScriptError};
use crate::interpolate::interpolate_mapping;
use crate::parser::Script;
use crate::registry::{ActionRegistry, ISSUE_KEY_VAR};
use crate::resolve::{UserDirectory, Variables, resolve};
use crate::translate::{Invocation, action_name, translate};
use crate::value::Value;

/// Value `$issue_key` takes in a dry run, where nothing is created.
pub const DRY_RUN_ISSUE_KEY: &str = "<issue_key>";

/// Flag that suppresses prompts for non-required fields.
pub const NO_INPUT_FLAG: &str = "--no-input";

/// Receives the key of the issue a create/clone action produced.
pub trait IssueKeySink {
    fn accept(&mut self, key: &str);
}

/// A subcommand found in the command surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcommand {
    pub name: String,
    /// Whether the subcommand has a `--no-input` flag.
    pub accepts_no_input: bool,
}

/// The command surface actions are dispatched to.
pub trait Dispatcher {
    /// Look up the subcommand an action names. `None` if there is none.
    fn find(&self, action: &str) -> Option<Subcommand>;

    /// Run an invocation to completion.
    ///
    /// `sink` is only passed for actions that create issues; the subcommand
    /// reports the new key through it before returning.
    fn dispatch(
        &mut self,
        invocation: &Invocation,
        sink: Option<&mut dyn IssueKeySink>,
    ) -> std::result::Result<(), BoxError>;
}

/// Options for a script run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Forward `--no-input` to subcommands that accept it.
    pub no_input: bool,
    /// Translate actions without dispatching them.
    pub dry_run: bool,
}

/// What a completed run did.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// The invocations, in execution order.
    pub invocations: Vec<Invocation>,
    /// Variables as they stood after the last action.
    pub variables: Variables,
}

/// Runs scripts against a [`Dispatcher`].
#[derive(Debug, Clone, Default)]
pub struct ScriptRunner {
    registry: ActionRegistry,
    options: RunOptions,
}

/// Holds the one captured key of a create/clone action.
#[derive(Default)]
struct CapturedKey(Option<String>);

impl IssueKeySink for CapturedKey {
    fn accept(&mut self, key: &str) {
        self.0 = Some(key.to_string());
    }
}

impl ScriptRunner {
    pub fn new(registry: ActionRegistry, options: RunOptions) -> Self {
        Self { registry, options }
    }

    /// Run `script` with the given positional arguments.
    ///
    /// Stops at the first error. Actions that already ran are not undone.
    pub fn run(
        &self,
        script: &Script,
        args: &[String],
        users: &mut dyn UserDirectory,
        dispatcher: &mut dyn Dispatcher,
    ) -> Result<RunReport> {
        tracing::debug!(variables = script.define.len(), "resolving variables");
        let variables = resolve(&script.define, args, users)?;

        let mut report = RunReport {
            invocations: Vec::with_capacity(script.actions.len()),
            variables,
        };
        for (i, action) in script.actions.iter().enumerate() {
            let invocation = self.run_action(i + 1, action, &mut report.variables, dispatcher)?;
            report.invocations.push(invocation);
        }

        tracing::debug!(actions = report.invocations.len(), "script finished");
        Ok(report)
    }

    fn run_action(
        &self,
        index: usize,
        action: &Value,
        vars: &mut Variables,
        dispatcher: &mut dyn Dispatcher,
    ) -> Result<Invocation> {
        let record = action
            .as_mapping()
            .ok_or(ScriptError::ActionNotMapping { index })?;
        action_name(record, index)?;

        tracing::debug!(index, "interpolating action");
        let record = interpolate_mapping(record, vars)?;

        tracing::debug!(index, "translating action");
        let mut invocation = translate(&record, index)?;

        let subcommand = dispatcher
            .find(&invocation.action)
            .ok_or_else(|| ScriptError::SubcommandNotFound {
                action: invocation.action.clone(),
            })?;
        if self.options.no_input && subcommand.accepts_no_input {
            invocation.args.insert(0, NO_INPUT_FLAG.to_string());
        }

        let kind = self.registry.kind(&subcommand.name);
        if self.options.dry_run {
            if kind.captures_issue_key {
                vars.insert(ISSUE_KEY_VAR.to_string(), DRY_RUN_ISSUE_KEY.to_string());
            }
            return Ok(invocation);
        }

        tracing::info!(index, action = %invocation.action, args = ?invocation.args, "dispatching action");
        let mut captured = CapturedKey::default();
        let sink: Option<&mut dyn IssueKeySink> = if kind.captures_issue_key {
            Some(&mut captured)
        } else {
            None
        };
        dispatcher
            .dispatch(&invocation, sink)
            .map_err(|source| ScriptError::SubcommandFailed {
                action: invocation.action.clone(),
                source,
            })?;

        if kind.captures_issue_key {
            let key = captured.0.ok_or_else(|| ScriptError::MissingIssueKey {
                action: invocation.action.clone(),
            })?;
            tracing::debug!(index, %key, "captured issue key");
            vars.insert(ISSUE_KEY_VAR.to_string(), key);
        }

        Ok(invocation)
    }
}
