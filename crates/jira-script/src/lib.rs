//! Script engine for the `jira` command-line tool.
//!
//! A script is a YAML document with a `define` mapping of variables and an
//! ordered list of `actions`. Variables are resolved once (from positional
//! arguments, the current user, an interactive user choice or a literal),
//! then each action is interpolated, translated into the argument vector of
//! an `issue` subcommand and dispatched. Actions that create issues publish
//! the new key as `$issue_key` for the actions after them.

pub mod error;
pub mod interpolate;
pub mod parser;
pub mod registry;
pub mod resolve;
pub mod runner;
pub mod translate;
pub mod value;

pub use error::{Result, ScriptError};
pub use parser::Script;
pub use registry::{ActionKind, ActionRegistry};
pub use resolve::{UserChoice, UserDirectory, Variables};
pub use runner::{Dispatcher, IssueKeySink, RunOptions, RunReport, ScriptRunner, Subcommand};
pub use translate::Invocation;
pub use value::Value;
