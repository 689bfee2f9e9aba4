//! Terminal UI components for the `jira` command-line tool.
//!
//! Provides terminal detection, colored status messages and the simple
//! interactive prompts used for user selection and missing input.

pub mod prompt;
pub mod styles;
pub mod terminal;
