//! Core domain types for the `jira` command-line tool.
//!
//! This crate holds the data model shared by the REST client, the script
//! engine and the CLI: users, issues, issue keys and custom field values.

pub mod custom;
pub mod issue;
pub mod key;
pub mod user;
