//! Configuration management for the `jira` command-line tool.
//!
//! This crate locates and loads the YAML configuration file, layers
//! `JIRA_*` environment variables on top of it, and reads the API tokens,
//! which are only ever taken from the environment.

pub mod config;
pub mod paths;
pub mod secrets;
