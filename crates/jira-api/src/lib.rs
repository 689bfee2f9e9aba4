//! HTTP clients for the `jira` command-line tool.
//!
//! - [`client::JiraClient`] talks to the Jira REST API (v2) and implements
//!   [`traits::IssueTracker`], the interface the commands are written against.
//! - [`teamcity::TeamCityClient`] locates and downloads build artifacts.
//!
//! Both clients are synchronous and built on `ureq`.

pub mod client;
pub mod error;
pub mod teamcity;
pub mod traits;

pub use client::{Auth, JiraClient};
pub use error::{ApiError, Result};
pub use teamcity::TeamCityClient;
pub use traits::IssueTracker;
