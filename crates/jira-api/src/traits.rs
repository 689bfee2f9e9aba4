//! The issue-tracker interface the commands are written against.
//!
//! Commands depend on [`IssueTracker`] rather than on [`crate::JiraClient`]
//! so that tests can substitute an in-memory tracker.

use jira_core::issue::{CreatedIssue, Issue, IssueEdit, NewIssue, Transition};
use jira_core::user::{Me, User};

use crate::error::Result;

/// Operations on a remote issue tracker.
pub trait IssueTracker {
    /// The authenticated user.
    fn me(&self) -> Result<Me>;

    /// Users that can be assigned issues in `project`, optionally filtered
    /// by a keyword.
    fn assignable_users(&self, project: &str, query: Option<&str>) -> Result<Vec<User>>;

    fn get_issue(&self, key: &str) -> Result<Issue>;

    fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue>;

    fn edit_issue(&self, key: &str, edit: &IssueEdit) -> Result<()>;

    /// Set the assignee.
    fn assign(&self, key: &str, assignee: Assignee<'_>) -> Result<()>;

    fn add_comment(&self, key: &str, body: &str) -> Result<()>;

    /// Link two issues with a link type such as `Blocks`.
    fn link(&self, inward: &str, outward: &str, link_type: &str) -> Result<()>;

    fn transitions(&self, key: &str) -> Result<Vec<Transition>>;

    fn transition(&self, key: &str, transition_id: &str) -> Result<()>;

    /// Upload `data` as an attachment called `filename`.
    fn attach(&self, key: &str, filename: &str, data: &[u8]) -> Result<()>;
}

/// Target of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignee<'a> {
    /// Remove the assignee.
    Nobody,
    /// The project's default assignee.
    Default,
    /// A user, by login (server) or account id (cloud).
    User(&'a str),
}
