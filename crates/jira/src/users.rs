//! Interactive user lookup against the project's assignable users.

use std::io::{BufRead, Write};

use jira_api::IssueTracker;
use jira_core::user::User;
use jira_script::error::BoxError;
use jira_script::{UserChoice, UserDirectory};
use jira_ui::prompt::{Prompter, SEPARATOR};

const MIN_SEARCH_LEN: usize = 3;

pub const OPTION_SEARCH: &str = "[Search...]";
pub const OPTION_ME: &str = "Me";
pub const OPTION_CANCEL: &str = "Cancel";

/// The user backed out of a selection.
#[derive(Debug, thiserror::Error)]
#[error("action aborted")]
pub struct Cancelled;

/// Looks users up among the project's assignable users, fetched on first use.
pub struct UserLookup<'a, R, W> {
    tracker: &'a dyn IssueTracker,
    project: String,
    prompter: Prompter<R, W>,
    users: Option<Vec<User>>,
}

impl<'a, R: BufRead, W: Write> UserLookup<'a, R, W> {
    pub fn new(tracker: &'a dyn IssueTracker, project: &str, prompter: Prompter<R, W>) -> Self {
        Self {
            tracker,
            project: project.to_string(),
            prompter,
            users: None,
        }
    }

    fn fetch(&mut self, keyword: Option<&str>) -> Result<&[User], BoxError> {
        tracing::debug!(project = %self.project, ?keyword, "fetching assignable users");
        let users = self
            .tracker
            .assignable_users(&self.project, keyword)
            .map_err(|e| format!("failed to fetch users: {e}"))?;
        Ok(self.users.insert(users).as_slice())
    }

    fn users(&mut self) -> Result<&[User], BoxError> {
        if self.users.is_none() {
            self.fetch(None)?;
        }
        Ok(self.users.as_deref().unwrap_or_default())
    }

    /// Select-list options. After a search the matches come first.
    fn options(&self, after_search: bool) -> Vec<String> {
        let active: Vec<String> = self
            .users
            .iter()
            .flatten()
            .filter(|u| u.active)
            .map(User::full_name)
            .collect();

        let mut options = vec![OPTION_SEARCH.to_string()];
        if after_search {
            options.extend(active);
            options.push(SEPARATOR.to_string());
            options.push(OPTION_ME.to_string());
            options.push(OPTION_CANCEL.to_string());
        } else {
            options.push(OPTION_ME.to_string());
            options.push(OPTION_CANCEL.to_string());
            options.push(SEPARATOR.to_string());
            options.extend(active);
        }
        options
    }
}

impl<R: BufRead, W: Write> UserDirectory for UserLookup<'_, R, W> {
    fn select_user(&mut self, prompt: &str) -> Result<UserChoice, BoxError> {
        self.users()?;
        let mut after_search = false;
        loop {
            let options = self.options(after_search);
            let index = self.prompter.select(prompt, &options)?;
            match options[index].as_str() {
                OPTION_CANCEL => return Err(Box::new(Cancelled)),
                OPTION_ME => return Ok(UserChoice::Me),
                OPTION_SEARCH => {
                    let keyword = self.prompter.input("Search user:", |s| {
                        if s.chars().count() < MIN_SEARCH_LEN {
                            Err(format!("enter at least {MIN_SEARCH_LEN} characters to search"))
                        } else {
                            Ok(())
                        }
                    })?;
                    self.fetch(Some(&keyword))?;
                    after_search = true;
                }
                choice => return Ok(UserChoice::Display(choice.to_string())),
            }
        }
    }

    fn find_user(&mut self, query: &str) -> Result<Option<User>, BoxError> {
        let user = self.users()?.iter().find(|u| u.matches(query)).cloned();
        Ok(user)
    }

    fn find_current_user(&mut self) -> Result<User, BoxError> {
        let me = self.tracker.me()?;
        Ok(User::from(me))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::issue::fake::{FakeTracker, user};
    use pretty_assertions::assert_eq;

    fn lookup<'a>(tracker: &'a FakeTracker, input: &'a str) -> UserLookup<'a, &'a [u8], Vec<u8>> {
        UserLookup::new(tracker, "PROJ", Prompter::new(input.as_bytes(), Vec::new()))
    }

    #[test]
    fn options_list_active_users_after_the_fixed_entries() {
        let tracker = FakeTracker::default();
        let mut lookup = lookup(&tracker, "");
        lookup.users().unwrap();
        assert_eq!(
            lookup.options(false),
            vec![
                "[Search...]",
                "Me",
                "Cancel",
                "----------",
                "Alice Liddell (alice)",
                "Bob Builder (bob)",
            ]
        );
        assert_eq!(lookup.options(true)[1], "Alice Liddell (alice)");
    }

    #[test]
    fn select_user_by_number() {
        let tracker = FakeTracker::default();
        // 1 search, 2 me, 3 cancel, 4 alice, 5 bob
        let mut lookup = lookup(&tracker, "5\n");
        let choice = lookup.select_user("Select user for owner:").unwrap();
        assert_eq!(choice, UserChoice::Display("Bob Builder (bob)".into()));
        let found = lookup.find_user("Bob Builder (bob)").unwrap().unwrap();
        assert_eq!(found.name, "bob");
    }

    #[test]
    fn select_me_and_cancel() {
        let tracker = FakeTracker::default();
        assert_eq!(lookup(&tracker, "2\n").select_user("?").unwrap(), UserChoice::Me);

        let err = lookup(&tracker, "3\n").select_user("?").unwrap_err();
        assert!(err.is::<Cancelled>());
    }

    #[test]
    fn search_refetches_with_keyword() {
        let tracker = FakeTracker::default();
        tracker.add_user(user("carol", "Carol Danvers"));
        // search, too short, then "car"; matches come right after [Search...]
        let mut lookup = lookup(&tracker, "1\nca\ncar\n2\n");
        let choice = lookup.select_user("?").unwrap();
        assert_eq!(choice, UserChoice::Display("Carol Danvers (carol)".into()));
        assert_eq!(tracker.user_searches(), vec![None, Some("car".to_string())]);
    }

    #[test]
    fn find_user_is_case_insensitive_and_current_user_uses_myself() {
        let tracker = FakeTracker::default();
        let mut lookup = lookup(&tracker, "");
        assert_eq!(lookup.find_user("ALICE@example.com").unwrap().unwrap().name, "alice");
        assert!(lookup.find_user("nobody").unwrap().is_none());
        assert_eq!(lookup.find_current_user().unwrap().name, "alice");
    }
}
