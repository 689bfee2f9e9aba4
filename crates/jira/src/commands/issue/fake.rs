//! In-memory [`IssueTracker`] for command tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use jira_api::traits::Assignee;
use jira_api::{ApiError, IssueTracker};
use jira_core::issue::{CreatedIssue, Issue, IssueEdit, IssueFields, Named, NewIssue, Transition};
use jira_core::user::{Me, User};

pub(crate) fn user(login: &str, display: &str) -> User {
    User {
        account_id: String::new(),
        email: format!("{login}@example.com"),
        name: login.to_string(),
        display_name: display.to_string(),
        active: true,
    }
}

#[derive(Default)]
pub(crate) struct State {
    pub users: Vec<User>,
    pub issues: BTreeMap<String, Issue>,
    pub created: Vec<NewIssue>,
    pub edits: Vec<(String, IssueEdit)>,
    pub assignments: Vec<(String, String)>,
    pub comments: Vec<(String, String)>,
    pub links: Vec<(String, String, String)>,
    pub applied_transitions: Vec<(String, String)>,
    pub attachments: Vec<(String, String, Vec<u8>)>,
    pub user_searches: Vec<Option<String>>,
    next_number: u32,
}

/// Clones share state, so a test can keep one handle and give another to
/// the context.
#[derive(Clone)]
pub(crate) struct FakeTracker {
    state: Rc<RefCell<State>>,
}

impl Default for FakeTracker {
    fn default() -> Self {
        let state = State {
            users: vec![user("alice", "Alice Liddell"), user("bob", "Bob Builder")],
            next_number: 7,
            ..State::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }
}

impl FakeTracker {
    pub fn state(&self) -> std::cell::Ref<'_, State> {
        self.state.borrow()
    }

    pub fn add_user(&self, user: User) {
        self.state.borrow_mut().users.push(user);
    }

    pub fn add_issue(&self, key: &str, fields: IssueFields) {
        let issue = Issue {
            id: String::new(),
            key: key.to_string(),
            fields,
        };
        self.state.borrow_mut().issues.insert(key.to_string(), issue);
    }

    pub fn user_searches(&self) -> Vec<Option<String>> {
        self.state().user_searches.clone()
    }

    fn known(&self, key: &str) -> jira_api::Result<()> {
        if self.state().issues.contains_key(key) {
            Ok(())
        } else {
            Err(ApiError::status(
                404,
                r#"{"errorMessages":["Issue does not exist or you do not have permission to see it."]}"#,
            ))
        }
    }
}

impl IssueTracker for FakeTracker {
    fn me(&self) -> jira_api::Result<Me> {
        Ok(Me {
            account_id: String::new(),
            login: "alice".into(),
            email: "alice@example.com".into(),
            name: "Alice Liddell".into(),
        })
    }

    fn assignable_users(&self, _project: &str, query: Option<&str>) -> jira_api::Result<Vec<User>> {
        let mut state = self.state.borrow_mut();
        state.user_searches.push(query.map(str::to_string));
        let users = match query {
            None => state.users.iter().take(2).cloned().collect(),
            Some(q) => {
                let q = q.to_lowercase();
                state
                    .users
                    .iter()
                    .filter(|u| {
                        u.name.to_lowercase().contains(&q)
                            || u.email.to_lowercase().contains(&q)
                            || u.display_name.to_lowercase().contains(&q)
                    })
                    .cloned()
                    .collect()
            }
        };
        Ok(users)
    }

    fn get_issue(&self, key: &str) -> jira_api::Result<Issue> {
        self.known(key)?;
        Ok(self.state().issues[key].clone())
    }

    fn create_issue(&self, issue: &NewIssue) -> jira_api::Result<CreatedIssue> {
        let mut state = self.state.borrow_mut();
        let key = format!("{}-{}", issue.project, state.next_number);
        state.next_number += 1;
        let fields = IssueFields {
            summary: issue.summary.clone(),
            description: issue.body.clone(),
            issue_type: Named::new(&issue.issue_type),
            labels: issue.labels.clone(),
            ..IssueFields::default()
        };
        state.issues.insert(
            key.clone(),
            Issue {
                id: String::new(),
                key: key.clone(),
                fields,
            },
        );
        state.created.push(issue.clone());
        Ok(CreatedIssue {
            id: "10000".into(),
            key,
        })
    }

    fn edit_issue(&self, key: &str, edit: &IssueEdit) -> jira_api::Result<()> {
        self.known(key)?;
        self.state.borrow_mut().edits.push((key.to_string(), edit.clone()));
        Ok(())
    }

    fn assign(&self, key: &str, assignee: Assignee<'_>) -> jira_api::Result<()> {
        self.known(key)?;
        let target = match assignee {
            Assignee::Nobody => "<nobody>".to_string(),
            Assignee::Default => "<default>".to_string(),
            Assignee::User(user) => user.to_string(),
        };
        self.state
            .borrow_mut()
            .assignments
            .push((key.to_string(), target));
        Ok(())
    }

    fn add_comment(&self, key: &str, body: &str) -> jira_api::Result<()> {
        self.known(key)?;
        self.state
            .borrow_mut()
            .comments
            .push((key.to_string(), body.to_string()));
        Ok(())
    }

    fn link(&self, inward: &str, outward: &str, link_type: &str) -> jira_api::Result<()> {
        self.known(inward)?;
        self.known(outward)?;
        self.state.borrow_mut().links.push((
            inward.to_string(),
            outward.to_string(),
            link_type.to_string(),
        ));
        Ok(())
    }

    fn transitions(&self, key: &str) -> jira_api::Result<Vec<Transition>> {
        self.known(key)?;
        let transition = |id: &str, name: &str, to: &str| Transition {
            id: id.to_string(),
            name: name.to_string(),
            to: Some(Named::new(to)),
        };
        Ok(vec![
            transition("11", "Stop Progress", "To Do"),
            transition("21", "Start Progress", "In Progress"),
            transition("31", "Resolve", "Done"),
        ])
    }

    fn transition(&self, key: &str, transition_id: &str) -> jira_api::Result<()> {
        self.known(key)?;
        self.state
            .borrow_mut()
            .applied_transitions
            .push((key.to_string(), transition_id.to_string()));
        Ok(())
    }

    fn attach(&self, key: &str, filename: &str, data: &[u8]) -> jira_api::Result<()> {
        self.known(key)?;
        self.state.borrow_mut().attachments.push((
            key.to_string(),
            filename.to_string(),
            data.to_vec(),
        ));
        Ok(())
    }
}
