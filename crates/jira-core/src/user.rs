//! Jira users as returned by the user search and `myself` endpoints.

use serde::{Deserialize, Serialize};

/// A Jira user account.
///
/// Server deployments identify users by `name` (the login); cloud
/// deployments use `account_id`. Either may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_id: String,

    #[serde(default, rename = "emailAddress")]
    pub email: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub active: bool,
}

impl User {
    /// Display name followed by the login in parentheses, when there is one.
    ///
    /// This is the label shown in user selection lists, so it is also one
    /// of the forms [`User::matches`] accepts.
    pub fn full_name(&self) -> String {
        if self.name.is_empty() {
            self.display_name.clone()
        } else {
            format!("{} ({})", self.display_name, self.name)
        }
    }

    /// Case-insensitive match against display name, login, e-mail or full name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        query == self.display_name.to_lowercase()
            || query == self.name.to_lowercase()
            || query == self.email.to_lowercase()
            || query == self.full_name().to_lowercase()
    }

    /// The identifier Jira expects when assigning: login on server
    /// deployments, account id on cloud.
    pub fn assignable_id(&self) -> &str {
        if self.name.is_empty() {
            &self.account_id
        } else {
            &self.name
        }
    }
}

/// The authenticated user as reported by `GET /rest/api/2/myself`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Me {
    #[serde(default)]
    pub account_id: String,

    #[serde(default, rename = "name")]
    pub login: String,

    #[serde(default, rename = "emailAddress")]
    pub email: String,

    #[serde(default, rename = "displayName")]
    pub name: String,
}

impl From<Me> for User {
    fn from(me: Me) -> Self {
        User {
            account_id: me.account_id,
            email: me.email,
            name: me.login,
            display_name: me.name,
            active: true,
        }
    }
}
