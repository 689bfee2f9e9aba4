//! Resolution of the `define` section into concrete variable values.

use std::collections::BTreeMap;

use jira_core::user::User;

use crate::error::{BoxError, Result, ScriptError};

/// Resolved variables: name -> concrete value.
pub type Variables = BTreeMap<String, String>;

/// Leading character of a directive value.
pub const SENTINEL: char = '~';

/// What the user picked from a selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserChoice {
    /// The "current user" option.
    Me,
    /// A display string from the list of known users.
    Display(String),
}

/// The user lookups the resolver needs.
///
/// Implemented by the CLI on top of the Jira client and the terminal
/// prompts; tests use a stub.
pub trait UserDirectory {
    /// Ask the user to pick someone.
    fn select_user(&mut self, prompt: &str) -> std::result::Result<UserChoice, BoxError>;

    /// Find a known user by display name, login, e-mail or full name.
    fn find_user(&mut self, query: &str) -> std::result::Result<Option<User>, BoxError>;

    /// The authenticated user.
    fn find_current_user(&mut self) -> std::result::Result<User, BoxError>;
}

/// A parsed `define` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Plain value, used as-is.
    Literal(String),
    /// `~~text`: the literal `~text`.
    EscapedLiteral(String),
    /// `~choose_user`: prompt for a user.
    ChooseUser,
    /// `~me`: the authenticated user.
    CurrentUser,
    /// `~N`: the N-th script argument, 1-based.
    PositionalArg(usize),
}

impl Directive {
    /// Parse a raw `define` value.
    pub fn parse(raw: &str) -> Result<Self> {
        let Some(rest) = raw.strip_prefix(SENTINEL) else {
            return Ok(Self::Literal(raw.to_string()));
        };
        if rest.starts_with(SENTINEL) {
            return Ok(Self::EscapedLiteral(rest.to_string()));
        }
        match rest {
            "choose_user" => Ok(Self::ChooseUser),
            "me" => Ok(Self::CurrentUser),
            _ => match rest.parse::<usize>() {
                Ok(index) if index > 0 => Ok(Self::PositionalArg(index)),
                _ => Err(ScriptError::UnknownDirective {
                    directive: raw.to_string(),
                }),
            },
        }
    }
}

/// Resolve every `define` entry against the script arguments and the user
/// directory.
///
/// Entries are visited in order of their raw value (ties by name), which
/// fixes the order in which interactive prompts appear.
pub fn resolve(
    define: &BTreeMap<String, String>,
    args: &[String],
    users: &mut dyn UserDirectory,
) -> Result<Variables> {
    let mut order: Vec<(&String, &String)> = define.iter().collect();
    order.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));

    let mut vars = Variables::new();
    for (name, raw) in order {
        let value = match Directive::parse(raw)? {
            Directive::Literal(s) | Directive::EscapedLiteral(s) => s,
            Directive::ChooseUser => choose_user(name, users)?.name,
            Directive::CurrentUser => current_user(name, users)?.name,
            Directive::PositionalArg(index) => args
                .get(index - 1)
                .cloned()
                .ok_or_else(|| ScriptError::MissingArgument {
                    index,
                    variable: name.clone(),
                })?,
        };
        tracing::debug!(variable = %name, directive = %raw, value = %value, "resolved variable");
        vars.insert(name.clone(), value);
    }
    Ok(vars)
}

fn choose_user(name: &str, users: &mut dyn UserDirectory) -> Result<User> {
    let choice = users
        .select_user(&format!("Select user for {}:", name))
        .map_err(|source| lookup_error(name, source))?;
    match choice {
        UserChoice::Me => current_user(name, users),
        UserChoice::Display(display) => users
            .find_user(&display)
            .map_err(|source| lookup_error(name, source))?
            .ok_or(ScriptError::UserNotFound { query: display }),
    }
}

fn current_user(name: &str, users: &mut dyn UserDirectory) -> Result<User> {
    users
        .find_current_user()
        .map_err(|source| lookup_error(name, source))
}

fn lookup_error(name: &str, source: BoxError) -> ScriptError {
    ScriptError::UserLookup {
        variable: name.to_string(),
        source,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records prompts and answers from a fixed list of choices.
    #[derive(Default)]
    pub(crate) struct StubDirectory {
        pub choices: Vec<UserChoice>,
        pub prompts: Vec<String>,
        pub known: Vec<User>,
        pub me: User,
    }

    impl UserDirectory for StubDirectory {
        fn select_user(&mut self, prompt: &str) -> std::result::Result<UserChoice, BoxError> {
            self.prompts.push(prompt.to_string());
            if self.choices.is_empty() {
                return Err("no more answers".into());
            }
            Ok(self.choices.remove(0))
        }

        fn find_user(&mut self, query: &str) -> std::result::Result<Option<User>, BoxError> {
            Ok(self.known.iter().find(|u| u.matches(query)).cloned())
        }

        fn find_current_user(&mut self) -> std::result::Result<User, BoxError> {
            Ok(self.me.clone())
        }
    }

    pub(crate) fn user(login: &str, display: &str) -> User {
        User {
            name: login.into(),
            display_name: display.into(),
            active: true,
            ..User::default()
        }
    }

    fn define(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_directives() {
        assert_eq!(Directive::parse("plain").unwrap(), Directive::Literal("plain".into()));
        assert_eq!(Directive::parse("").unwrap(), Directive::Literal(String::new()));
        assert_eq!(Directive::parse("~~foo").unwrap(), Directive::EscapedLiteral("~foo".into()));
        assert_eq!(Directive::parse("~choose_user").unwrap(), Directive::ChooseUser);
        assert_eq!(Directive::parse("~me").unwrap(), Directive::CurrentUser);
        assert_eq!(Directive::parse("~12").unwrap(), Directive::PositionalArg(12));
    }

    #[test]
    fn unknown_directives() {
        for raw in ["~", "~0", "~-1", "~you", "~1x"] {
            let err = Directive::parse(raw).unwrap_err();
            assert!(
                matches!(err, ScriptError::UnknownDirective { ref directive } if directive == raw),
                "{raw} should be unknown"
            );
        }
    }

    #[test]
    fn positional_args_are_one_based() {
        let mut users = StubDirectory::default();
        let vars = resolve(
            &define(&[("first", "~1"), ("second", "~2")]),
            &args(&["widget", "gadget"]),
            &mut users,
        )
        .unwrap();
        assert_eq!(vars["first"], "widget");
        assert_eq!(vars["second"], "gadget");
    }

    #[test]
    fn missing_positional_arg() {
        let mut users = StubDirectory::default();
        let err = resolve(&define(&[("third", "~3")]), &args(&["a", "b"]), &mut users).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::MissingArgument { index: 3, ref variable } if variable == "third"
        ));
        assert_eq!(err.to_string(), "missing command line argument 3: third");
    }

    #[test]
    fn escaped_literal_strips_one_sentinel() {
        let mut users = StubDirectory::default();
        let vars = resolve(&define(&[("v", "~~foo"), ("w", "~~~bar")]), &[], &mut users).unwrap();
        assert_eq!(vars["v"], "~foo");
        assert_eq!(vars["w"], "~~bar");
    }

    #[test]
    fn literals_pass_through() {
        let mut users = StubDirectory::default();
        let vars = resolve(&define(&[("project", "PROJ"), ("ref", "$x")]), &[], &mut users).unwrap();
        assert_eq!(vars["project"], "PROJ");
        assert_eq!(vars["ref"], "$x");
    }

    #[test]
    fn me_resolves_to_current_login() {
        let mut users = StubDirectory {
            me: user("alice", "Alice"),
            ..StubDirectory::default()
        };
        let vars = resolve(&define(&[("owner", "~me")]), &[], &mut users).unwrap();
        assert_eq!(vars["owner"], "alice");
    }

    #[test]
    fn choose_user_by_display_and_me() {
        let mut users = StubDirectory {
            choices: vec![UserChoice::Display("Bob Builder (bob)".into()), UserChoice::Me],
            known: vec![user("bob", "Bob Builder")],
            me: user("alice", "Alice"),
            ..StubDirectory::default()
        };
        let vars = resolve(
            &define(&[("reviewer", "~choose_user"), ("tester", "~choose_user")]),
            &[],
            &mut users,
        )
        .unwrap();
        // Equal directive values fall back to name order.
        assert_eq!(
            users.prompts,
            vec!["Select user for reviewer:", "Select user for tester:"]
        );
        assert_eq!(vars["reviewer"], "bob");
        assert_eq!(vars["tester"], "alice");
    }

    #[test]
    fn chosen_user_must_exist() {
        let mut users = StubDirectory {
            choices: vec![UserChoice::Display("Nobody".into())],
            ..StubDirectory::default()
        };
        let err = resolve(&define(&[("owner", "~choose_user")]), &[], &mut users).unwrap_err();
        assert!(matches!(err, ScriptError::UserNotFound { ref query } if query == "Nobody"));
    }

    #[test]
    fn directory_failures_name_the_variable() {
        let mut users = StubDirectory::default();
        let err = resolve(&define(&[("owner", "~choose_user")]), &[], &mut users).unwrap_err();
        assert!(err.is_resolution_error());
        assert!(err.to_string().contains("owner"));
    }

    #[test]
    fn resolution_follows_directive_value_order() {
        // "~1" sorts first; the two equal "~choose_user" values tie-break by name.
        let mut users = StubDirectory {
            choices: vec![UserChoice::Me, UserChoice::Me],
            me: user("alice", "Alice"),
            ..StubDirectory::default()
        };
        resolve(
            &define(&[("zed", "~choose_user"), ("amy", "~choose_user"), ("arg", "~1")]),
            &args(&["x"]),
            &mut users,
        )
        .unwrap();
        assert_eq!(
            users.prompts,
            vec!["Select user for amy:", "Select user for zed:"]
        );
    }

    #[test]
    fn prompts_follow_value_not_name_order() {
        let mut users = StubDirectory {
            choices: vec![UserChoice::Me],
            me: user("alice", "Alice"),
            ..StubDirectory::default()
        };
        // "~3" sorts before "~choose_user", so the missing argument is reported
        // before anyone is prompted.
        let err = resolve(
            &define(&[("a_owner", "~choose_user"), ("z_arg", "~3")]),
            &[],
            &mut users,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::MissingArgument { .. }));
        assert!(users.prompts.is_empty());
    }
}
