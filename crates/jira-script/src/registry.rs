//! Per-action behaviour the runner needs beyond translation.

use std::collections::HashMap;

/// Variable set after an issue-creating action.
pub const ISSUE_KEY_VAR: &str = "issue_key";

/// How the runner treats an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionKind {
    /// The action creates an issue and reports its key, which is then
    /// published as `$issue_key`.
    pub captures_issue_key: bool,
}

impl ActionKind {
    pub const PLAIN: Self = Self {
        captures_issue_key: false,
    };

    pub const CREATES_ISSUE: Self = Self {
        captures_issue_key: true,
    };
}

/// Maps action names to their [`ActionKind`]. Unknown names are plain.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    kinds: HashMap<String, ActionKind>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("create", ActionKind::CREATES_ISSUE);
        registry.register("clone", ActionKind::CREATES_ISSUE);
        registry
    }
}

impl ActionRegistry {
    /// A registry where every action is plain.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Register (or replace) the kind of `action`.
    pub fn register(&mut self, action: impl Into<String>, kind: ActionKind) {
        self.kinds.insert(action.into(), kind);
    }

    /// The kind of `action`.
    pub fn kind(&self, action: &str) -> ActionKind {
        self.kinds.get(action).copied().unwrap_or(ActionKind::PLAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_clone_capture_issue_keys() {
        let registry = ActionRegistry::default();
        assert!(registry.kind("create").captures_issue_key);
        assert!(registry.kind("clone").captures_issue_key);
        assert!(!registry.kind("edit").captures_issue_key);
        assert!(!registry.kind("no-such-action").captures_issue_key);
    }

    #[test]
    fn register_new_kind() {
        let mut registry = ActionRegistry::empty();
        assert_eq!(registry.kind("create"), ActionKind::PLAIN);
        registry.register("import", ActionKind::CREATES_ISSUE);
        assert!(registry.kind("import").captures_issue_key);
    }
}
