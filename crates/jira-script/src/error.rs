//! Script error types.

/// Boxed error reported by a collaborator (user directory, dispatched command).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while loading or running a script.
///
/// Wrapped causes are exposed through `source()`, not repeated in the
/// message. Every error aborts the run; nothing is retried and actions that already
/// executed are not undone.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read script")]
    Io(#[from] std::io::Error),

    /// The script is not valid YAML or does not have the expected shape.
    #[error("failed to parse script")]
    Parse(#[from] serde_yaml::Error),

    /// An entry of `actions` is not a mapping.
    #[error("action #{index} is not a mapping")]
    ActionNotMapping {
        /// 1-based position of the action in the script.
        index: usize,
    },

    /// An action has no `action` property.
    #[error("script contains an action with no 'action' property (action #{index})")]
    MissingAction { index: usize },

    /// An action's `action` property is not a string.
    #[error("script contains an action with an invalid 'action' property (action #{index})")]
    InvalidAction { index: usize },

    /// A value in an action is neither a string, a sequence nor a mapping.
    #[error("unexpected script data of type {kind}")]
    UnsupportedValue { kind: String },

    /// The `custom` field is not a mapping.
    #[error("'custom' should contain a map from custom field name to value")]
    InvalidCustom,

    /// A `$name` reference names a variable that is not defined (yet).
    #[error("unknown variable {name} in script")]
    UndefinedVariable { name: String },

    /// A `~` directive is neither a built-in nor a positional index.
    #[error("unknown built-in variable {directive}")]
    UnknownDirective { directive: String },

    /// A positional directive refers past the end of the script arguments.
    #[error("missing command line argument {index}: {variable}")]
    MissingArgument { index: usize, variable: String },

    /// No known user matches the chosen display string.
    #[error("user not found {query:?}")]
    UserNotFound { query: String },

    /// The user directory failed (network error, prompt aborted...).
    #[error("user lookup failed for {variable}")]
    UserLookup {
        variable: String,
        #[source]
        source: BoxError,
    },

    /// The action names no known `issue` subcommand.
    #[error("unknown action '{action}': no such issue subcommand")]
    SubcommandNotFound { action: String },

    /// The dispatched subcommand failed.
    #[error("action '{action}' failed")]
    SubcommandFailed {
        action: String,
        #[source]
        source: BoxError,
    },

    /// A create/clone action succeeded without reporting the new key.
    #[error("action '{action}' did not report an issue key")]
    MissingIssueKey { action: String },
}

/// Convenience alias used throughout the script crate.
pub type Result<T> = std::result::Result<T, ScriptError>;

impl ScriptError {
    /// Returns `true` for errors caused by the shape of the script itself.
    pub fn is_structure_error(&self) -> bool {
        matches!(
            self,
            Self::ActionNotMapping { .. }
                | Self::MissingAction { .. }
                | Self::InvalidAction { .. }
                | Self::UnsupportedValue { .. }
                | Self::InvalidCustom
        )
    }

    /// Returns `true` for errors raised while resolving `define`.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownDirective { .. }
                | Self::MissingArgument { .. }
                | Self::UserNotFound { .. }
                | Self::UserLookup { .. }
        )
    }
}
