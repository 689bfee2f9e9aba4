//! Command handlers, one module per top-level subcommand.

pub mod completion;
pub mod issue;
pub mod me;
pub mod version;
