//! Subcommand implementations

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod completion;
pub(crate) mod package;
pub(crate) mod stage;
