//! Terminal Inbound Adapter
//!
//! Line-oriented shell that turns typed commands into session operations and
//! renders [`converter_types::SessionView`] snapshots as text.

mod commands;
pub mod render;
mod shell;

pub use commands::{Command, CommandError};
pub use shell::Shell;
