//! CLI module - REPL and commands

pub mod commands;
pub mod repl;

pub use repl::Repl;
