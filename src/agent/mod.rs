//! Agent module - the reason-then-act core
//!
//! Contains the loop controller, the directive grammar, conversation
//! history, and system prompt assembly.

pub mod controller;
pub mod directive;
pub mod history;
pub mod prompt;

pub use controller::Controller;
pub use directive::{parse, Directive};
pub use history::History;
