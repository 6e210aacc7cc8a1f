//! External command-line collaborators
//!
//! Each tool is an opaque command with an exit code; its own stdout/stderr
//! is inherited so the user sees the tool's diagnostics directly.

pub mod exec;
pub mod helm;
pub mod kcat;
pub mod kubectl;
pub mod stackablectl;

pub use kubectl::{Kubectl, PortForward};
