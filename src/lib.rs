// ABOUTME: Library root for healthwait - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod clock;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod poll;
pub mod probe;
pub mod task;
