//! Use case orchestration for depsweep.
//!
//! This crate provides the application layer: use cases that coordinate the settings,
//! repo, search and domain layers. It is thin and delegates the heavy lifting.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod render;

pub use check::{CheckInput, CheckOutput, run_check, run_check_with_oracle, verdict_exit_code};
pub use render::{render_text, serialize_report};
