//! Workspace dependency model and the three consistency checks.
//!
//! Input: a workspace model built elsewhere, plus a [`oracle::UsageOracle`].
//! Output: findings + verdict. This crate does no filesystem IO itself; the usage
//! verifier only fans searches out to the oracle on scoped threads.

#![forbid(unsafe_code)]

pub mod checks;
pub mod model;
pub mod oracle;
pub mod policy;
pub mod report;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{compute_verdict, evaluate};
