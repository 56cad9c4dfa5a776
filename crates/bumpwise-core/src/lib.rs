//! Core types and reasoning for bumpwise.
//!
//! Answers "why should (or shouldn't) I upgrade package X from A to B" by
//! joining four read-only reference tables: release metadata, known security
//! issues, internal incident reports, and a cross-service compatibility
//! matrix. This crate is deliberately free of terminal and CLI dependencies;
//! the `bumpwise-cli` crate is the only presentation layer.

pub mod advisor;
pub mod compat;
pub mod conversation;
pub mod error;
pub mod explain;
pub mod knowledge;
pub mod request;
pub mod version;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
