//! Command implementations for the groundwork CLI

pub mod completions;
pub mod plan;
pub mod provision;
pub mod version;
