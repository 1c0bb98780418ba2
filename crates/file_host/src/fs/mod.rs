//! Workspace filesystem models, helpers, and the file API contract.

pub mod events;
pub mod format;
pub mod listing;
pub mod path;
pub mod preview;
pub mod service;
pub mod types;
