//! Browser-style storage contracts and the settings record built on them.

pub mod config;
pub mod kv;
