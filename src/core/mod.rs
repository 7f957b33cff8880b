// ChatScribe - core/mod.rs
//
// Core business logic layer: the message buffer, category dispatch,
// profile filtering, and output path handling.
// Must NOT depend on: app, platform internals, or any host-facing crate.

pub mod category;
pub mod format;
pub mod log;
pub mod model;
pub mod output;
pub mod profile;
