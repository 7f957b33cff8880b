// ChatScribe - platform/mod.rs
//
// Platform integration: config/data directory resolution and persisted
// settings.

pub mod config;
