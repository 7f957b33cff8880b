// ChatScribe - app/mod.rs
//
// Host-facing application layer: wires settings, profiles, and the log
// together and exposes the lifecycle hooks the host calls into.

pub mod session;
