// ChatScribe - lib.rs
//
// Library entry point. ChatScribe is an embeddable chat log: the host
// application feeds it categorised messages and lifecycle events, and it
// produces filtered, formatted text views on file or clipboard sinks.
//
// The host (event source, command surface, configuration UI) is out of
// scope; `app::session::LoggerSession` is the surface it talks to.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
