//! Event model produced by worksheet extraction.
//!
//! Events are ephemeral: the parser builds one, hands it to the caller and
//! keeps no history of what it emitted.

mod event;

pub use event::*;
