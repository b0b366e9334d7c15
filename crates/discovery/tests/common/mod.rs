//! Test infrastructure for the discovery engine.
//!
//! Scripted collaborators answer from a per-key queue of responses. A response
//! can be gated behind a `oneshot` so a test decides the order in which
//! concurrent calls complete.

#![allow(dead_code)]

pub mod fixtures;
pub mod scripted;

pub use fixtures::*;
pub use scripted::*;
