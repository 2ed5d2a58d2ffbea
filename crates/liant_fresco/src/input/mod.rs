//! User input simulation.
//!
//! Applies edits the way a user would make them, then reports the UI event a
//! real element would dispatch.

mod event;

pub use event::{Edit, EventName};
