//! Data models for the research forum.
//!
//! Field names on the wire match the persisted `forumTopics` document exactly, so documents
//! written by earlier clients load without migration.

mod author;
mod catalog;
mod topic;

pub use author::*;
pub use catalog::*;
pub use topic::*;
