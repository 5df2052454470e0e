//! Domain model
//!
//! Value types the rule engine operates on. Entities are built once by the
//! caller (descriptor parser, tag reader, test harness), traverse the engine
//! read-only, and are dropped afterwards.

mod album;
mod artist;
mod issue;
mod track;

pub use album::{Album, Edition, VARIOUS_ARTISTS};
pub use artist::{Artist, Role};
pub use issue::{Issue, Severity};
pub use track::Track;
