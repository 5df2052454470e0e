//! # CMV Common Library
//!
//! Shared code for the classical metadata validator crates:
//! - Domain model (Album, Track, Artist, Edition)
//! - Issue and Severity types emitted by rules
//! - Configuration loading
//! - Clock abstraction for year-dependent rules

pub mod config;
pub mod error;
pub mod model;
pub mod time;

pub use error::{Error, Result};
pub use model::{Album, Artist, Edition, Issue, Role, Severity, Track, VARIOUS_ARTISTS};
pub use time::{Clock, FixedClock, SystemClock};
