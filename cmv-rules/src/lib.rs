//! # CMV Rule Engine
//!
//! Validates classical-music album metadata against cataloguing rules and,
//! optionally, against a trusted reference album.
//!
//! - [`rule`]: the contract every rule implements (album-scoped or track-scoped)
//! - [`registry`]: the installed rule set, built once at engine construction
//! - [`engine`]: the dispatcher pairing actual and reference tracks
//! - [`aggregate`]: counts and weighted score over one run
//! - [`text`]: shared classical-music text predicates
//! - [`rules`]: the rule library
//!
//! ```rust,ignore
//! use cmv_rules::Engine;
//!
//! let engine = Engine::standard()?;
//! let result = engine.check(&album, reference.as_ref());
//! for issue in &result.issues {
//!     println!("{}", issue);
//! }
//! println!("score {:.2}", result.score);
//! ```

pub mod aggregate;
pub mod engine;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod text;

pub use aggregate::{SeverityCounts, ValidationResult};
pub use engine::Engine;
pub use registry::RuleRegistry;
pub use rule::{AlbumRule, CheckContext, RuleMetadata, RuleResult, TrackRule};
