//! User dictionary management.
//!
//! A long-lived tokenizer keeps its user dictionary in a [`DictionaryStore`].
//! The store rebuilds the dictionary when its source file changes, throttled
//! by a [`ReloadPolicy`], and publishes every build as a new immutable
//! snapshot:
//!
//! ```text
//! session open ──► ReloadPolicy::try_claim ──► source.modified()
//!                        │ not due                 │ changed
//!                        ▼                         ▼
//!                  snapshot() ◄──── publish ◄── compile (under reload lock)
//! ```
//!
//! # Modules
//!
//! - [`user`] - The line-oriented user dictionary compiled by the built-in segmenter
//! - [`source`] - Locating and stat-ing the dictionary source
//! - [`policy`] - Check throttling
//! - [`store`] - Snapshot publication

pub mod policy;
pub mod source;
pub mod store;
pub mod user;

pub use policy::{DEFAULT_RELOAD_INTERVAL, ReloadPolicy};
pub use source::{DictionarySource, FileSource};
pub use store::{DictionarySnapshot, DictionaryStore, DictionaryVersion, ReloadOutcome};
pub use user::UserDictionary;
