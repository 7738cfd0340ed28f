//! Versioned, copy-on-write store for the active user dictionary.
//!
//! The store publishes one immutable [`DictionarySnapshot`] at a time behind a
//! `RwLock<Arc<_>>`. Readers clone the `Arc` and never hold the lock while
//! segmenting, so a snapshot taken before a reload keeps working for as long
//! as its holder needs it. A reload builds a whole new snapshot and swaps the
//! pointer; a published snapshot is never modified.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::policy::ReloadPolicy;
use super::source::DictionarySource;
use crate::error::{Result, YomiError};

/// Identity of a published dictionary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DictionaryVersion {
    /// Publish counter, 0 for the dictionary built at construction.
    pub generation: u64,
    /// Modification time of the source when it was built.
    pub modified: Option<SystemTime>,
}

impl DictionaryVersion {
    /// Source modification time as a UTC timestamp.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified.map(DateTime::<Utc>::from)
    }
}

impl fmt::Display for DictionaryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modified_at() {
            Some(at) => write!(f, "generation {} ({})", self.generation, at.to_rfc3339()),
            None => write!(f, "generation {} (no source)", self.generation),
        }
    }
}

/// An immutable compiled dictionary together with its version.
#[derive(Debug)]
pub struct DictionarySnapshot<D> {
    dictionary: Option<D>,
    version: DictionaryVersion,
}

impl<D> DictionarySnapshot<D> {
    /// Get the compiled dictionary, `None` when no source is configured.
    pub fn dictionary(&self) -> Option<&D> {
        self.dictionary.as_ref()
    }

    /// Get the version of this snapshot.
    pub fn version(&self) -> DictionaryVersion {
        self.version
    }
}

/// Result of one reload check.
#[derive(Debug)]
pub enum ReloadOutcome {
    /// No dictionary source is configured.
    NoSource,
    /// The check interval has not elapsed, or another caller is checking.
    NotDue,
    /// The source has not changed since the published build.
    Unchanged,
    /// Another caller holds the reload lock; the current snapshot stays.
    Busy,
    /// A new dictionary was compiled and published.
    Reloaded(DictionaryVersion),
    /// The source could not be read or compiled; the last good dictionary stays.
    Failed(YomiError),
}

impl ReloadOutcome {
    /// Whether a new dictionary was published.
    pub fn is_reloaded(&self) -> bool {
        matches!(self, ReloadOutcome::Reloaded(_))
    }
}

/// Owner of the published user dictionary.
pub struct DictionaryStore<D> {
    published: RwLock<Arc<DictionarySnapshot<D>>>,
    source: Option<Box<dyn DictionarySource>>,
    policy: ReloadPolicy,
    reload_lock: Mutex<()>,
}

impl<D: Send + Sync> DictionaryStore<D> {
    /// Create a store with no dictionary source.
    pub fn empty() -> Self {
        DictionaryStore {
            published: RwLock::new(Arc::new(DictionarySnapshot {
                dictionary: None,
                version: DictionaryVersion::default(),
            })),
            source: None,
            policy: ReloadPolicy::default(),
            reload_lock: Mutex::new(()),
        }
    }

    /// Build the initial dictionary from `source`.
    ///
    /// Failing to read or compile the source here is a configuration error:
    /// there is no previous dictionary to fall back to.
    pub fn open<F>(source: Box<dyn DictionarySource>, policy: ReloadPolicy, compile: F) -> Result<Self>
    where
        F: FnOnce(&Path) -> Result<D>,
    {
        let modified = source
            .modified()
            .map_err(|e| YomiError::configuration(e.to_string()))?;
        let dictionary = compile(source.path()).map_err(|e| {
            YomiError::configuration(format!(
                "failed to build user dictionary '{}': {}",
                source.path().display(),
                e
            ))
        })?;
        let version = DictionaryVersion {
            generation: 0,
            modified: Some(modified),
        };
        info!(
            path = %source.path().display(),
            interval_ms = policy.min_check_interval().as_millis() as u64,
            "user dictionary loaded, {}",
            version
        );

        Ok(DictionaryStore {
            published: RwLock::new(Arc::new(DictionarySnapshot {
                dictionary: Some(dictionary),
                version,
            })),
            source: Some(source),
            policy,
            reload_lock: Mutex::new(()),
        })
    }

    /// Get the currently published snapshot.
    pub fn snapshot(&self) -> Arc<DictionarySnapshot<D>> {
        self.published.read().clone()
    }

    /// Get the currently published version.
    pub fn version(&self) -> DictionaryVersion {
        self.published.read().version
    }

    /// Get the dictionary source, if any.
    pub fn source(&self) -> Option<&dyn DictionarySource> {
        self.source.as_deref()
    }

    /// Get the minimum interval between two source checks.
    pub fn min_check_interval(&self) -> Duration {
        self.policy.min_check_interval()
    }

    /// Check the source if the reload policy says a check is due.
    pub fn check<F>(&self, compile: F) -> ReloadOutcome
    where
        F: FnOnce(&Path) -> Result<D>,
    {
        let Some(source) = self.source.as_deref() else {
            return ReloadOutcome::NoSource;
        };
        if !self.policy.try_claim() {
            return ReloadOutcome::NotDue;
        }
        self.reload_from(source, compile)
    }

    /// Check the source now, ignoring the check interval.
    pub fn force_check<F>(&self, compile: F) -> ReloadOutcome
    where
        F: FnOnce(&Path) -> Result<D>,
    {
        let Some(source) = self.source.as_deref() else {
            return ReloadOutcome::NoSource;
        };
        self.policy.mark_checked();
        self.reload_from(source, compile)
    }

    fn reload_from<F>(&self, source: &dyn DictionarySource, compile: F) -> ReloadOutcome
    where
        F: FnOnce(&Path) -> Result<D>,
    {
        let modified = match source.modified() {
            Ok(modified) => modified,
            Err(e) => {
                warn!(path = %source.path().display(), "keeping current user dictionary: {}", e);
                return ReloadOutcome::Failed(e);
            }
        };
        if self.version().modified == Some(modified) {
            debug!(path = %source.path().display(), "user dictionary unchanged");
            return ReloadOutcome::Unchanged;
        }

        let Some(_guard) = self.reload_lock.try_lock() else {
            return ReloadOutcome::Busy;
        };
        let current = self.version();
        if current.modified == Some(modified) {
            return ReloadOutcome::Unchanged;
        }

        let dictionary = match compile(source.path()) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                warn!(
                    path = %source.path().display(),
                    "failed to rebuild user dictionary, keeping {}: {}",
                    current,
                    e
                );
                return ReloadOutcome::Failed(e);
            }
        };

        let version = DictionaryVersion {
            generation: current.generation + 1,
            modified: Some(modified),
        };
        *self.published.write() = Arc::new(DictionarySnapshot {
            dictionary: Some(dictionary),
            version,
        });
        info!(path = %source.path().display(), "user dictionary reloaded, {}", version);

        ReloadOutcome::Reloaded(version)
    }
}

impl<D> fmt::Debug for DictionaryStore<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryStore")
            .field("version", &self.published.read().version)
            .field("source", &self.source)
            .field("policy", &self.policy)
            .finish()
    }
}
