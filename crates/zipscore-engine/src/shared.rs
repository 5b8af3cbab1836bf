//! Shared engine handle with copy-then-swap reload.
//!
//! Readers take an `Arc` snapshot and keep using it for the whole request.
//! `reload` builds the replacement engine outside the lock and swaps the
//! pointer, so a reader never observes a partially built dataset.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use zipscore_model::ScoringConfig;

use crate::engine::LocationEngine;
use crate::error::EngineError;

/// Thread-safe handle to the current [`LocationEngine`].
#[derive(Debug)]
pub struct SharedEngine {
    path: PathBuf,
    config: ScoringConfig,
    current: RwLock<Arc<LocationEngine>>,
}

impl SharedEngine {
    /// Eagerly load the dataset at `path`.
    pub fn new(path: &Path, config: ScoringConfig) -> Result<Self, EngineError> {
        let engine = LocationEngine::load(path, config.clone())?;
        Ok(Self {
            path: path.to_path_buf(),
            config,
            current: RwLock::new(Arc::new(engine)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current engine. Holding the snapshot keeps it alive across reloads.
    pub fn snapshot(&self) -> Arc<LocationEngine> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Rebuild from the original path and configuration, then swap it in.
    ///
    /// On failure the previous engine stays active.
    pub fn reload(&self) -> Result<Arc<LocationEngine>, EngineError> {
        tracing::info!(path = %self.path.display(), "reloading dataset");
        match LocationEngine::load(&self.path, self.config.clone()) {
            Ok(engine) => {
                let engine = Arc::new(engine);
                self.replace(Arc::clone(&engine));
                Ok(engine)
            }
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "reload failed, keeping previous dataset"
                );
                Err(error)
            }
        }
    }

    /// Swap in `engine`, returning the one it replaced.
    pub fn replace(&self, engine: Arc<LocationEngine>) -> Arc<LocationEngine> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, engine)
    }
}
