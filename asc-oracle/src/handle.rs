//! One-shot readiness for the background table build.

use std::sync::{Arc, Mutex, OnceLock};
use std::thread::{self, JoinHandle};

use asc_core::EngineConfig;
use asc_dp::Dims;

use crate::{EngineError, TableSet};

struct Shared {
    cell: OnceLock<TableSet>,
    join: Mutex<Option<JoinHandle<()>>>,
}

/// Cloneable handle to a [`TableSet`] that is built at most once.
///
/// The set becomes visible exactly once, when the build thread stores it. Before
/// that, [`TableHandle::get`] fails fast with [`EngineError::NotReady`].
#[derive(Clone)]
pub struct TableHandle {
    shared: Arc<Shared>,
}

impl TableHandle {
    /// Start building every preset's table on a background thread.
    pub fn spawn(config: EngineConfig) -> Self {
        Self::spawn_with_dims(config, Dims::STANDARD)
    }

    pub fn spawn_with_dims(config: EngineConfig, dims: Dims) -> Self {
        Self::spawn_with(move || TableSet::build_with_dims(&config, dims))
    }

    /// Run `build` on a background thread and publish its result once.
    pub fn spawn_with<F>(build: F) -> Self
    where
        F: FnOnce() -> TableSet + Send + 'static,
    {
        let shared = Arc::new(Shared {
            cell: OnceLock::new(),
            join: Mutex::new(None),
        });
        let worker = Arc::clone(&shared);
        let join = thread::spawn(move || {
            let _ = worker.cell.set(build());
        });
        if let Ok(mut slot) = shared.join.lock() {
            *slot = Some(join);
        }
        Self { shared }
    }

    /// Wrap an already-built set.
    pub fn ready(set: TableSet) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(set);
        Self {
            shared: Arc::new(Shared {
                cell,
                join: Mutex::new(None),
            }),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.shared.cell.get().is_some()
    }

    /// The built set, or `NotReady` while the build is still running.
    pub fn get(&self) -> Result<&TableSet, EngineError> {
        self.shared.cell.get().ok_or(EngineError::NotReady)
    }

    /// Block until the build finishes.
    ///
    /// Fails with `BuildFailed` if the build thread panicked.
    pub fn wait(&self) -> Result<&TableSet, EngineError> {
        if let Some(set) = self.shared.cell.get() {
            return Ok(set);
        }
        {
            let mut slot = self.shared.join.lock().map_err(|_| EngineError::BuildFailed)?;
            if let Some(join) = slot.take() {
                join.join().map_err(|_| EngineError::BuildFailed)?;
            }
        }
        self.shared.cell.get().ok_or(EngineError::BuildFailed)
    }
}

impl std::fmt::Debug for TableHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableHandle")
            .field("ready", &self.is_ready())
            .finish()
    }
}
