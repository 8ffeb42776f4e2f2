//! Session controller.
//!
//! Owns one attempt history and answers every action with a fresh [`Snapshot`].
//! All actions check table readiness first: a `NotReady` action leaves the
//! session untouched.

use asc_core::{Attempt, EngineConfig, History, Outcome, Preset, Track};
use asc_logging::{now_ms, NdjsonWriter, SessionEventV1};
use asc_oracle::{EngineError, PresetTables, TableHandle};

use crate::Snapshot;

pub struct Session {
    handle: TableHandle,
    preset: Preset,
    history: History,
    events: Option<NdjsonWriter>,
}

impl Session {
    /// Start on the config's default preset, logging to `logging.events_path` if set.
    pub fn new(handle: TableHandle, config: &EngineConfig) -> Self {
        let mut session = Self::with_preset(handle, config.default_preset);
        if let Some(path) = config.logging.events_path.as_deref() {
            match NdjsonWriter::open_append_with_flush(path, config.logging.flush_every_lines) {
                Ok(w) => session.events = Some(w),
                Err(e) => eprintln!("warning: session event log {path} disabled: {e}"),
            }
        }
        session
    }

    pub fn with_preset(handle: TableHandle, preset: Preset) -> Self {
        Self {
            handle,
            preset,
            history: History::new(),
            events: None,
        }
    }

    pub fn with_event_log(mut self, writer: NdjsonWriter) -> Self {
        self.events = Some(writer);
        self
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_ready(&self) -> bool {
        self.handle.is_ready()
    }

    /// Record one attempt. A track that already holds `n` attempts is left as is.
    pub fn attempt(&mut self, track: Track, outcome: Outcome) -> Result<Snapshot, EngineError> {
        let cap = self.active()?.dims().n;
        self.history.record(Attempt::new(track, outcome), cap);
        self.finish("attempt")
    }

    /// Drop the most recent attempt, if any.
    pub fn undo(&mut self) -> Result<Snapshot, EngineError> {
        self.active()?;
        self.history.undo();
        self.finish("undo")
    }

    pub fn reset(&mut self) -> Result<Snapshot, EngineError> {
        self.active()?;
        self.history.clear();
        self.finish("reset")
    }

    /// Switch goal configuration. History is kept; callers reset separately.
    pub fn select_preset(&mut self, preset: Preset) -> Result<Snapshot, EngineError> {
        self.handle.get()?.get(preset)?;
        self.preset = preset;
        self.finish("select_preset")
    }

    pub fn query(&mut self) -> Result<Snapshot, EngineError> {
        self.finish("query")
    }

    /// Current snapshot without logging.
    pub fn snapshot(&self) -> Result<Snapshot, EngineError> {
        Ok(Snapshot::compute(self.active()?, &self.history))
    }

    fn active(&self) -> Result<&PresetTables, EngineError> {
        self.handle.get()?.get(self.preset)
    }

    fn finish(&mut self, action: &str) -> Result<Snapshot, EngineError> {
        let snapshot = self.snapshot()?;
        self.log(action, &snapshot);
        Ok(snapshot)
    }

    fn log(&mut self, action: &str, snapshot: &Snapshot) {
        let Some(w) = self.events.as_mut() else {
            return;
        };
        let event = SessionEventV1 {
            event: "session_action",
            ts_ms: now_ms(),
            action: action.to_string(),
            preset: self.preset.name().to_string(),
            history_len: self.history.len() as u32,
            pity_tier: snapshot.pity_tier as u32,
            headline: snapshot.headline_probability.clone(),
            per_track: snapshot.per_track_probability.clone(),
            recommended: snapshot.recommended,
        };
        if let Err(e) = w.write_event(&event) {
            eprintln!("warning: session event log disabled: {e}");
            self.events = None;
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("preset", &self.preset)
            .field("history", &self.history)
            .field("ready", &self.is_ready())
            .finish()
    }
}
