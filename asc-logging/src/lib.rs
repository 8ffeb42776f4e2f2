//! asc-logging: NDJSON events + build manifests.
//!
//! Append-only NDJSON logs of session actions and table builds, plus a small
//! JSON manifest describing a table build for reproducibility.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build manifest schema version.
pub const BUILD_MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-preset summary inside a [`BuildManifestV1`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummaryV1 {
    pub preset: String,
    pub cells: u64,
    pub build_secs: f64,
    /// Optimal success probability from a fresh stone.
    pub start_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildManifestV1 {
    pub build_manifest_version: u32,
    pub created_ts_ms: u64,
    pub engine_version: String,

    // Hashes for reproducibility.
    pub git_hash: Option<String>,
    pub config_hash: Option<String>,

    pub num_attempts: u32,
    pub pity_tiers: u32,
    pub default_preset: String,
    pub tables: Vec<TableSummaryV1>,
}

/// One line per session action (`attempt`, `undo`, `reset`, `select_preset`, `query`).
#[derive(Debug, Clone, Serialize)]
pub struct SessionEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,

    pub action: String,
    pub preset: String,
    pub history_len: u32,
    pub pity_tier: u32,

    pub headline: String,
    pub per_track: [String; 3],
    pub recommended: [bool; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct TableBuildEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,

    pub preset: String,
    pub cells: u64,
    pub build_secs: f64,
}

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

pub fn hash_config_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

pub fn try_git_hash() -> Option<String> {
    use std::process::Command;

    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8(out.stdout).ok()?;
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

pub fn read_manifest(path: impl AsRef<Path>) -> Result<BuildManifestV1, LogError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice::<BuildManifestV1>(&bytes)?)
}

pub fn write_manifest_atomic(path: impl AsRef<Path>, m: &BuildManifestV1) -> Result<(), LogError> {
    let path = path.as_ref();
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(m)?;
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// `ASC_DEBUG_LOG=1|true|yes`, read once per process.
pub fn debug_enabled() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| matches!(std::env::var("ASC_DEBUG_LOG").as_deref(), Ok("1" | "true" | "yes")))
}

/// Write `event` to stderr as one JSON line when debug logging is on.
pub fn debug_log<T: Serialize>(event: &T) {
    if !debug_enabled() {
        return;
    }
    if let Ok(line) = serde_json::to_string(event) {
        let stderr = io::stderr();
        let mut lock = stderr.lock();
        let _ = writeln!(lock, "{line}");
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, LogError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(path: impl AsRef<Path>, flush_every_lines: u64) -> Result<Self, LogError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), LogError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), LogError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

impl std::fmt::Debug for NdjsonWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NdjsonWriter")
            .field("lines_since_flush", &self.lines_since_flush)
            .field("flush_every_lines", &self.flush_every_lines)
            .finish()
    }
}
