//! asc-session: the action API over a shared table set.
//!
//! A [`Session`] holds one history and replays it from scratch on every
//! action; the tables behind it come from an [`asc_oracle::TableHandle`].

pub mod session;
pub mod snapshot;

pub use asc_oracle::{EngineError, TableHandle};
pub use session::Session;
pub use snapshot::{strip, Snapshot, GLYPH_EMPTY, GLYPH_FAIL, GLYPH_SUCCESS};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
