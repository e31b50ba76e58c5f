//! Glacier Player - Playback Management
//!
//! The playback/queue controller behind every Glacier screen.
//!
//! This crate provides:
//! - Transport (play, pause, resume, clear) with simulated progress
//! - Queue traversal with shuffle and repeat (Off, All, One)
//! - Seeking by percentage or absolute time
//! - Listening history (deduplicated, bounded)
//! - Favorites, downloads with a free-tier limit, user playlists
//! - Notification, privacy and download-quality settings
//! - Write-through persistence to a key-value store
//!
//! # Architecture
//!
//! [`PlayerController`] is a synchronous state machine; nothing in it
//! awaits. [`PlayerSession`] shares one controller between screens, drives
//! its one-second [`Ticker`] and runs the persistence writer on a tokio
//! runtime. The store and the catalog are injected through the
//! `glacier-core` traits, so the crate has no storage backend of its own.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use glacier_core::Track;
//! use glacier_playback::{PlayerController, RepeatMode};
//!
//! let mut player = PlayerController::default();
//!
//! let a = Track::new("a", "Aurora").with_duration("4:32");
//! let b = Track::new("b", "Glacier Wind").with_duration("45 min");
//! player.play_track(a.clone(), Some(vec![a, b]));
//! assert_eq!(player.duration(), 272);
//!
//! player.play_next();
//! assert_eq!(player.current_track().map(|t| t.id.as_str()), Some("b"));
//! assert_eq!(player.duration(), 2700);
//!
//! player.toggle_repeat();
//! assert_eq!(player.repeat_mode(), RepeatMode::All);
//! ```
//!
//! # Example: Shared Session
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use glacier_playback::{PlayerConfig, PlayerSession};
//! use glacier_storage::{MemoryStore, StaticCatalog};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let (session, hydration) = PlayerSession::start(
//!     PlayerConfig::default(),
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(StaticCatalog::sample()?),
//! )?;
//! let _ = hydration.await;
//!
//! let first = session.with(|c| c.queue().first().cloned());
//! if let Some(track) = first {
//!     session.play_track(track, None);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod controller;
mod error;
mod history;
mod library;
mod persistence;
mod queue;
mod session;
mod ticker;
pub mod types;

// Public exports
pub use config::PlayerConfig;
pub use controller::PlayerController;
pub use error::{DownloadRejection, PlaybackError, Result};
pub use history::History;
pub use library::Library;
pub use persistence::{PersistedState, Persistence, StoreKey};
pub use queue::Queue;
pub use session::PlayerSession;
pub use ticker::Ticker;
pub use types::{PlaybackStatus, RepeatMode, TickOutcome, TickerKey};
