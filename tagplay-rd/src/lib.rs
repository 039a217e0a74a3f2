//! # tagplay Reader Daemon Library
//!
//! Components of the tagplay-rd daemon:
//! - Tag reader adapter (blocking hardware read behind a trait seam)
//! - Playback client for the media player's HTTP control interface
//! - Dispatch loop tying reader, debounce filter, track map and player
//!   together

pub mod dispatch;
pub mod player;
pub mod reader;
