//! Remote control surface for a networked stereo.
//!
//! The player process owns playback; this crate keeps the now-playing panel and
//! the album grid in step with it and turns user gestures into fire-and-forget
//! HTTP commands. Everything here is platform-agnostic except `web`, which
//! binds the core to the server-rendered page in the browser.

pub mod config;
pub mod error;
pub mod fragment;
pub mod gestures;
pub mod layout;
pub mod model;
pub mod navigator;
pub mod remote;
pub mod sync;
#[cfg(test)]
mod testing;
pub mod transport;
#[cfg(target_arch = "wasm32")]
pub mod web;
