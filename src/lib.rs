//! Media Proxy Library
//!
//! Probes media files, decides whether a proxy and an audio conversion are
//! needed, and drives ffmpeg to produce them.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
