// src/lib.rs

//! NewsHub article library
//!
//! Content codec for inline image markers, article storage backends, the
//! article service behind the dashboard, and HTML/text rendering.

pub mod codec;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod storage;
