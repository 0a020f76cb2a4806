//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Time management and fixed-step tick scheduling
//! - Logging utilities

pub mod logging;
pub mod time;
