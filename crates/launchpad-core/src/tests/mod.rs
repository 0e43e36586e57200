//! Test module for launchpad-core
//!
//! This module contains tests for:
//! - Desktop entry parsing and locale fallback
//! - Discovery order, deduplication, sorting and queries of the entry index
//! - Exec line interpretation and terminal wrapping
//! - Lock file ownership and toggle relay between instances
//! - Detached process launch
//! - Application state transitions driven by control messages and UI input

mod command_tests;
mod fixtures;
