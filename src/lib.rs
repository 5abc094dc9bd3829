//! # Four in a Row
//!
//! The logical core of a Connect-Four-style board: a grid of dropped coins,
//! a win detector that scans rows, columns and both diagonals for four in a
//! row, and a small engine that feeds queued coin drops to the board one per
//! update tick.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: grid, colors, win detection, game state
//! - [`engine`] — Host-facing coin queue and per-tick processing
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
