//! # ace2king
//!
//! A terminal scoreboard for the Ace to King card game: thirteen rounds, one
//! per card from ace to king, lowest score wins. Built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Scoring model: cards, player score sheets, session state machine
//! - [`ui`] — Terminal UI: render snapshot, scoreboard view, key handling
//! - [`persist`] — Saving finished games as JSON
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod persist;
pub mod ui;
