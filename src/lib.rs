//! Checkers - play draughts against the computer in the terminal.
//!
//! The engine (`checkers`) is UI-agnostic; `ui` and `input` adapt it to a
//! ratatui/crossterm terminal.

pub mod build_info;
pub mod checkers;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod ui;

pub use error::{CheckersError, Result};
