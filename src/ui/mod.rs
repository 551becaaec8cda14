//! Terminal rendering with ratatui.

pub mod checkers_scene;
pub mod game_common;

pub use checkers_scene::render_checkers_scene;
