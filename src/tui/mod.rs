//! Terminal user interface for the dashboard.
//!
//! Ratatui-based presentation layer: a central [`App`] state container, a
//! message-driven event loop, and render functions for the four panels.

pub mod app;
pub mod event;
pub mod panels;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message, update};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
