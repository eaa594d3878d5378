//! Full-screen editor built on Ratatui: code pane, stdin pane, output pane
//! and the run trigger wired to the remote execution client.

pub mod app;
pub mod events;
pub mod handler;
pub mod theme;
pub mod ui;

pub use handler::run_editor;
