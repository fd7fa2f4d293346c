//! Core UI functionality for the syncpanel application.
//!
//! - [`actions`] - What key presses ask the application to do
//! - [`component`] - Base component trait and rendering abstractions
//! - [`event_handler`] - Terminal input and periodic ticks
//!
//! Components turn key events into [`Action`]s; the application applies the
//! actions that need the project model and forwards the rest back down.

pub mod actions;
pub mod component;
pub mod event_handler;

pub use actions::Action;
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
