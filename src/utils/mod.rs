//! Utility modules for the syncpanel application.
//!
//! - [`datetime`] - Timestamp formatting helpers

pub mod datetime;
