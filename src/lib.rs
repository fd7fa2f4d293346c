//! syncpanel - A terminal panel for project and container sync operations
//!
//! This library provides a sync panel that triggers project fetches and
//! container syncs, shows per-operation progress until each one finishes and
//! keeps its labels and locale fields in step with the project model. A
//! simulated in-process model and a Ratatui host come with it.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Application configuration management
//! * [`model`] - Project model contract and the local implementation
//! * [`panel`] - Progress indicators, triggers, listener bridge and field renders
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Utility functions and helpers

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Logging backend and in-memory log buffer
pub mod logger;

/// Project model contract, operation handles and the local simulation
pub mod model;

/// The sync panel itself
pub mod panel;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling
pub mod utils;
