//! Command handlers.

/// Monitor command: startup sequence and watch loop.
pub mod monitor;
