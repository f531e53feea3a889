//! Shared helpers: path normalization and terminal logging.

pub mod log;
pub mod path;
