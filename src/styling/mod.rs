//! Consolidated styling module for terminal output.
//!
//! This module uses the anstyle ecosystem:
//! - anstream for color-aware output
//! - anstyle for composable styling
//! - Semantic style constants for entry kinds and status badges
//!
//! Listing output goes to stdout, diagnostics to stderr.

mod constants;
mod format;
mod line;

// Re-exports from anstream (color-aware output)
pub use anstream::eprintln;

pub use constants::*;
pub use format::{DEFAULT_TERMINAL_WIDTH, get_terminal_width};
pub use line::{Align, Segment, StyledLine};
