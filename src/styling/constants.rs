//! Semantic style constants
//!
//! Entry-name colors follow the node kind; badge colors follow the
//! version-control status. The two palettes are applied independently.

use anstyle::{AnsiColor, Color, Style};

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

// Entry names
pub const DIRECTORY: Style = fg(AnsiColor::Blue).bold();
pub const SYMLINK: Style = fg(AnsiColor::Cyan);
pub const PIPE: Style = fg(AnsiColor::Yellow);
pub const SOCKET: Style = fg(AnsiColor::Magenta);
pub const DEVICE: Style = fg(AnsiColor::Yellow).bold();
pub const EXECUTABLE: Style = fg(AnsiColor::Green).bold();

// Status badges
pub const STATUS_MODIFIED: Style = fg(AnsiColor::Yellow);
pub const STATUS_ADDED: Style = fg(AnsiColor::Green);
pub const STATUS_REMOVED: Style = fg(AnsiColor::Red);
pub const STATUS_UNTRACKED: Style = fg(AnsiColor::Magenta);
pub const STATUS_QUIET: Style = Style::new().dimmed();

// Diagnostics
pub const ERROR: Style = fg(AnsiColor::Red);
