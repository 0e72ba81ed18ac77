//! Explicit option structures for each pipeline stage
//!
//! Every recognized option is a field with a documented default, so a
//! misspelled option is a compile error rather than a silently ignored key.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// How byte counts are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeFormat {
    /// Exact byte count (default)
    #[default]
    Bytes,
    /// Binary units with one decimal place, e.g. `1.5K`
    Human,
    /// Binary units rounded to an integer, e.g. `2K`
    HumanCompact,
}

/// Which timestamp the date and time columns show
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TimeField {
    #[default]
    Modified,
    Accessed,
    Created,
}

/// Which directory entries are enumerated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HiddenFiles {
    /// Skip every name starting with `.` (default)
    #[default]
    Skip,
    /// Dotfiles, but not `.` and `..`
    AlmostAll,
    /// Dotfiles including `.` and `..`
    All,
}

/// How rendered entries are arranged
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// One entry per line with every long-format column
    Long,
    /// One entry per line, name-oriented columns only
    SingleColumn,
    /// Entries packed into rows no wider than `width`
    Grid { width: usize },
}

impl Default for LayoutMode {
    fn default() -> Self {
        LayoutMode::Grid {
            width: crate::styling::DEFAULT_TERMINAL_WIDTH,
        }
    }
}

/// Options consumed by the render component library
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Print uid/gid instead of names (default false)
    pub numeric_ids: bool,
    /// Default [`SizeFormat::Bytes`]
    pub size_format: SizeFormat,
    /// Append ` -> target` to symlink names (default false; on in long mode)
    pub show_link_targets: bool,
    /// Emit kind and status colors (default false)
    pub color: bool,
    /// Reference instant for recent/distant time formatting
    pub now: DateTime<Local>,
    /// Width of margin segments (default 2)
    pub margin_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            numeric_ids: false,
            size_format: SizeFormat::Bytes,
            show_link_targets: false,
            color: false,
            now: Local::now(),
            margin_width: 2,
        }
    }
}

/// Options consumed by the listing orchestrator
#[derive(Clone, Debug, Default)]
pub struct ListOptions {
    pub hidden: HiddenFiles,
    /// Follow symlinks named on the command line (`-H`; default false)
    pub follow_args: bool,
    /// Show the inode column (default false)
    pub inode: bool,
    /// Show the block-count column (default false)
    pub blocks: bool,
    /// Drop the owner column in long mode (default false)
    pub no_owner: bool,
    /// Drop the group column in long mode (default false)
    pub no_group: bool,
    /// Default [`TimeField::Modified`]
    pub time_field: TimeField,
    /// Query version control for entry status (default true via config)
    pub vcs: bool,
    pub mode: LayoutMode,
    pub render: RenderOptions,
}
