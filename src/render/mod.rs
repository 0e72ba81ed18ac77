//! Render component library
//!
//! Each renderer turns one record into an ordered list of [`Segment`]s and
//! nothing else: no knowledge of other columns, of the batch, or of the
//! output mode. Degraded records (failed stat) only ever render their name.

mod size;
mod time;

use std::time::SystemTime;

use anstyle::Style;
use chrono::{DateTime, Local};

pub use size::format_size;
pub use time::{
    TIME_OF_DAY_WIDTH, UNREPRESENTABLE, format_date, format_time_of_day, is_recent, to_local,
};

use crate::metadata::{FileKind, FileRecord, FileStat};
use crate::options::{LayoutMode, ListOptions, RenderOptions, TimeField};
use crate::styling::{
    Align, DEVICE, DIRECTORY, EXECUTABLE, PIPE, SOCKET, STATUS_ADDED, STATUS_MODIFIED,
    STATUS_QUIET, STATUS_REMOVED, STATUS_UNTRACKED, SYMLINK, Segment,
};
use crate::vcs::VcsStatus;

/// Logical identifier for each column a listing can show
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Inode,
    Blocks,
    Permissions,
    Links,
    Owner,
    Group,
    Size,
    Date(TimeField),
    Time(TimeField),
    Status,
    Name,
}

impl ColumnKind {
    /// Alignment applied when padding a cell to the column width
    pub fn align(self) -> Align {
        match self {
            ColumnKind::Name => Align::Left,
            _ => Align::Right,
        }
    }

    pub fn render(self, record: &FileRecord, options: &RenderOptions) -> Vec<Segment> {
        match self {
            ColumnKind::Inode => inode(record),
            ColumnKind::Blocks => block_count(record),
            ColumnKind::Permissions => permissions(record),
            ColumnKind::Links => link_count(record),
            ColumnKind::Owner => owner(record, options),
            ColumnKind::Group => group(record, options),
            ColumnKind::Size => size(record, options),
            ColumnKind::Date(field) => date(record, field),
            ColumnKind::Time(field) => time_of_day(record, field, options),
            ColumnKind::Status => status_badge(record, options),
            ColumnKind::Name => name(record, options),
        }
    }
}

/// Columns shown for a batch, in display order.
///
/// The status column is only present when the batch carries any
/// version-control information.
pub fn active_columns(options: &ListOptions, with_status: bool) -> Vec<ColumnKind> {
    let mut columns = Vec::new();
    if options.inode {
        columns.push(ColumnKind::Inode);
    }
    if options.blocks {
        columns.push(ColumnKind::Blocks);
    }
    if options.mode == LayoutMode::Long {
        columns.push(ColumnKind::Permissions);
        columns.push(ColumnKind::Links);
        if !options.no_owner {
            columns.push(ColumnKind::Owner);
        }
        if !options.no_group {
            columns.push(ColumnKind::Group);
        }
        columns.push(ColumnKind::Size);
        columns.push(ColumnKind::Date(options.time_field));
        columns.push(ColumnKind::Time(options.time_field));
    }
    if with_status {
        columns.push(ColumnKind::Status);
    }
    columns.push(ColumnKind::Name);
    columns
}

fn number(value: u64) -> Vec<Segment> {
    vec![Segment::raw(value.to_string())]
}

pub fn inode(record: &FileRecord) -> Vec<Segment> {
    record.stat().map(|s| number(s.inode)).unwrap_or_default()
}

pub fn block_count(record: &FileRecord) -> Vec<Segment> {
    record.stat().map(|s| number(s.block_count)).unwrap_or_default()
}

/// Type code followed by the owner, group and other triads
pub fn permissions(record: &FileRecord) -> Vec<Segment> {
    let Some(stat) = record.stat() else {
        return Vec::new();
    };
    let perms = stat.permissions;
    vec![
        Segment::raw(stat.kind.type_code().to_string()),
        Segment::raw(perms.owner.symbolic()),
        Segment::raw(perms.group.symbolic()),
        Segment::raw(perms.other.symbolic()),
    ]
}

pub fn link_count(record: &FileRecord) -> Vec<Segment> {
    record.stat().map(|s| number(s.link_count)).unwrap_or_default()
}

pub fn owner(record: &FileRecord, options: &RenderOptions) -> Vec<Segment> {
    let Some(stat) = record.stat() else {
        return Vec::new();
    };
    if options.numeric_ids {
        number(stat.owner.id.into())
    } else {
        vec![Segment::raw(stat.owner.name.clone())]
    }
}

pub fn group(record: &FileRecord, options: &RenderOptions) -> Vec<Segment> {
    let Some(stat) = record.stat() else {
        return Vec::new();
    };
    if options.numeric_ids {
        number(stat.group.id.into())
    } else {
        vec![Segment::raw(stat.group.name.clone())]
    }
}

pub fn size(record: &FileRecord, options: &RenderOptions) -> Vec<Segment> {
    record
        .stat()
        .map(|s| vec![Segment::raw(format_size(s.size, options.size_format))])
        .unwrap_or_default()
}

fn timestamp(stat: &FileStat, field: TimeField) -> Option<DateTime<Local>> {
    let instant: SystemTime = match field {
        TimeField::Modified => stat.timestamps.modified,
        TimeField::Accessed => stat.timestamps.accessed,
        TimeField::Created => stat.timestamps.created,
    };
    to_local(instant)
}

pub fn date(record: &FileRecord, field: TimeField) -> Vec<Segment> {
    record
        .stat()
        .map(|s| {
            let text = timestamp(s, field)
                .map(|ts| format_date(&ts))
                .unwrap_or_else(|| UNREPRESENTABLE.to_string());
            vec![Segment::raw(text)]
        })
        .unwrap_or_default()
}

pub fn time_of_day(record: &FileRecord, field: TimeField, options: &RenderOptions) -> Vec<Segment> {
    let Some(stat) = record.stat() else {
        return Vec::new();
    };
    let text = timestamp(stat, field)
        .map(|ts| format_time_of_day(&ts, &options.now))
        .unwrap_or_else(|| UNREPRESENTABLE.to_string());
    vec![Segment::raw(text).with_min_width(TIME_OF_DAY_WIDTH)]
}

fn status_style(status: &VcsStatus) -> Style {
    match status {
        VcsStatus::Modified => STATUS_MODIFIED,
        VcsStatus::Added | VcsStatus::Renamed { .. } => STATUS_ADDED,
        VcsStatus::Removed => STATUS_REMOVED,
        VcsStatus::Untracked => STATUS_UNTRACKED,
        VcsStatus::Ignored | VcsStatus::UpToDate | VcsStatus::Unknown => STATUS_QUIET,
    }
}

/// `[X]` badge; empty when the record has no version-control information
pub fn status_badge(record: &FileRecord, options: &RenderOptions) -> Vec<Segment> {
    let Some(status) = &record.vcs_status else {
        return Vec::new();
    };
    let style = options.color.then(|| status_style(status));
    vec![Segment::maybe_styled(format!("[{}]", status.symbol()), style)]
}

fn name_style(stat: &FileStat) -> Option<Style> {
    match stat.kind {
        FileKind::Directory => Some(DIRECTORY),
        FileKind::Symlink => Some(SYMLINK),
        FileKind::Pipe => Some(PIPE),
        FileKind::Socket => Some(SOCKET),
        FileKind::BlockDevice | FileKind::CharDevice => Some(DEVICE),
        FileKind::Regular if stat.executable() => Some(EXECUTABLE),
        FileKind::Regular
        | FileKind::Whiteout
        | FileKind::Door
        | FileKind::Port
        | FileKind::Unknown => None,
    }
}

/// Entry name, colored by kind, optionally followed by ` -> target`
pub fn name(record: &FileRecord, options: &RenderOptions) -> Vec<Segment> {
    let Some(stat) = record.stat() else {
        return vec![Segment::raw(record.base_name.clone())];
    };
    let style = if options.color { name_style(stat) } else { None };
    let mut segments = vec![Segment::maybe_styled(record.base_name.clone(), style)];
    if options.show_link_targets
        && let Some(target) = &stat.link_target
    {
        segments.push(Segment::raw(" -> "));
        segments.push(Segment::raw(target.display().to_string()));
    }
    segments
}

/// Pure spacing that suppresses the column separator
pub fn margin(width: usize) -> Vec<Segment> {
    vec![Segment::margin(width)]
}
