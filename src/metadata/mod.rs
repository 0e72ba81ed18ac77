//! Filesystem metadata resolution
//!
//! [`resolve`] performs a non-dereferencing stat and normalizes the result into
//! a [`FileRecord`]. Failures don't propagate: the record carries the error
//! instead of the attributes, and consumers must match on [`FileRecord::entry`]
//! before reading anything else.

mod names;

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::sync::Arc;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

pub use names::NameCache;

use crate::vcs::VcsStatus;

// File type bits of st_mode
const S_IFMT: u32 = 0o170000;
const S_IFREG: u32 = 0o100000;
const S_IFDIR: u32 = 0o040000;
const S_IFLNK: u32 = 0o120000;
const S_IFBLK: u32 = 0o060000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;
const S_IFSOCK: u32 = 0o140000;
// Platform-specific kinds (BSD whiteout, Solaris door and event port)
const S_IFWHT: u32 = 0o160000;
const S_IFDOOR: u32 = 0o150000;
const S_IFPORT: u32 = 0o160000;

/// Node kind, derived from the raw mode bits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    BlockDevice,
    CharDevice,
    Pipe,
    Socket,
    Whiteout,
    Door,
    Port,
    Unknown,
}

impl FileKind {
    /// Classify `st_mode`. Checks run in a fixed order, so when two
    /// platform-specific kinds share bits the earlier one wins.
    pub fn from_mode(mode: u32) -> Self {
        let format = mode & S_IFMT;
        const ORDER: &[(u32, FileKind)] = &[
            (S_IFREG, FileKind::Regular),
            (S_IFDIR, FileKind::Directory),
            (S_IFLNK, FileKind::Symlink),
            (S_IFBLK, FileKind::BlockDevice),
            (S_IFCHR, FileKind::CharDevice),
            (S_IFIFO, FileKind::Pipe),
            (S_IFSOCK, FileKind::Socket),
            (S_IFWHT, FileKind::Whiteout),
            (S_IFDOOR, FileKind::Door),
            (S_IFPORT, FileKind::Port),
        ];
        ORDER
            .iter()
            .find(|(bits, _)| format == *bits)
            .map(|&(_, kind)| kind)
            .unwrap_or(FileKind::Unknown)
    }

    /// Single-character code used in the permissions column
    pub fn type_code(self) -> char {
        match self {
            FileKind::Regular => '-',
            FileKind::Directory => 'd',
            FileKind::Symlink => 'l',
            FileKind::BlockDevice => 'b',
            FileKind::CharDevice => 'c',
            FileKind::Pipe => 'p',
            FileKind::Socket => 's',
            FileKind::Whiteout => 'w',
            FileKind::Door => 'D',
            FileKind::Port => 'P',
            FileKind::Unknown => '?',
        }
    }
}

/// One permission class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Triad {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl Triad {
    fn from_bits(bits: u32) -> Self {
        Self {
            read: bits & 0o4 != 0,
            write: bits & 0o2 != 0,
            execute: bits & 0o1 != 0,
        }
    }

    /// `rwx` notation, `-` for unset bits
    pub fn symbolic(self) -> String {
        [
            if self.read { 'r' } else { '-' },
            if self.write { 'w' } else { '-' },
            if self.execute { 'x' } else { '-' },
        ]
        .iter()
        .collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Permissions {
    pub owner: Triad,
    pub group: Triad,
    pub other: Triad,
}

impl Permissions {
    pub fn from_mode(mode: u32) -> Self {
        Self {
            owner: Triad::from_bits(mode >> 6),
            group: Triad::from_bits(mode >> 3),
            other: Triad::from_bits(mode),
        }
    }

    pub fn any_execute(&self) -> bool {
        self.owner.execute || self.group.execute || self.other.execute
    }
}

/// A numeric owner or group id with its resolved name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamps {
    pub accessed: SystemTime,
    pub modified: SystemTime,
    pub created: SystemTime,
}

/// Attributes of an entry whose stat succeeded
#[derive(Clone, Debug)]
pub struct FileStat {
    /// Symlink-resolved location; equals the listed path when resolution fails
    pub canonical_path: PathBuf,
    pub kind: FileKind,
    pub size: u64,
    pub owner: Principal,
    pub group: Principal,
    pub permissions: Permissions,
    pub timestamps: Timestamps,
    pub link_count: u64,
    pub block_count: u64,
    pub block_size: u64,
    pub inode: u64,
    pub device: u64,
    /// Target of a symlink as stored in the link itself
    pub link_target: Option<PathBuf>,
}

impl FileStat {
    pub fn executable(&self) -> bool {
        self.permissions.any_execute()
    }
}

/// One listed filesystem entry
#[derive(Debug)]
pub struct FileRecord {
    /// Absolute or argument-relative path, never canonicalized
    pub path: PathBuf,
    pub base_name: String,
    /// Shared so the error can be reported without giving it up
    pub entry: Result<FileStat, Arc<io::Error>>,
    /// Assigned once by [`crate::vcs::annotate`]; `None` when no
    /// version-control information applies.
    pub vcs_status: Option<VcsStatus>,
}

impl FileRecord {
    pub fn stat(&self) -> Option<&FileStat> {
        self.entry.as_ref().ok()
    }

    pub fn error(&self) -> Option<&io::Error> {
        self.entry.as_ref().err().map(|e| &**e)
    }

    pub fn kind(&self) -> Option<FileKind> {
        self.stat().map(|s| s.kind)
    }
}

/// Resolve metadata for a path as given on the command line.
pub fn resolve(path: &Path, names: &mut NameCache) -> FileRecord {
    let base_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    resolve_named(path, base_name, names)
}

/// Resolve metadata for a child of a listed directory.
///
/// The name is passed through untouched so `.` and `..` keep their names
/// (`Path::file_name` normalizes them away). Only the displayed name is
/// lossily converted; the stat uses the raw bytes.
pub fn resolve_entry(dir: &Path, name: &OsStr, names: &mut NameCache) -> FileRecord {
    resolve_named(&dir.join(name), name.to_string_lossy().into_owned(), names)
}

fn resolve_named(path: &Path, base_name: String, names: &mut NameCache) -> FileRecord {
    let entry = fs::symlink_metadata(path)
        .map(|metadata| stat_from_metadata(path, &metadata, names))
        .map_err(Arc::new);
    if let Err(e) = &entry {
        log::debug!("stat {} failed: {e}", path.display());
    }
    FileRecord {
        path: path.to_path_buf(),
        base_name,
        entry,
        vcs_status: None,
    }
}

#[cfg(unix)]
fn stat_from_metadata(path: &Path, metadata: &fs::Metadata, names: &mut NameCache) -> FileStat {
    let mode = metadata.mode();
    let kind = FileKind::from_mode(mode);
    let link_target = if kind == FileKind::Symlink {
        fs::read_link(path).ok()
    } else {
        None
    };
    let modified = metadata
        .modified()
        .unwrap_or_else(|_| unix_time(metadata.mtime(), metadata.mtime_nsec()));
    let accessed = metadata
        .accessed()
        .unwrap_or_else(|_| unix_time(metadata.atime(), metadata.atime_nsec()));
    // Birth time isn't available everywhere; the inode change time stands in.
    let created = metadata
        .created()
        .unwrap_or_else(|_| unix_time(metadata.ctime(), metadata.ctime_nsec()));

    FileStat {
        canonical_path: dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
        kind,
        size: metadata.size(),
        owner: Principal {
            id: metadata.uid(),
            name: names.user_name(metadata.uid()),
        },
        group: Principal {
            id: metadata.gid(),
            name: names.group_name(metadata.gid()),
        },
        permissions: Permissions::from_mode(mode),
        timestamps: Timestamps {
            accessed,
            modified,
            created,
        },
        link_count: metadata.nlink(),
        block_count: metadata.blocks(),
        block_size: metadata.blksize(),
        inode: metadata.ino(),
        device: metadata.dev(),
        link_target,
    }
}

#[cfg(unix)]
fn unix_time(secs: i64, nanos: i64) -> SystemTime {
    let nanos = nanos.clamp(0, 999_999_999) as u32;
    if secs >= 0 {
        UNIX_EPOCH + Duration::new(secs as u64, nanos)
    } else {
        UNIX_EPOCH - Duration::new(secs.unsigned_abs(), 0) + Duration::new(0, nanos)
    }
}

#[cfg(not(unix))]
fn stat_from_metadata(path: &Path, metadata: &fs::Metadata, _names: &mut NameCache) -> FileStat {
    let file_type = metadata.file_type();
    let kind = if file_type.is_symlink() {
        FileKind::Symlink
    } else if file_type.is_dir() {
        FileKind::Directory
    } else if file_type.is_file() {
        FileKind::Regular
    } else {
        FileKind::Unknown
    };
    let modified = metadata.modified().unwrap_or(UNIX_EPOCH);
    let nobody = Principal {
        id: 0,
        name: "0".to_string(),
    };
    FileStat {
        canonical_path: dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
        kind,
        size: metadata.len(),
        owner: nobody.clone(),
        group: nobody,
        permissions: Permissions::from_mode(if metadata.permissions().readonly() { 0o444 } else { 0o644 }),
        timestamps: Timestamps {
            accessed: metadata.accessed().unwrap_or(modified),
            modified,
            created: metadata.created().unwrap_or(modified),
        },
        link_count: 1,
        block_count: 0,
        block_size: 0,
        inode: 0,
        device: 0,
        link_target: fs::read_link(path).ok(),
    }
}
