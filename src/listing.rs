//! Listing orchestrator
//!
//! Drives one invocation:
//! 1. Classify each argument as a direct entry or a directory to list
//! 2. Render all direct entries as one batch
//! 3. List each directory as its own batch, in argument order
//!
//! Per-argument and per-entry failures are written to the error stream and
//! counted; they never stop the remaining work.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ListError;
use crate::layout::{self, Row};
use crate::metadata::{self, FileRecord, NameCache};
use crate::options::{HiddenFiles, LayoutMode, ListOptions};
use crate::render::{ColumnKind, active_columns};
use crate::styling::{Align, ERROR, StyledLine};
use crate::vcs::{self, StatusSource};

/// What a command-line argument turned out to be
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    /// Shown as an entry of the direct batch
    Entry(PathBuf),
    /// Its children are listed
    Directory(PathBuf),
}

/// Classify an argument without following symlinks, except as allowed by
/// `follow`.
///
/// A trailing slash asks for directory treatment: the argument must then be
/// a directory or a symlink (which is listed through).
pub fn classify(path: &Path, follow: bool) -> Result<Argument, ListError> {
    let raw = path.as_os_str().to_string_lossy();
    if raw.len() > 1 && raw.ends_with('/') {
        let stripped = raw.trim_end_matches('/');
        let stripped = if stripped.is_empty() { "/" } else { stripped };
        let metadata = fs::symlink_metadata(stripped).map_err(|e| ListError::io(path, e))?;
        let file_type = metadata.file_type();
        return if file_type.is_dir() || file_type.is_symlink() {
            Ok(Argument::Directory(path.to_path_buf()))
        } else {
            Err(ListError::NotADirectory {
                path: path.to_path_buf(),
            })
        };
    }

    let metadata = fs::symlink_metadata(path).map_err(|e| ListError::io(path, e))?;
    let file_type = metadata.file_type();
    let is_dir = if file_type.is_symlink() {
        follow && fs::metadata(path).is_ok_and(|target| target.is_dir())
    } else {
        file_type.is_dir()
    };
    Ok(if is_dir {
        Argument::Directory(path.to_path_buf())
    } else {
        Argument::Entry(path.to_path_buf())
    })
}

/// Names of the immediate children of `dir`, filtered and sorted byte-wise.
///
/// Names are kept as the OS returned them; they need not be UTF-8. The
/// directory handle is dropped before this returns.
pub fn enumerate(dir: &Path, hidden: HiddenFiles) -> io::Result<Vec<OsString>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        if hidden == HiddenFiles::Skip && name.as_encoded_bytes().starts_with(b".") {
            continue;
        }
        names.push(name);
    }
    if hidden == HiddenFiles::All {
        names.push(OsString::from("."));
        names.push(OsString::from(".."));
    }
    names.sort_unstable_by(|a, b| a.as_encoded_bytes().cmp(b.as_encoded_bytes()));
    Ok(names)
}

/// Lay out one batch of records. Column widths are computed over this batch
/// only.
pub fn layout_batch(records: &[FileRecord], options: &ListOptions) -> Vec<StyledLine> {
    let with_status = records.iter().any(|r| r.vcs_status.is_some());
    let columns = active_columns(options, with_status);
    let aligns: Vec<Align> = columns.iter().map(|c| c.align()).collect();
    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column: &ColumnKind| column.render(record, &options.render))
                .collect()
        })
        .collect();

    match options.mode {
        LayoutMode::Long | LayoutMode::SingleColumn => layout::single_column(&rows, &aligns),
        LayoutMode::Grid { width } => {
            layout::grid(&rows, &aligns, width, options.render.margin_width)
        }
    }
}

/// One invocation's state: options, the status source, the name cache and
/// the failure count.
pub struct Lister<'a> {
    options: &'a ListOptions,
    source: &'a dyn StatusSource,
    names: NameCache,
    failures: usize,
    listings_printed: usize,
}

impl<'a> Lister<'a> {
    pub fn new(options: &'a ListOptions, source: &'a dyn StatusSource) -> Self {
        Self {
            options,
            source,
            names: NameCache::new(),
            failures: 0,
            listings_printed: 0,
        }
    }

    /// Number of errors reported so far
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Process exit code: 0 on full success, 1 if anything failed
    pub fn exit_code(&self) -> i32 {
        if self.failures == 0 { 0 } else { 1 }
    }

    /// List every argument, writing listings to `out` and errors to `err`.
    ///
    /// Only write failures on `out`/`err` are returned as errors.
    pub fn run(
        &mut self,
        paths: &[PathBuf],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        let mut entries = Vec::new();
        let mut directories = Vec::new();
        for path in paths {
            match classify(path, self.options.follow_args) {
                Ok(Argument::Entry(path)) => entries.push(path),
                Ok(Argument::Directory(path)) => directories.push(path),
                Err(e) => self.report(err, &e)?,
            }
        }
        log::debug!(
            "{} direct entries, {} directories",
            entries.len(),
            directories.len()
        );

        let listings = usize::from(!entries.is_empty()) + directories.len();
        let show_headers = listings > 1;

        if !entries.is_empty() {
            self.list_entries(&entries, out, err)?;
        }
        for dir in &directories {
            self.list_directory(dir, show_headers, out, err)?;
        }
        Ok(())
    }

    fn list_entries(
        &mut self,
        paths: &[PathBuf],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        let mut records: Vec<FileRecord> = paths
            .iter()
            .map(|path| {
                let mut record = metadata::resolve(path, &mut self.names);
                record.base_name = path.to_string_lossy().into_owned();
                record
            })
            .collect();
        records.sort_by(|a, b| a.base_name.as_bytes().cmp(b.base_name.as_bytes()));
        self.separate(out)?;
        self.emit_batch(records, out, err)
    }

    fn list_directory(
        &mut self,
        dir: &Path,
        show_header: bool,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        self.separate(out)?;
        if show_header {
            writeln!(out, "{}:", dir.display())?;
        }

        let names = match enumerate(dir, self.options.hidden) {
            Ok(names) => names,
            Err(e) => return self.report(err, &ListError::io(dir, e)),
        };
        let records = names
            .iter()
            .map(|name| metadata::resolve_entry(dir, name, &mut self.names))
            .collect();
        self.emit_batch(records, out, err)
    }

    fn emit_batch(
        &mut self,
        mut records: Vec<FileRecord>,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        for record in &records {
            if let Err(e) = &record.entry {
                self.report(err, &ListError::shared_io(&record.path, Arc::clone(e)))?;
            }
        }

        if self.options.vcs {
            vcs::annotate(&mut records, self.source);
        }

        for line in layout_batch(&records, self.options) {
            writeln!(out, "{}", line.render(Align::Left))?;
        }
        Ok(())
    }

    /// Blank line before every listing but the first
    fn separate(&mut self, out: &mut dyn Write) -> io::Result<()> {
        if self.listings_printed > 0 {
            writeln!(out)?;
        }
        self.listings_printed += 1;
        Ok(())
    }

    fn report(&mut self, err: &mut dyn Write, error: &ListError) -> io::Result<()> {
        self.failures += 1;
        if self.options.render.color {
            writeln!(err, "statls: {ERROR}{error}{ERROR:#}")
        } else {
            writeln!(err, "statls: {error}")
        }
    }
}
