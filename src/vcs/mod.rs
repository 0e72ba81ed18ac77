//! Version-control status for listed entries
//!
//! Status comes from three git queries per working tree (tracked files,
//! ignored files, working-tree deltas). [`annotate`] folds them into one map,
//! bubbles each status up to the directories that contain it, and assigns
//! every record its own status or its nearest known ancestor's.
//!
//! Nothing in here is fatal: a failing query downgrades the affected
//! directory to "no version-control information".

mod aggregate;
mod parse;

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, bail};

pub use aggregate::{StatusMap, annotate, build_status_map, bubble};
pub use parse::{parse_path_list, parse_porcelain_status};

use crate::shell_exec;

/// Status of one path relative to the working tree
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum VcsStatus {
    UpToDate,
    Modified,
    Untracked,
    Added,
    Removed,
    /// Keyed at the path present in the working tree; `from` is the other
    /// side of the rename.
    Renamed {
        from: PathBuf,
    },
    Ignored,
    Unknown,
}

impl VcsStatus {
    /// Single-character badge symbol
    pub fn symbol(&self) -> char {
        match self {
            VcsStatus::UpToDate => ' ',
            VcsStatus::Modified => 'M',
            VcsStatus::Untracked => '?',
            VcsStatus::Added => 'A',
            VcsStatus::Removed => 'D',
            VcsStatus::Renamed { .. } => 'R',
            VcsStatus::Ignored => '!',
            VcsStatus::Unknown => '-',
        }
    }

    /// Whether a child with this status marks every ancestor as modified
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            VcsStatus::Modified | VcsStatus::Added | VcsStatus::Removed | VcsStatus::Renamed { .. }
        )
    }
}

/// The queries the aggregator needs from a version-control system.
///
/// Paths returned by the listing queries are relative to the tree root.
pub trait StatusSource {
    /// Root of the working tree containing `dir`, or `None` when `dir` is
    /// not inside one (or the query fails).
    fn tree_root(&self, dir: &Path) -> Option<PathBuf>;

    /// Every tracked path
    fn tracked(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>>;

    /// Ignored, untracked paths. Ignored directories are reported once.
    fn ignored(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>>;

    /// Working-tree changes against the index and HEAD
    fn deltas(&self, root: &Path) -> anyhow::Result<Vec<(PathBuf, VcsStatus)>>;
}

/// [`StatusSource`] backed by the `git` executable
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitCli {
    fn run(&self, dir: &Path, args: &[&str]) -> anyhow::Result<Vec<u8>> {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(dir);
        let context = dir.display().to_string();
        let output = shell_exec::run(&mut cmd, Some(&context))
            .with_context(|| format!("failed to run git in {context}"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            for line in stderr.lines() {
                log::debug!("  ! {line}");
            }
            bail!("git {} exited with {}", args.join(" "), output.status);
        }
        Ok(output.stdout)
    }
}

impl StatusSource for GitCli {
    fn tree_root(&self, dir: &Path) -> Option<PathBuf> {
        let stdout = self.run(dir, &["rev-parse", "--show-toplevel"]).ok()?;
        let root = stdout.trim_ascii_end();
        if root.is_empty() {
            return None;
        }
        let root = parse::path_from_bytes(root);
        // Keep roots comparable with canonicalized record paths
        Some(dunce::canonicalize(&root).unwrap_or(root))
    }

    fn tracked(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let stdout = self.run(root, &["ls-files", "-z"])?;
        Ok(parse_path_list(&stdout))
    }

    fn ignored(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let stdout = self.run(
            root,
            &[
                "ls-files",
                "-z",
                "--others",
                "--ignored",
                "--exclude-standard",
                "--directory",
            ],
        )?;
        Ok(parse_path_list(&stdout))
    }

    fn deltas(&self, root: &Path) -> anyhow::Result<Vec<(PathBuf, VcsStatus)>> {
        let stdout = self.run(root, &["status", "--porcelain", "-z"])?;
        parse_porcelain_status(&stdout)
    }
}
