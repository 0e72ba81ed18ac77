//! Status aggregation: per-path status, bubbled up to containing directories

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use super::{StatusSource, VcsStatus};
use crate::metadata::{FileKind, FileRecord};

/// Absolute path to status, for one working tree
pub type StatusMap = HashMap<PathBuf, VcsStatus>;

/// Combine a child's status into an ancestor directory's current status.
///
/// Returns the ancestor's new status, or `None` if it stays as it is.
/// - `ignored` only fills an unknown ancestor
/// - `up-to-date` fills an unknown or ignored ancestor
/// - `untracked` overrides unknown, ignored and up-to-date
/// - any change (modified, added, removed, renamed) makes it `modified`
pub fn bubble(current: Option<&VcsStatus>, child: &VcsStatus) -> Option<VcsStatus> {
    use VcsStatus::*;

    let unknown = Unknown;
    let current = current.unwrap_or(&unknown);
    match child {
        Ignored => matches!(current, Unknown).then_some(Ignored),
        UpToDate => matches!(current, Unknown | Ignored).then_some(UpToDate),
        Untracked => matches!(current, Unknown | Ignored | UpToDate).then_some(Untracked),
        _ if child.is_change() => (!matches!(current, Modified)).then_some(Modified),
        _ => None,
    }
}

/// Build the status map for one working tree.
///
/// `tracked` is the baseline (up-to-date), `ignored` overrides it and
/// `deltas` override both. Paths are relative to `root`. Every known status is
/// then bubbled to each ancestor strictly between the path and `root`.
pub fn build_status_map(
    root: &Path,
    tracked: Vec<PathBuf>,
    ignored: Vec<PathBuf>,
    deltas: Vec<(PathBuf, VcsStatus)>,
) -> StatusMap {
    let mut explicit = StatusMap::new();
    for path in tracked {
        explicit.insert(root.join(path), VcsStatus::UpToDate);
    }
    for path in ignored {
        explicit.insert(root.join(path), VcsStatus::Ignored);
    }
    for (path, status) in deltas {
        explicit.insert(root.join(path), status);
    }

    let mut statuses = explicit.clone();
    for (path, status) in &explicit {
        for ancestor in path.ancestors().skip(1) {
            if ancestor == root || !ancestor.starts_with(root) {
                break;
            }
            if let Some(updated) = bubble(statuses.get(ancestor), status) {
                statuses.insert(ancestor.to_path_buf(), updated);
            }
        }
    }
    statuses
}

/// Status of `key`, falling back to its nearest ancestor with a known status.
fn lookup(statuses: &StatusMap, key: &Path) -> VcsStatus {
    key.ancestors()
        .find_map(|path| statuses.get(path))
        .cloned()
        .unwrap_or(VcsStatus::Unknown)
}

/// Location used to match a record against tree-relative status paths.
///
/// Anything but a symlink is matched at the canonical path resolved with its
/// metadata. A symlink is matched as the link, not its target, so only its
/// containing directory is canonicalized.
fn lookup_key(record: &FileRecord) -> Option<PathBuf> {
    let stat = record.stat()?;
    if stat.kind != FileKind::Symlink && stat.canonical_path.is_absolute() {
        return Some(stat.canonical_path.clone());
    }
    let name = match record.path.file_name() {
        Some(name) if !matches!(record.base_name.as_str(), "." | "..") => name,
        _ => return dunce::canonicalize(&record.path).ok(),
    };
    let parent = match record.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let parent = dunce::canonicalize(parent).ok()?;
    Some(parent.join(name))
}

/// Assign `vcs_status` to every record that lies inside a working tree.
///
/// This is the only step that mutates records. Directories are visited in
/// path order and each tree's three queries run at most once per call; any
/// query failure leaves that tree's records without status.
pub fn annotate(records: &mut [FileRecord], source: &dyn StatusSource) {
    let keys: Vec<Option<PathBuf>> = records.iter().map(lookup_key).collect();

    let dirs: BTreeSet<PathBuf> = keys
        .iter()
        .flatten()
        .map(|key| key.parent().unwrap_or(key).to_path_buf())
        .collect();

    let mut dir_roots: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut trees: HashMap<PathBuf, Option<StatusMap>> = HashMap::new();
    for dir in dirs {
        let Some(root) = source.tree_root(&dir) else {
            log::debug!("{} is not inside a working tree", dir.display());
            continue;
        };
        if !trees.contains_key(&root) {
            let statuses = load_tree(source, &root);
            trees.insert(root.clone(), statuses);
        }
        dir_roots.insert(dir, root);
    }

    for (record, key) in records.iter_mut().zip(keys) {
        let Some(key) = key else { continue };
        let dir = key.parent().unwrap_or(&key);
        let Some(statuses) = dir_roots
            .get(dir)
            .and_then(|root| trees.get(root))
            .and_then(Option::as_ref)
        else {
            continue;
        };
        record.vcs_status = Some(lookup(statuses, &key));
    }
}

fn load_tree(source: &dyn StatusSource, root: &Path) -> Option<StatusMap> {
    let queried = source.tracked(root).and_then(|tracked| {
        let ignored = source.ignored(root)?;
        let deltas = source.deltas(root)?;
        Ok((tracked, ignored, deltas))
    });
    match queried {
        Ok((tracked, ignored, deltas)) => {
            log::debug!(
                "{}: {} tracked, {} ignored, {} changed",
                root.display(),
                tracked.len(),
                ignored.len(),
                deltas.len()
            );
            Some(build_status_map(root, tracked, ignored, deltas))
        }
        Err(e) => {
            log::debug!("status queries for {} failed: {e:#}", root.display());
            None
        }
    }
}
