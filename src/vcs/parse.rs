//! Parsers for git's NUL-separated listing formats
//!
//! Output is parsed as bytes: with `-z` git prints paths verbatim, and they
//! need not be UTF-8.

use std::path::PathBuf;

use anyhow::{Context, bail};

use super::VcsStatus;

/// Path from raw bytes printed by git
#[cfg(unix)]
pub(crate) fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
pub(crate) fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

fn trim_trailing_slashes(mut bytes: &[u8]) -> &[u8] {
    while let [rest @ .., b'/'] = bytes {
        bytes = rest;
    }
    bytes
}

/// Parse `git ls-files -z` output. Directory entries (trailing `/`) are
/// reported without the slash.
pub fn parse_path_list(output: &[u8]) -> Vec<PathBuf> {
    output
        .split(|&b| b == 0)
        .map(trim_trailing_slashes)
        .filter(|path| !path.is_empty())
        .map(path_from_bytes)
        .collect()
}

/// Parse `git status --porcelain -z` output.
///
/// Each record is `XY <path>`; renames and copies are followed by a second
/// record holding the origin path.
pub fn parse_porcelain_status(output: &[u8]) -> anyhow::Result<Vec<(PathBuf, VcsStatus)>> {
    let mut entries = Vec::new();
    let mut records = output.split(|&b| b == 0).filter(|record| !record.is_empty());

    while let Some(record) = records.next() {
        let &[x, y, b' ', ref path @ ..] = record else {
            bail!("malformed status record: {:?}", String::from_utf8_lossy(record));
        };
        let path = path_from_bytes(trim_trailing_slashes(path));
        let has = |c: u8| x == c || y == c;

        let status = if x == b'?' && y == b'?' {
            VcsStatus::Untracked
        } else if x == b'!' && y == b'!' {
            VcsStatus::Ignored
        } else if has(b'R') {
            let from = records
                .next()
                .with_context(|| format!("rename of {} is missing its origin", path.display()))?;
            VcsStatus::Renamed {
                from: path_from_bytes(from),
            }
        } else if has(b'C') {
            records
                .next()
                .with_context(|| format!("copy to {} is missing its origin", path.display()))?;
            VcsStatus::Added
        } else if has(b'A') {
            VcsStatus::Added
        } else if has(b'D') {
            VcsStatus::Removed
        } else if has(b'M') || has(b'T') || has(b'U') {
            VcsStatus::Modified
        } else {
            log::debug!(
                "skipping unrecognized status code {:?} for {}",
                String::from_utf8_lossy(&[x, y]),
                path.display()
            );
            continue;
        };
        entries.push((path, status));
    }

    Ok(entries)
}
