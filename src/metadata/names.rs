//! Owner and group name lookup with per-run memoization

use std::collections::HashMap;

/// Memoizes uid/gid to name lookups for the lifetime of one program run.
///
/// Entries are inserted lazily and never invalidated. A lookup miss is cached
/// as the decimal id so repeated misses don't hit the user database again.
#[derive(Debug, Default)]
pub struct NameCache {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_name(&mut self, uid: u32) -> String {
        self.users
            .entry(uid)
            .or_insert_with(|| lookup_user(uid).unwrap_or_else(|| uid.to_string()))
            .clone()
    }

    pub fn group_name(&mut self, gid: u32) -> String {
        self.groups
            .entry(gid)
            .or_insert_with(|| lookup_group(gid).unwrap_or_else(|| gid.to_string()))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.users.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(unix)]
fn lookup_user(uid: u32) -> Option<String> {
    use nix::unistd::{Uid, User};
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(user) => user.map(|u| u.name),
        Err(e) => {
            log::debug!("user lookup for uid {uid} failed: {e}");
            None
        }
    }
}

#[cfg(unix)]
fn lookup_group(gid: u32) -> Option<String> {
    use nix::unistd::{Gid, Group};
    match Group::from_gid(Gid::from_raw(gid)) {
        Ok(group) => group.map(|g| g.name),
        Err(e) => {
            log::debug!("group lookup for gid {gid} failed: {e}");
            None
        }
    }
}

#[cfg(not(unix))]
fn lookup_user(_uid: u32) -> Option<String> {
    None
}

#[cfg(not(unix))]
fn lookup_group(_gid: u32) -> Option<String> {
    None
}
