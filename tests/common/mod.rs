//! # Test Utilities for statls
//!
//! ## TestRepo
//!
//! The `TestRepo` struct creates isolated git repositories in temporary directories
//! with deterministic timestamps and configuration. Each test gets a fresh repo
//! that is automatically cleaned up when the test ends.
//!
//! ## Environment Isolation
//!
//! Git commands (both the ones run here and the ones statls runs) get an
//! isolated environment through `Command::env()`:
//! - No interference from global git config
//! - Deterministic commit timestamps
//! - Consistent locale settings
//! - No user statls config
//!
//! ## Path Canonicalization
//!
//! Paths are canonicalized to handle platform differences (especially macOS symlinks
//! like /var -> /private/var), so paths printed by statls compare equal.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub struct TestRepo {
    temp_dir: TempDir, // Must keep to ensure cleanup on drop
    root: PathBuf,
}

impl TestRepo {
    /// Create a new test repository with isolated git environment
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("repo");
        std::fs::create_dir(&root).expect("Failed to create repo directory");
        // Canonicalize to resolve symlinks (important on macOS where /var is symlink to /private/var)
        let root = root
            .canonicalize()
            .expect("Failed to canonicalize temp path");

        let repo = Self { temp_dir, root };
        repo.git(&["init", "-b", "main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo
    }

    /// Configure a git command with isolated environment
    ///
    /// This sets environment variables only for the specific command,
    /// ensuring thread-safety and test isolation.
    pub fn configure_git_cmd(&self, cmd: &mut Command) {
        cmd.env("GIT_CONFIG_GLOBAL", "/dev/null");
        cmd.env("GIT_CONFIG_SYSTEM", "/dev/null");
        cmd.env("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z");
        cmd.env("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z");
        cmd.env("LC_ALL", "C");
        cmd.env("LANG", "C");
        cmd.env("SOURCE_DATE_EPOCH", "1704067200");
    }

    /// Clean environment for statls CLI commands
    ///
    /// Removes potentially interfering environment variables, points the
    /// config file at a path that doesn't exist and pins the terminal width.
    pub fn clean_cli_env(&self, cmd: &mut Command) {
        for (key, _) in std::env::vars() {
            if key.starts_with("GIT_") || key.starts_with("STATLS_") || key == "RUST_LOG" {
                cmd.env_remove(&key);
            }
        }
        self.configure_git_cmd(cmd);
        cmd.env("STATLS_CONFIG_PATH", self.config_path());
        cmd.env("COLUMNS", "80");
    }

    /// Run git in the repository root, panicking on failure
    pub fn git(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new("git");
        self.configure_git_cmd(&mut cmd);
        let output = cmd
            .args(args)
            .current_dir(&self.root)
            .output()
            .unwrap_or_else(|e| panic!("Failed to run git {}: {e}", args.join(" ")));
        if !output.status.success() {
            panic!(
                "git {} failed:\nstdout: {}\nstderr: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        output
    }

    /// Get the root path of the repository
    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Scratch directory next to the repository, outside any working tree
    pub fn outside_path(&self) -> PathBuf {
        let path = self.temp_dir.path().join("outside");
        std::fs::create_dir_all(&path).expect("Failed to create outside directory");
        path.canonicalize()
            .expect("Failed to canonicalize outside directory")
    }

    /// Location of the (normally absent) statls config file
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("statls-config.toml")
    }

    /// Write a file relative to the repo root, creating parent directories
    pub fn write_file(&self, path: &str, contents: &str) {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full, contents).unwrap_or_else(|_| panic!("Failed to write {path}"));
    }

    /// Stage everything and commit
    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-m", message]);
    }

    /// A statls command running in `dir` with a clean environment
    pub fn statls(&self, dir: &Path) -> Command {
        let mut cmd = Command::new(insta_cmd::get_cargo_bin("statls"));
        self.clean_cli_env(&mut cmd);
        cmd.current_dir(dir);
        cmd
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

/// stdout, stderr and exit code of a finished command
pub fn run(cmd: &mut Command) -> (String, String, i32) {
    let output = cmd.output().expect("Failed to run statls");
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
        output.status.code().unwrap_or(-1),
    )
}

/// The repository used by the end-to-end listing tests:
/// `a.txt` committed, `b.txt` committed then modified, `.hidden` untracked.
pub fn repo_with_changes() -> TestRepo {
    let repo = TestRepo::new();
    repo.write_file("a.txt", "alpha\n");
    repo.write_file("b.txt", "bravo\n");
    repo.commit_all("Initial commit");
    repo.write_file("b.txt", "bravo, edited\n");
    repo.write_file(".hidden", "secret\n");
    repo
}
