//! User configuration file and environment overrides

use crate::common::{repo_with_changes, run};

#[test]
fn test_vcs_can_be_disabled() {
    let repo = repo_with_changes();
    std::fs::write(repo.config_path(), "vcs = false\n").unwrap();

    let (stdout, _, code) = run(repo.statls(repo.root_path()).arg("-1"));
    assert_eq!(code, 0);
    assert_eq!(stdout, "a.txt\nb.txt\n");
}

#[test]
fn test_environment_overrides_file() {
    let repo = repo_with_changes();
    std::fs::write(repo.config_path(), "vcs = false\n").unwrap();

    let (stdout, _, _) = run(repo
        .statls(repo.root_path())
        .arg("-1")
        .env("STATLS_VCS", "true"));
    assert_eq!(stdout, "[ ] a.txt\n[M] b.txt\n");
}

#[test]
fn test_margin_width_in_grid() {
    let repo = repo_with_changes();
    std::fs::write(repo.config_path(), "margin-width = 4\nvcs = false\n").unwrap();

    let (stdout, _, _) = run(&mut repo.statls(repo.root_path()));
    assert_eq!(stdout, "a.txt    b.txt\n");
}

#[test]
fn test_malformed_config_is_fatal() {
    let repo = repo_with_changes();
    std::fs::write(repo.config_path(), "margin-width = [\n").unwrap();

    let (stdout, stderr, code) = run(repo.statls(repo.root_path()).arg("-1"));
    assert_eq!(code, 2);
    assert_eq!(stdout, "");
    assert!(stderr.starts_with("statls: Failed to load config"), "{stderr}");
}
