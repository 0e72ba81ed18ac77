//! Invocation errors, help and exit codes

use crate::common::{TestRepo, run};

#[test]
fn test_unknown_flag_exits_one_with_usage() {
    let repo = TestRepo::new();
    let (stdout, stderr, code) = run(repo.statls(repo.root_path()).arg("-Z"));
    assert_eq!(code, 1);
    assert_eq!(stdout, "");
    assert!(
        stderr.starts_with("statls: unrecognized option '-Z'\n"),
        "{stderr}"
    );
    assert!(stderr.contains("Usage:"), "{stderr}");
}

#[test]
fn test_unknown_flag_inside_a_cluster() {
    let repo = TestRepo::new();
    let (_, stderr, code) = run(repo.statls(repo.root_path()).arg("-lZ"));
    assert_eq!(code, 1);
    assert!(stderr.contains("unrecognized option '-Z'"), "{stderr}");
}

#[test]
fn test_malformed_invocation_exits_two() {
    let repo = TestRepo::new();
    let (_, stderr, code) = run(repo.statls(repo.root_path()).arg("--verbose=yes"));
    assert_eq!(code, 2, "{stderr}");
}

#[test]
fn test_help_is_long_flag_only() {
    let repo = TestRepo::new();
    let (stdout, _, code) = run(repo.statls(repo.root_path()).arg("--help"));
    assert_eq!(code, 0);
    assert!(stdout.contains("Usage:"), "{stdout}");
    assert!(stdout.contains("-h"), "{stdout}");
    assert!(stdout.contains("Human-readable sizes"), "{stdout}");
}
