//! Argument classification and per-argument failures

use std::os::unix::fs::symlink;

use crate::common::{TestRepo, run};

/// `outside/target/inner` plus `outside/link -> target`
fn symlinked_dir() -> (TestRepo, std::path::PathBuf) {
    let repo = TestRepo::new();
    let outside = repo.outside_path();
    std::fs::create_dir(outside.join("target")).unwrap();
    std::fs::write(outside.join("target/inner"), "x").unwrap();
    symlink("target", outside.join("link")).unwrap();
    (repo, outside)
}

#[test]
fn test_missing_path_alongside_directory() {
    let repo = TestRepo::new();
    let outside = repo.outside_path();
    std::fs::create_dir(outside.join("y")).unwrap();
    std::fs::write(outside.join("y/f"), "f").unwrap();

    let (stdout, stderr, code) = run(repo.statls(&outside).args(["x", "y"]));
    assert_eq!(stderr, "statls: x: No such file or directory\n");
    assert_eq!(stdout, "f\n");
    assert_eq!(code, 1);
}

#[test]
fn test_symlink_to_directory_is_an_entry_by_default() {
    let (repo, outside) = symlinked_dir();
    let (stdout, _, code) = run(repo.statls(&outside).args(["-1", "link"]));
    assert_eq!(stdout, "link\n");
    assert_eq!(code, 0);
}

#[test]
fn test_trailing_slash_lists_through_symlink() {
    let (repo, outside) = symlinked_dir();
    let (stdout, _, _) = run(repo.statls(&outside).args(["-1", "link/"]));
    assert_eq!(stdout, "inner\n");

    let (stdout, _, _) = run(repo.statls(&outside).args(["-1", "-H", "link/"]));
    assert_eq!(stdout, "inner\n");
}

#[test]
fn test_follow_flags() {
    let (repo, outside) = symlinked_dir();
    let (stdout, _, _) = run(repo.statls(&outside).args(["-1", "-H", "link"]));
    assert_eq!(stdout, "inner\n");

    let (stdout, _, _) = run(repo.statls(&outside).args(["-1", "-H", "-P", "link"]));
    assert_eq!(stdout, "link\n", "-P after -H wins");
}

#[test]
fn test_trailing_slash_on_regular_file() {
    let repo = TestRepo::new();
    let outside = repo.outside_path();
    std::fs::write(outside.join("file.txt"), "x").unwrap();

    let (stdout, stderr, code) = run(repo.statls(&outside).args(["file.txt/", "file.txt"]));
    assert_eq!(stderr, "statls: file.txt/: Not a directory\n");
    assert_eq!(stdout, "file.txt\n");
    assert_eq!(code, 1);
}

#[test]
fn test_files_before_directories_with_headers() {
    let (repo, outside) = symlinked_dir();
    std::fs::write(outside.join("z.txt"), "z").unwrap();
    std::fs::write(outside.join("a.txt"), "a").unwrap();

    let (stdout, _, code) =
        run(repo.statls(&outside).args(["-1", "target", "z.txt", "a.txt"]));
    assert_eq!(code, 0);
    assert_eq!(stdout, "a.txt\nz.txt\n\ntarget:\ninner\n");
}

#[test]
fn test_unreadable_directory_is_reported() {
    use std::os::unix::fs::PermissionsExt;

    let repo = TestRepo::new();
    let outside = repo.outside_path();
    let locked = outside.join("locked");
    std::fs::create_dir(&locked).unwrap();
    std::fs::write(locked.join("secret"), "s").unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores directory permissions; nothing to observe then
    if std::fs::read_dir(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let (_, stderr, code) = run(repo.statls(&outside).arg("locked"));
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(stderr, "statls: locked: Permission denied\n");
    assert_eq!(code, 1);
}
