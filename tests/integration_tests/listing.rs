//! End-to-end listings of a git working tree

use crate::common::{TestRepo, repo_with_changes, run};
use insta_cmd::assert_cmd_snapshot;

#[test]
fn test_one_per_line_shows_status_and_skips_dotfiles() {
    let repo = repo_with_changes();
    let mut cmd = repo.statls(repo.root_path());
    cmd.arg("-1");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    [ ] a.txt
    [M] b.txt

    ----- stderr -----
    ");
}

#[test]
fn test_grid_packs_entries_on_one_line() {
    let repo = repo_with_changes();
    let (stdout, stderr, code) = run(&mut repo.statls(repo.root_path()));
    assert_eq!(stdout, "[ ] a.txt  [M] b.txt\n");
    assert_eq!(stderr, "");
    assert_eq!(code, 0);
}

#[test]
fn test_all_marks_dotfile_untracked() {
    let repo = repo_with_changes();
    let mut cmd = repo.statls(repo.root_path());
    cmd.args(["-1", "-a"]);
    let (stdout, _, code) = run(&mut cmd);
    assert_eq!(code, 0);

    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.contains(&"[?] .hidden"), "{stdout}");
    assert!(lines.contains(&"[ ] a.txt"), "{stdout}");
    assert!(lines.contains(&"[M] b.txt"), "{stdout}");
    assert!(lines.iter().any(|l| l.ends_with(" .")), "{stdout}");
    assert!(lines.iter().any(|l| l.ends_with(" ..")), "{stdout}");

    let hidden = lines.iter().position(|l| l.ends_with(".hidden"));
    let a = lines.iter().position(|l| l.ends_with("a.txt"));
    assert!(hidden < a, "dotfiles sort before letters byte-wise");
}

#[test]
fn test_almost_all_skips_dot_entries() {
    let repo = repo_with_changes();
    let mut cmd = repo.statls(repo.root_path());
    cmd.args(["-1", "-A"]);
    let (stdout, _, _) = run(&mut cmd);
    assert_eq!(stdout, "[-] .git\n[?] .hidden\n[ ] a.txt\n[M] b.txt\n");
}

#[test]
fn test_directory_status_bubbles_up() {
    let repo = TestRepo::new();
    repo.write_file("src/lib.rs", "// lib\n");
    repo.write_file("src/deep/mod.rs", "// mod\n");
    repo.write_file("docs/guide.md", "# Guide\n");
    repo.write_file(".gitignore", "target/\n");
    repo.commit_all("Initial commit");
    repo.write_file("src/deep/mod.rs", "// changed\n");
    repo.write_file("notes/todo.txt", "later\n");
    repo.write_file("target/out.bin", "bin\n");

    let mut cmd = repo.statls(repo.root_path());
    cmd.arg("-1");
    let (stdout, _, _) = run(&mut cmd);
    assert_eq!(
        stdout,
        "[ ] docs\n[?] notes\n[M] src\n[!] target\n",
        "changed files mark every ancestor modified"
    );

    let mut cmd = repo.statls(&repo.root_path().join("src"));
    cmd.arg("-1");
    let (stdout, _, _) = run(&mut cmd);
    assert_eq!(stdout, "[M] deep\n[ ] lib.rs\n");
}

#[test]
fn test_staged_and_removed_files() {
    let repo = TestRepo::new();
    repo.write_file("keep.txt", "keep\n");
    repo.write_file("gone.txt", "gone\n");
    repo.commit_all("Initial commit");
    repo.write_file("new.txt", "new\n");
    repo.git(&["add", "new.txt"]);
    std::fs::remove_file(repo.root_path().join("gone.txt")).unwrap();

    let mut cmd = repo.statls(repo.root_path());
    cmd.arg("-1");
    let (stdout, _, code) = run(&mut cmd);
    assert_eq!(code, 0);
    // gone.txt no longer exists on disk, so it isn't listed
    assert_eq!(stdout, "[ ] keep.txt\n[A] new.txt\n");
}

#[test]
fn test_outside_any_tree_has_no_status_column() {
    let repo = TestRepo::new();
    let outside = repo.outside_path();
    std::fs::write(outside.join("plain.txt"), "x").unwrap();

    let mut cmd = repo.statls(&outside);
    cmd.arg("-1");
    let (stdout, stderr, code) = run(&mut cmd);
    assert_eq!(stdout, "plain.txt\n");
    assert_eq!(stderr, "");
    assert_eq!(code, 0);
}

#[test]
fn test_each_directory_is_its_own_batch() {
    let repo = repo_with_changes();
    std::fs::create_dir(repo.root_path().join("wide")).unwrap();
    repo.write_file("wide/a-much-longer-name.txt", "x");

    let mut cmd = repo.statls(repo.root_path());
    cmd.args(["-1", ".", "wide"]);
    let (stdout, _, code) = run(&mut cmd);
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        ".:\n[ ] a.txt\n[M] b.txt\n[?] wide\n\nwide:\n[?] a-much-longer-name.txt\n"
    );
}

#[test]
fn test_color_flag_styles_names_and_badges() {
    let repo = repo_with_changes();
    std::fs::create_dir(repo.root_path().join("dir")).unwrap();
    repo.write_file("dir/x", "x");

    let mut cmd = repo.statls(repo.root_path());
    cmd.args(["-1", "-G"]);
    let (stdout, _, _) = run(&mut cmd);
    assert!(stdout.contains('\x1b'), "{stdout:?}");
    assert!(stdout.contains("M]"), "{stdout:?}");

    let (plain, _, _) = run(repo.statls(repo.root_path()).arg("-1"));
    assert!(!plain.contains('\x1b'), "no color without -G: {plain:?}");
}

#[test]
fn test_verbose_logs_git_commands() {
    let repo = repo_with_changes();
    let mut cmd = repo.statls(repo.root_path());
    cmd.args(["-1", "-v"]);
    let (stdout, stderr, code) = run(&mut cmd);
    assert_eq!(code, 0);
    assert_eq!(stdout, "[ ] a.txt\n[M] b.txt\n");
    assert!(stderr.contains("git rev-parse --show-toplevel"), "{stderr}");
    assert!(stderr.contains("git status --porcelain -z"), "{stderr}");
}

#[test]
fn test_rename_marks_file_and_parent() {
    let repo = TestRepo::new();
    repo.write_file("docs/old.md", "# Old\n");
    repo.write_file("top.txt", "top\n");
    repo.commit_all("Initial commit");
    repo.git(&["mv", "docs/old.md", "docs/new.md"]);

    let (stdout, stderr, code) = run(repo.statls(repo.root_path()).arg("-1"));
    assert_eq!(stderr, "");
    assert_eq!(code, 0);
    assert_eq!(stdout, "[M] docs\n[ ] top.txt\n");

    let (stdout, _, _) = run(repo.statls(&repo.root_path().join("docs")).arg("-1"));
    assert_eq!(stdout, "[R] new.md\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_name_gets_status_without_errors() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let repo = TestRepo::new();
    repo.write_file("good", "good\n");
    repo.commit_all("Initial commit");
    std::fs::write(repo.root_path().join(OsStr::from_bytes(b"bad\xffname")), "x").unwrap();

    let (stdout, stderr, code) = run(repo.statls(repo.root_path()).arg("-1"));
    assert_eq!(stderr, "");
    assert_eq!(code, 0);
    assert_eq!(stdout, "[?] bad\u{FFFD}name\n[ ] good\n");
}
