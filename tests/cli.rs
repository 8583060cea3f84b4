//! Integration tests for top-level CLI behavior.
//!
//! Git is served from a cassette (`KICAD_GITINFO_REPLAY_GIT`) so these tests
//! do not need a real repository.

use std::path::Path;
use std::process::Command;

use serde_json::{json, Value};

use kicad_gitinfo::cassette::recorder::CassetteRecorder;

struct Repo<'a> {
    branch: &'a str,
    tag: Option<&'a str>,
    status: &'a [&'a str],
}

const HASH: &str = "9fceb02d0ae598e95dc970b74767f19372d61af8";

fn write_git_cassette(path: &Path, repo: &Repo<'_>) {
    let mut recorder = CassetteRecorder::new(path, "cli-test", HASH);
    let mut ok = |method: &str, value: Value| {
        recorder.record("git", method, Value::Null, json!({ "ok": value }));
    };
    ok("verify_repository", Value::Null);
    ok("head_hash", json!(HASH));
    ok("head_short_hash", json!("9fceb02"));
    ok("current_branch", json!(repo.branch));
    ok("exact_tag", json!(repo.tag));
    ok("head_date", json!("2024-11-02"));
    ok("head_author", json!("Grace Hopper"));
    ok("working_tree_status", json!(repo.status));
    recorder.finish().expect("write cassette");
}

fn run_in(dir: &Path, cassette: Option<&Path>, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_kicad-gitinfo");
    let mut cmd = Command::new(bin);
    cmd.args(args)
        .current_dir(dir)
        .env_remove("KICAD_GITINFO_RECORD")
        .env_remove("KICAD_GITINFO_REPLAY");
    match cassette {
        Some(path) => cmd.env("KICAD_GITINFO_REPLAY_GIT", path),
        None => cmd.env_remove("KICAD_GITINFO_REPLAY_GIT"),
    };
    cmd.output().expect("failed to run kicad-gitinfo binary")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn setup(repo: &Repo<'_>) -> (tempfile::TempDir, tempfile::TempDir, std::path::PathBuf) {
    let work = tempfile::tempdir().unwrap();
    let cassettes = tempfile::tempdir().unwrap();
    let cassette = cassettes.path().join("git.cassette.yaml");
    write_git_cassette(&cassette, repo);
    (work, cassettes, cassette)
}

const CLEAN_MAIN: Repo<'static> = Repo {
    branch: "main",
    tag: None,
    status: &[],
};

#[test]
fn tagged_clean_commit_is_written() {
    let (work, _c, cassette) = setup(&Repo {
        branch: "main",
        tag: Some("v1.0.0"),
        status: &[],
    });
    std::fs::write(work.path().join("amp.kicad_pro"), "{\"meta\": {\"version\": 1}}\n").unwrap();

    let output = run_in(work.path(), Some(&cassette), &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Found 1 KiCad project(s):"));
    assert!(stdout.contains("✓ Updated amp.kicad_pro with git information:"));
    assert!(stdout.contains("  GIT_TAG: v1.0.0"));

    let doc = read_json(&work.path().join("amp.kicad_pro"));
    assert_eq!(doc["meta"], json!({"version": 1}));
    assert_eq!(
        doc["text_variables"],
        json!({
            "GIT_HASH": HASH,
            "GIT_SHORT_HASH": "9fceb02",
            "GIT_BRANCH": "main",
            "GIT_TAG": "v1.0.0",
            "GIT_DATE": "2024-11-02",
            "GIT_AUTHOR": "Grace Hopper",
            "GIT_DIRTY": "clean"
        })
    );
}

#[test]
fn modified_tree_is_dirty() {
    let (work, _c, cassette) = setup(&Repo {
        branch: "main",
        tag: Some("v1.0.0"),
        status: &[" M amp.kicad_sch"],
    });
    std::fs::write(work.path().join("amp.kicad_pro"), "{}").unwrap();

    let output = run_in(work.path(), Some(&cassette), &["amp.kicad_pro"]);

    assert!(output.status.success());
    let doc = read_json(&work.path().join("amp.kicad_pro"));
    assert_eq!(doc["text_variables"]["GIT_DIRTY"], json!("dirty"));
    assert_eq!(doc["text_variables"]["GIT_TAG"], json!("v1.0.0"));
}

#[test]
fn detached_head_without_tag_writes_empty_strings() {
    let (work, _c, cassette) = setup(&Repo {
        branch: "",
        tag: None,
        status: &[],
    });
    std::fs::write(work.path().join("amp.kicad_pro"), "{}").unwrap();

    let output = run_in(work.path(), Some(&cassette), &[]);

    assert!(output.status.success());
    let vars = read_json(&work.path().join("amp.kicad_pro"))["text_variables"].clone();
    assert_eq!(vars["GIT_BRANCH"], json!(""));
    assert_eq!(vars["GIT_TAG"], json!(""));
    assert_eq!(vars["GIT_HASH"], json!(HASH));
}

#[test]
fn missing_explicit_file_exits_with_error_and_creates_nothing() {
    let (work, _c, cassette) = setup(&CLEAN_MAIN);

    let output = run_in(work.path(), Some(&cassette), &["missing.kicad_pro"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Project file 'missing.kicad_pro' not found"));
    assert!(!work.path().join("missing.kicad_pro").exists());
}

#[test]
fn no_project_files_exits_with_error() {
    let (work, _c, cassette) = setup(&CLEAN_MAIN);
    std::fs::write(work.path().join("README.md"), "# amp").unwrap();

    let output = run_in(work.path(), Some(&cassette), &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("No *.kicad_pro files found"));
}

#[test]
fn invalid_project_is_reported_and_valid_one_still_updated() {
    let (work, _c, cassette) = setup(&CLEAN_MAIN);
    std::fs::create_dir(work.path().join("psu")).unwrap();
    std::fs::write(work.path().join("amp.kicad_pro"), "{\"board\": ").unwrap();
    std::fs::write(work.path().join("psu/psu.kicad_pro"), "{\"board\": {}}").unwrap();

    let output = run_in(work.path(), Some(&cassette), &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Found 2 KiCad project(s):"));
    assert!(stderr.contains("Error updating amp.kicad_pro: invalid JSON"));
    assert_eq!(std::fs::read_to_string(work.path().join("amp.kicad_pro")).unwrap(), "{\"board\": ");
    let psu = read_json(&work.path().join("psu/psu.kicad_pro"));
    assert_eq!(psu["text_variables"]["GIT_BRANCH"], json!("main"));
}

#[test]
fn dry_run_leaves_files_alone() {
    let (work, _c, cassette) = setup(&CLEAN_MAIN);
    std::fs::write(work.path().join("amp.kicad_pro"), "{}").unwrap();

    let output = run_in(work.path(), Some(&cassette), &["--dry-run"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Would update amp.kicad_pro"));
    assert_eq!(std::fs::read_to_string(work.path().join("amp.kicad_pro")).unwrap(), "{}");
}

#[test]
fn outside_a_repository_exits_with_error() {
    let work = tempfile::tempdir().unwrap();
    std::fs::write(work.path().join("amp.kicad_pro"), "{}").unwrap();
    let ceiling = work.path().parent().unwrap_or(work.path());

    let bin = env!("CARGO_BIN_EXE_kicad-gitinfo");
    let output = Command::new(bin)
        .current_dir(work.path())
        .env("GIT_CEILING_DIRECTORIES", ceiling)
        .env_remove("KICAD_GITINFO_REPLAY_GIT")
        .env_remove("KICAD_GITINFO_REPLAY")
        .env_remove("KICAD_GITINFO_RECORD")
        .output()
        .expect("failed to run kicad-gitinfo binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Not in a git repository"));
    assert_eq!(std::fs::read_to_string(work.path().join("amp.kicad_pro")).unwrap(), "{}");
}

#[test]
fn help_shows_usage() {
    let work = tempfile::tempdir().unwrap();
    let output = run_in(work.path(), None, &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("PROJECT_FILE"));
    assert!(stdout.contains("--dry-run"));
}
