use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

struct Workspace {
    _dir: tempfile::TempDir,
    vault: PathBuf,
    settings: PathBuf,
}

impl Workspace {
    fn new(notes: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let vault = dir.path().join("vault");
        fs::create_dir_all(&vault).expect("create vault");
        for (path, content) in notes {
            write_file(&vault.join(path), content);
        }
        let settings = dir.path().join("config").join("settings.toml");
        Self {
            _dir: dir,
            vault,
            settings,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_todaystamp"));
        cmd.args(args)
            .arg("--vault")
            .arg(&self.vault)
            .arg("--settings")
            .arg(&self.settings)
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> (bool, String, String) {
        let output = self.command(args).output().expect("run todaystamp");
        (
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        )
    }

    fn ok(&self, args: &[&str]) -> String {
        let (ok, stdout, stderr) = self.run(args);
        assert!(ok, "{args:?} failed, stderr: {stderr}");
        stdout
    }

    fn note(&self, path: &str) -> String {
        fs::read_to_string(self.vault.join(path)).expect("read note")
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

#[test]
fn tick_prepends_frontmatter() {
    let ws = Workspace::new(&[("note.md", "hello world")]);
    ws.ok(&["set-note", "note.md"]);
    ws.ok(&["set-format", "[fixed]"]);

    let stdout = ws.ok(&["tick"]);
    assert!(stdout.contains("Updated note.md"), "stdout: {stdout}");
    assert_eq!(ws.note("note.md"), "---\ntoday: \"fixed\"\n---\n\nhello world");

    // A second tick leaves a single today line
    ws.ok(&["tick"]);
    assert_eq!(ws.note("note.md"), "---\ntoday: \"fixed\"\n---\n\nhello world");
}

#[test]
fn tick_replaces_existing_today_line() {
    let ws = Workspace::new(&[(
        "daily.md",
        "---\ntitle: Daily\ntoday: \"old\"\n---\n# Body\n",
    )]);
    ws.ok(&["set-note", "daily.md"]);
    ws.ok(&["set-format", "[new]"]);
    ws.ok(&["tick"]);

    assert_eq!(
        ws.note("daily.md"),
        "---\ntitle: Daily\ntoday: \"new\"\n---\n# Body\n"
    );
}

#[test]
fn tick_without_note_is_a_noop() {
    let ws = Workspace::new(&[("note.md", "untouched")]);
    let stdout = ws.ok(&["tick"]);
    assert!(stdout.contains("No note configured"));
    assert_eq!(ws.note("note.md"), "untouched");
    assert!(!ws.settings.exists());
}

#[test]
fn tick_with_missing_note_is_skipped() {
    let ws = Workspace::new(&[]);
    ws.ok(&["set-note", "gone.md"]);
    let stdout = ws.ok(&["tick"]);
    assert!(stdout.contains("Note not found: gone.md"));
}

#[test]
fn invalid_interval_is_rejected_without_saving() {
    let ws = Workspace::new(&[]);
    for bad in ["abc", "0", "-5", "2.5"] {
        let (ok, _, stderr) = ws.run(&["set-interval", bad]);
        assert!(!ok, "accepted {bad}");
        assert!(stderr.contains("Invalid update interval"), "stderr: {stderr}");
    }
    assert!(!ws.settings.exists());

    ws.ok(&["set-interval", "15"]);
    let json: Value = serde_json::from_str(&ws.ok(&["show", "--json"])).expect("json");
    assert_eq!(json["updateIntervalSeconds"], 15);
    assert_eq!(json["format"], "YYYY-MM-DD HH:mm:ss");
}

#[test]
fn settings_file_values_merge_over_defaults() {
    let ws = Workspace::new(&[]);
    write_file(&ws.settings, "updateInterval = 1\n");

    let json: Value = serde_json::from_str(&ws.ok(&["show", "--json"])).expect("json");
    assert_eq!(json["updateIntervalSeconds"], 1);
    assert_eq!(json["notePath"], "");
    assert_eq!(json["format"], "YYYY-MM-DD HH:mm:ss");
}

#[test]
fn hand_edited_format_cannot_corrupt_the_note() {
    let ws = Workspace::new(&[("note.md", "---\nk: v\n---\nbody")]);
    write_file(
        &ws.settings,
        "notePath = \"note.md\"\nformat = \"[x]\\n[y\\\"]\"\n",
    );

    for _ in 0..3 {
        ws.ok(&["tick"]);
    }
    let note = ws.note("note.md");
    let lines: Vec<&str> = note.lines().collect();
    assert_eq!(lines.len(), 5, "note: {note:?}");
    assert_eq!(lines[1], "k: v");
    assert!(lines[2].starts_with("today: \""), "note: {note:?}");
    assert_eq!(&lines[3..], ["---", "body"]);
}

#[test]
fn list_and_pick_notes() {
    let ws = Workspace::new(&[
        ("a.md", ""),
        ("journal/today.md", ""),
        ("journal/image.png", ""),
        (".obsidian/cache.md", ""),
    ]);

    let json: Value = serde_json::from_str(&ws.ok(&["list", "--json"])).expect("json");
    assert_eq!(json, serde_json::json!(["a.md", "journal/today.md"]));

    let stdout = ws.ok(&["pick", "TODAY"]);
    assert!(stdout.contains("Note set to \"journal/today.md\""));

    let listing = ws.ok(&["list"]);
    assert!(listing.contains("* journal/today.md"));

    let (ok, _, stderr) = ws.run(&["pick", "recipes"]);
    assert!(!ok);
    assert!(stderr.contains("No note matches \"recipes\""));
}

#[test]
fn quoting_format_is_rejected() {
    let ws = Workspace::new(&[]);
    let (ok, _, stderr) = ws.run(&["set-format", "YYYY \"Q\""]);
    assert!(!ok);
    assert!(stderr.contains("Invalid date format"));
}

#[test]
fn preview_renders_literal_pattern() {
    let ws = Workspace::new(&[]);
    let stdout = ws.ok(&["preview", "[week] W"]);
    assert!(stdout.starts_with("week "), "stdout: {stdout}");
}

#[test]
fn run_serves_console_until_quit() {
    let ws = Workspace::new(&[("note.md", "body")]);
    ws.ok(&["set-note", "note.md"]);
    ws.ok(&["set-format", "[console]"]);

    let mut child = ws
        .command(&["run"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn todaystamp");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"interval nope\ntick\nquit\n")
        .expect("write commands");
    let output = child.wait_with_output().expect("wait for todaystamp");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Invalid update interval \"nope\""));
    assert!(stdout.contains("Updated note.md"));
    assert_eq!(ws.note("note.md"), "---\ntoday: \"console\"\n---\n\nbody");
}
