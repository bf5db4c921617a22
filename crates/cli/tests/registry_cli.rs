use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn edgectl(state_dir: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_edgectl"))
		.arg("--state-dir")
		.arg(state_dir)
		.args(args)
		.env("NO_COLOR", "1")
		.output()
		.expect("failed to run edgectl")
}

fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
	String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn add_list_remove_round_trip() {
	let dir = TempDir::new().unwrap();

	let out = edgectl(dir.path(), &["add", "work", "--language", "en-US"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(stdout(&out).contains("Profile 1"));

	let out = edgectl(dir.path(), &["list"]);
	assert!(stdout(&out).contains("work"));
	assert!(stdout(&out).contains("en-US"));

	let out = edgectl(dir.path(), &["remove", "work"]);
	assert!(out.status.success(), "{}", stderr(&out));

	let out = edgectl(dir.path(), &["list"]);
	assert!(stdout(&out).contains("No profiles registered"));
}

#[test]
fn duplicate_add_fails_and_keeps_one_entry() {
	let dir = TempDir::new().unwrap();

	assert!(edgectl(dir.path(), &["add", "work"]).status.success());
	let out = edgectl(dir.path(), &["add", "work"]);
	assert!(!out.status.success());
	assert!(stderr(&out).contains("already exists"));

	let raw = std::fs::read_to_string(dir.path().join("edge_profiles.json")).unwrap();
	let profiles: serde_json::Value = serde_json::from_str(&raw).unwrap();
	assert_eq!(profiles.as_object().unwrap().len(), 1);
}

#[test]
fn auto_paths_count_upwards() {
	let dir = TempDir::new().unwrap();

	edgectl(dir.path(), &["add", "a"]);
	edgectl(dir.path(), &["add", "b"]);

	let out = edgectl(dir.path(), &["list"]);
	assert!(stdout(&out).contains("Profile 1"));
	assert!(stdout(&out).contains("Profile 2"));
}

#[test]
fn removing_unknown_profile_fails() {
	let dir = TempDir::new().unwrap();

	let out = edgectl(dir.path(), &["remove", "ghost"]);
	assert!(!out.status.success());
	assert!(stderr(&out).contains("not registered"));
}

#[test]
fn set_language_updates_the_listing() {
	let dir = TempDir::new().unwrap();

	edgectl(dir.path(), &["add", "work"]);
	let out = edgectl(dir.path(), &["set-language", "work", "fr"]);
	assert!(out.status.success(), "{}", stderr(&out));

	let out = edgectl(dir.path(), &["list"]);
	assert!(stdout(&out).contains("language=fr"));
}

#[test]
fn history_starts_empty() {
	let dir = TempDir::new().unwrap();

	let out = edgectl(dir.path(), &["history"]);
	assert!(stdout(&out).contains("No launch history recorded"));

	let out = edgectl(dir.path(), &["history", "--name", "work"]);
	assert!(stdout(&out).contains("No history for profile 'work'"));
}

#[test]
fn unopened_filter_lists_fresh_profiles() {
	let dir = TempDir::new().unwrap();

	edgectl(dir.path(), &["add", "fresh"]);
	let out = edgectl(dir.path(), &["list", "--unopened"]);
	assert!(stdout(&out).contains("fresh"));
}

#[test]
fn batch_configs_round_trip() {
	let dir = TempDir::new().unwrap();

	edgectl(dir.path(), &["add", "a"]);
	let out = edgectl(dir.path(), &["batch", "add", "night", "a", "b", "--batch-size", "2"]);
	assert!(out.status.success(), "{}", stderr(&out));

	let out = edgectl(dir.path(), &["batch", "list"]);
	assert!(stdout(&out).contains("night"));
	assert!(stdout(&out).contains("batch_size=2"));
	assert!(stdout(&out).contains("a, b"));

	let out = edgectl(dir.path(), &["batch", "remove", "night"]);
	assert!(out.status.success());
	assert!(stdout(&out).contains("Removed"));

	// soft failure: reported, exit code stays zero
	let out = edgectl(dir.path(), &["batch", "remove", "night"]);
	assert!(out.status.success());
	assert!(stdout(&out).contains("not found"));

	let out = edgectl(dir.path(), &["batch", "list"]);
	assert!(stdout(&out).contains("No batches configured"));
}

#[test]
fn running_an_unknown_batch_fails() {
	let dir = TempDir::new().unwrap();

	let out = edgectl(dir.path(), &["--browser", "definitely-not-a-browser", "batch", "run", "ghost"]);
	assert!(!out.status.success());
	assert!(stderr(&out).contains("no batch named 'ghost'"));
}

#[test]
fn malformed_store_file_is_tolerated() {
	let dir = TempDir::new().unwrap();
	std::fs::write(dir.path().join("edge_profiles.json"), "{broken").unwrap();

	let out = edgectl(dir.path(), &["list"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(stdout(&out).contains("No profiles registered"));
}
