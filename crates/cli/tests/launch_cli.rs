//! End-to-end launch flows against a stand-in browser binary. `/bin/cat`
//! exits immediately on the unknown switches, which is fine: the driver
//! only needs a spawnable process.

#![cfg(unix)]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const FAKE_BROWSER: &str = "/bin/cat";

fn edgectl(state_dir: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_edgectl"))
		.arg("--state-dir")
		.arg(state_dir)
		.args(["--browser", FAKE_BROWSER])
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
fn open_records_history() {
	let dir = TempDir::new().unwrap();
	edgectl(dir.path(), &["add", "work"]);

	let out = edgectl(dir.path(), &["open", "work", "--detach"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(stdout(&out).contains("Opened profile 'work'"));
	assert!(stdout(&out).contains("Leaving 1 session(s) running"));

	let out = edgectl(dir.path(), &["history", "--name", "work"]);
	assert!(stdout(&out).contains("opened 1 time(s)"));
}

#[test]
fn opening_an_unknown_profile_fails() {
	let dir = TempDir::new().unwrap();

	let out = edgectl(dir.path(), &["open", "ghost", "--detach"]);
	assert!(!out.status.success());
	assert!(stderr(&out).contains("not registered"));
}

#[test]
fn open_multiple_skips_missing_profiles() {
	let dir = TempDir::new().unwrap();
	edgectl(dir.path(), &["add", "a"]);
	edgectl(dir.path(), &["add", "b"]);

	let out = edgectl(
		dir.path(),
		&["open-multiple", "a", "ghost", "b", "--delay", "0", "--detach"],
	);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(stdout(&out).contains("Opened 2 of 3 profiles"));
}

#[test]
fn open_batch_reports_all_three_buckets() {
	let dir = TempDir::new().unwrap();
	edgectl(dir.path(), &["add", "a"]);
	edgectl(dir.path(), &["add", "b"]);

	let out = edgectl(
		dir.path(),
		&[
			"open-batch",
			"a",
			"ghost",
			"b",
			"--batch-size",
			"2",
			"--profile-delay",
			"0",
			"--batch-delay",
			"0",
			"--detach",
		],
	);
	assert!(out.status.success(), "{}", stderr(&out));
	let text = stdout(&out);
	assert!(text.contains("successful: 2"));
	assert!(text.contains("failed: 0"));
	assert!(text.contains("skipped: 1"));
	assert!(text.contains("ghost"));
}

#[test]
fn open_batch_aborts_on_missing_profile_with_no_skip() {
	let dir = TempDir::new().unwrap();
	edgectl(dir.path(), &["add", "a"]);

	let out = edgectl(
		dir.path(),
		&[
			"open-batch",
			"a",
			"ghost",
			"--profile-delay",
			"0",
			"--batch-delay",
			"0",
			"--no-skip",
			"--detach",
		],
	);
	assert!(!out.status.success());
	assert!(stderr(&out).contains("'ghost' is not registered"));
	// the hard abort returns no classification at all
	assert!(!stdout(&out).contains("successful"));
}

#[test]
fn stored_batch_runs_end_to_end() {
	let dir = TempDir::new().unwrap();
	edgectl(dir.path(), &["add", "a"]);
	edgectl(
		dir.path(),
		&["batch", "add", "solo", "a", "--profile-delay", "0", "--batch-delay", "0"],
	);

	let out = edgectl(dir.path(), &["batch", "run", "solo", "--detach"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(stdout(&out).contains("Running batch 'solo'"));
	assert!(stdout(&out).contains("successful: 1"));

	let out = edgectl(dir.path(), &["history", "--name", "a"]);
	assert!(stdout(&out).contains("opened 1 time(s)"));
}

#[test]
fn switch_opens_the_target_profile() {
	let dir = TempDir::new().unwrap();
	edgectl(dir.path(), &["add", "a"]);
	edgectl(dir.path(), &["add", "b"]);

	let out = edgectl(dir.path(), &["switch", "a", "b", "--detach"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(stdout(&out).contains("Switched from 'a' to 'b'"));

	let out = edgectl(dir.path(), &["history", "--name", "b"]);
	assert!(stdout(&out).contains("opened 1 time(s)"));
}

#[test]
fn close_all_with_no_tracked_sessions_reports_zero() {
	let dir = TempDir::new().unwrap();

	let out = edgectl(dir.path(), &["close-all"]);
	assert!(out.status.success(), "{}", stderr(&out));
	assert!(stdout(&out).contains("Closed 0 tracked session(s)"));
}
