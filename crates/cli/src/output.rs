//! Human-readable rendering for registry listings and batch reports.

use chrono::{DateTime, Utc};
use colored::Colorize;
use edgectl::{BatchReport, BatchStore, HistoryEntry, HistoryTracker, ProfileRegistry};

pub fn print_profiles(registry: &ProfileRegistry) {
	if registry.profiles().is_empty() {
		println!("No profiles registered. Add one with 'edgectl add <name>'.");
		return;
	}
	println!("{}", "Registered profiles:".bold());
	for (name, profile) in registry.profiles() {
		let language = profile.preferred_language.as_deref().unwrap_or("not set");
		println!(
			"  {} path={} language={} created={}",
			name.cyan(),
			profile.path,
			language,
			format_time(profile.created_at)
		);
	}
}

pub fn print_unopened(names: &[String]) {
	if names.is_empty() {
		println!("Every registered profile has been opened at least once.");
		return;
	}
	println!("{}", "Never-opened profiles:".bold());
	for name in names {
		println!("  {}", name.cyan());
	}
}

pub fn print_history(history: &HistoryTracker) {
	if history.entries().is_empty() {
		println!("No launch history recorded.");
		return;
	}
	println!("{}", "Launch history:".bold());
	for (name, entry) in history.entries() {
		print_entry_line(name, entry);
	}
}

pub fn print_history_entry(name: &str, entry: Option<&HistoryEntry>) {
	match entry {
		Some(entry) => print_entry_line(name, entry),
		None => println!("No history for profile '{name}'"),
	}
}

fn print_entry_line(name: &str, entry: &HistoryEntry) {
	let last = entry.last_opened.map_or_else(|| "never".to_string(), format_time);
	println!("  {} opened {} time(s), last {}", name.cyan(), entry.open_count, last);
}

pub fn print_batch_configs(batches: &BatchStore) {
	if batches.configs().is_empty() {
		println!("No batches configured.");
		return;
	}
	println!("{}", "Configured batches:".bold());
	for (name, config) in batches.configs() {
		println!(
			"  {} profiles=[{}] batch_size={} profile_delay={}s batch_delay={}s",
			name.cyan(),
			config.profiles.join(", "),
			config.batch_size,
			config.profile_delay,
			config.batch_delay
		);
	}
}

/// Always prints the three buckets so partial failures are never hidden.
pub fn print_batch_report(report: &BatchReport) {
	println!("{}", "Batch launch finished:".bold());
	println!("  {} {}", "successful:".green(), report.successful.len());
	println!("  {} {}", "failed:".red(), report.failed.len());
	println!("  {} {}", "skipped:".yellow(), report.skipped.len());
	for failure in &report.failed {
		println!("    {} {}: {}", "failed".red(), failure.profile, failure.error);
	}
	for name in &report.skipped {
		println!("    {} {}", "skipped".yellow(), name);
	}
}

fn format_time(time: DateTime<Utc>) -> String {
	time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
