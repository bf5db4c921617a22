//! Registry commands: add/remove/list/set-language/history.

use colored::Colorize;
use edgectl::{HistoryTracker, ProfileRegistry, Result};

use crate::output;

pub fn add(registry: &mut ProfileRegistry, name: &str, path: Option<String>, language: Option<String>) -> Result<()> {
	let profile = registry.add(name, path, language)?;
	println!("{} profile '{name}' with path '{}'", "Added".green().bold(), profile.path);
	Ok(())
}

pub fn remove(registry: &mut ProfileRegistry, history: &mut HistoryTracker, name: &str) -> Result<()> {
	registry.remove(history, name)?;
	println!("{} profile '{name}'", "Removed".green().bold());
	Ok(())
}

pub fn list(registry: &ProfileRegistry, history: &HistoryTracker, unopened: bool) -> Result<()> {
	if unopened {
		output::print_unopened(&registry.unopened(history));
	} else {
		output::print_profiles(registry);
	}
	Ok(())
}

pub fn set_language(registry: &mut ProfileRegistry, name: &str, language: &str) -> Result<()> {
	registry.set_language(name, language)?;
	println!("Set preferred language for '{name}' to '{language}'");
	Ok(())
}

pub fn history(history: &HistoryTracker, name: Option<&str>) -> Result<()> {
	match name {
		Some(name) => output::print_history_entry(name, history.entry(name)),
		None => output::print_history(history),
	}
	Ok(())
}
