//! Named browser-profile registry.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::history::HistoryTracker;
use crate::store::{Backend, Store};

/// Prefix Edge uses for on-disk profile directories.
pub const AUTO_PATH_PREFIX: &str = "Profile ";

/// A registered browser profile, keyed by name in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
	/// Profile-directory selector under the user-data root ("Profile 3").
	/// Not required to be unique, though it typically is.
	pub path: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub preferred_language: Option<String>,
	pub created_at: DateTime<Utc>,
}

pub struct ProfileRegistry {
	store: Store<Profile>,
}

impl ProfileRegistry {
	pub fn open(backend: impl Backend<Profile> + 'static) -> Self {
		Self {
			store: Store::open(backend),
		}
	}

	/// Registers a new profile. Without an explicit path the next free
	/// "Profile {n}" slot is derived from the highest existing numeric
	/// suffix (gaps are ignored).
	pub fn add(&mut self, name: &str, path: Option<String>, language: Option<String>) -> Result<Profile> {
		if self.store.contains(name) {
			return Err(Error::AlreadyExists(name.to_string()));
		}

		let path = path.unwrap_or_else(|| self.next_auto_path());
		let profile = Profile {
			path,
			preferred_language: language,
			created_at: Utc::now(),
		};
		self.store.insert(name.to_string(), profile.clone());
		self.store.persist()?;
		info!(target: "edgectl.profiles", profile = %name, path = %profile.path, "registered profile");
		Ok(profile)
	}

	fn next_auto_path(&self) -> String {
		let next = self
			.store
			.records()
			.values()
			.filter_map(|profile| profile.path.strip_prefix(AUTO_PATH_PREFIX))
			.filter_map(|suffix| suffix.parse::<u32>().ok())
			.max()
			.map_or(1, |highest| highest + 1);
		format!("{AUTO_PATH_PREFIX}{next}")
	}

	/// Removes a profile, cascading to its history entry. Profile file is
	/// persisted before the history file.
	pub fn remove(&mut self, history: &mut HistoryTracker, name: &str) -> Result<()> {
		if self.store.remove(name).is_none() {
			return Err(Error::ProfileNotFound(name.to_string()));
		}
		self.store.persist()?;
		history.remove(name)?;
		info!(target: "edgectl.profiles", profile = %name, "removed profile");
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&Profile> {
		self.store.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.store.contains(name)
	}

	/// Full mapping, unfiltered.
	pub fn profiles(&self) -> &BTreeMap<String, Profile> {
		self.store.records()
	}

	pub fn set_language(&mut self, name: &str, code: &str) -> Result<()> {
		let profile = self
			.store
			.get_mut(name)
			.ok_or_else(|| Error::ProfileNotFound(name.to_string()))?;
		profile.preferred_language = Some(code.to_string());
		self.store.persist()?;
		info!(target: "edgectl.profiles", profile = %name, language = %code, "language preference updated");
		Ok(())
	}

	/// Names that have never had a successful launch recorded. Derived,
	/// never stored.
	pub fn unopened(&self, history: &HistoryTracker) -> Vec<String> {
		self.store
			.records()
			.keys()
			.filter(|name| history.entry(name).is_none())
			.cloned()
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::MemoryBackend;

	fn registry() -> ProfileRegistry {
		ProfileRegistry::open(MemoryBackend::new())
	}

	fn history() -> HistoryTracker {
		HistoryTracker::open(MemoryBackend::new())
	}

	#[test]
	fn auto_paths_are_sequential() {
		let mut registry = registry();
		assert_eq!(registry.add("a", None, None).unwrap().path, "Profile 1");
		assert_eq!(registry.add("b", None, None).unwrap().path, "Profile 2");
		assert_eq!(registry.add("c", None, None).unwrap().path, "Profile 3");
	}

	#[test]
	fn auto_path_is_max_plus_one_ignoring_gaps() {
		let mut registry = registry();
		registry.add("a", Some("Profile 2".into()), None).unwrap();
		registry.add("b", Some("Profile 5".into()), None).unwrap();
		assert_eq!(registry.add("c", None, None).unwrap().path, "Profile 6");
	}

	#[test]
	fn non_numeric_suffixes_do_not_count() {
		let mut registry = registry();
		registry.add("a", Some("Profile junk".into()), None).unwrap();
		registry.add("b", Some("Elsewhere".into()), None).unwrap();
		assert_eq!(registry.add("c", None, None).unwrap().path, "Profile 1");
	}

	#[test]
	fn explicit_path_is_kept_verbatim() {
		let mut registry = registry();
		let profile = registry.add("a", Some("Custom Dir".into()), Some("fr".into())).unwrap();
		assert_eq!(profile.path, "Custom Dir");
		assert_eq!(profile.preferred_language.as_deref(), Some("fr"));
	}

	#[test]
	fn duplicate_add_is_rejected_and_leaves_registry_unchanged() {
		let mut registry = registry();
		registry.add("X", None, None).unwrap();

		let err = registry.add("X", None, None).unwrap_err();
		assert!(matches!(err, Error::AlreadyExists(name) if name == "X"));
		assert_eq!(registry.profiles().len(), 1);
	}

	#[test]
	fn add_remove_round_trips_and_cascades_history() {
		let profiles_backend = MemoryBackend::new();
		let history_backend = MemoryBackend::new();
		let mut registry = ProfileRegistry::open(profiles_backend.clone());
		let mut history = HistoryTracker::open(history_backend.clone());

		registry.add("work", None, Some("en-US".into())).unwrap();
		history.record_open("work").unwrap();
		assert!(history.entry("work").is_some());

		registry.remove(&mut history, "work").unwrap();
		assert!(registry.profiles().is_empty());
		assert!(history.entry("work").is_none());
		assert!(profiles_backend.saved().is_empty());
		assert!(history_backend.saved().is_empty());
	}

	#[test]
	fn remove_unknown_reports_not_found() {
		let mut registry = registry();
		let mut history = history();
		let err = registry.remove(&mut history, "ghost").unwrap_err();
		assert!(matches!(err, Error::ProfileNotFound(name) if name == "ghost"));
	}

	#[test]
	fn set_language_overwrites_existing_preference() {
		let mut registry = registry();
		registry.add("a", None, Some("en-US".into())).unwrap();

		registry.set_language("a", "fr").unwrap();
		assert_eq!(registry.get("a").unwrap().preferred_language.as_deref(), Some("fr"));

		let err = registry.set_language("ghost", "fr").unwrap_err();
		assert!(matches!(err, Error::ProfileNotFound(_)));
	}

	#[test]
	fn unopened_excludes_profiles_with_history() {
		let mut registry = registry();
		let mut history = history();
		registry.add("a", None, None).unwrap();
		registry.add("b", None, None).unwrap();

		history.record_open("a").unwrap();
		assert_eq!(registry.unopened(&history), vec!["b".to_string()]);
	}
}
