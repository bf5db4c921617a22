//! File-backed persistence for the named-record tables.
//!
//! Every registry owns a [`Store`]: an in-memory mapping of string keys to
//! records plus a [`Backend`] port that loads it once at startup and writes
//! the whole table back after each mutation. Missing or malformed files
//! degrade to an empty table so a damaged install never blocks the tool;
//! write failures propagate.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::Result;

pub const PROFILES_FILE: &str = "edge_profiles.json";
pub const HISTORY_FILE: &str = "profile_history.json";
pub const BATCHES_FILE: &str = "batch_config.json";

/// Persistence port for a single named-record table.
pub trait Backend<T> {
	/// Loads the full table. Missing or unreadable data yields an empty table.
	fn load(&self) -> BTreeMap<String, T>;

	/// Writes the full table back.
	fn save(&self, records: &BTreeMap<String, T>) -> Result<()>;
}

/// JSON file backend. Formatting is cosmetic; the contract is the mapping.
#[derive(Debug, Clone)]
pub struct JsonBackend {
	path: PathBuf,
}

impl JsonBackend {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl<T: Serialize + DeserializeOwned> Backend<T> for JsonBackend {
	fn load(&self) -> BTreeMap<String, T> {
		let content = match fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(err) => {
				if err.kind() != io::ErrorKind::NotFound {
					warn!(target: "edgectl.store", path = %self.path.display(), error = %err, "unreadable store file; starting empty");
				}
				return BTreeMap::new();
			}
		};
		match serde_json::from_str(&content) {
			Ok(records) => records,
			Err(err) => {
				warn!(target: "edgectl.store", path = %self.path.display(), error = %err, "malformed store file; starting empty");
				BTreeMap::new()
			}
		}
	}

	fn save(&self, records: &BTreeMap<String, T>) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::write(&self.path, serde_json::to_string_pretty(records)?)?;
		Ok(())
	}
}

/// In-memory table with write-through persistence.
pub struct Store<T> {
	records: BTreeMap<String, T>,
	backend: Box<dyn Backend<T>>,
}

impl<T> Store<T> {
	pub fn open(backend: impl Backend<T> + 'static) -> Self {
		let records = backend.load();
		Self {
			records,
			backend: Box::new(backend),
		}
	}

	pub fn records(&self) -> &BTreeMap<String, T> {
		&self.records
	}

	pub fn get(&self, key: &str) -> Option<&T> {
		self.records.get(key)
	}

	pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
		self.records.get_mut(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.records.contains_key(key)
	}

	pub fn insert(&mut self, key: String, record: T) -> Option<T> {
		self.records.insert(key, record)
	}

	pub fn remove(&mut self, key: &str) -> Option<T> {
		self.records.remove(key)
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Writes the current table through the backend.
	pub fn persist(&self) -> Result<()> {
		self.backend.save(&self.records)
	}
}

/// Locations of the three registry files inside a state directory.
#[derive(Debug, Clone)]
pub struct StatePaths {
	pub profiles: PathBuf,
	pub history: PathBuf,
	pub batches: PathBuf,
}

impl StatePaths {
	pub fn new(state_dir: &Path) -> Self {
		Self {
			profiles: state_dir.join(PROFILES_FILE),
			history: state_dir.join(HISTORY_FILE),
			batches: state_dir.join(BATCHES_FILE),
		}
	}

	/// Per-user default state directory.
	pub fn default_dir() -> PathBuf {
		dirs::config_dir()
			.unwrap_or_else(|| PathBuf::from("."))
			.join("edgectl")
	}
}
