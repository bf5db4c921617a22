//! Stored, reusable batch launch configurations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::driver::SessionDriver;
use crate::error::{Error, Result};
use crate::history::HistoryTracker;
use crate::profile::ProfileRegistry;
use crate::scheduler::{BatchReport, BatchScheduler, Sleeper};
use crate::session::SessionCoordinator;
use crate::store::{Backend, Store};

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_PROFILE_DELAY_SECS: u64 = 2;
pub const DEFAULT_BATCH_DELAY_SECS: u64 = 30;

/// A reusable launch plan: which profiles, and how hard to throttle.
///
/// Delays are stored as whole seconds so the config file stays
/// hand-editable; missing fields fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchConfig {
	/// Launch order; may reference profiles that no longer exist.
	pub profiles: Vec<String>,
	#[serde(default = "default_batch_size")]
	pub batch_size: usize,
	/// Seconds between launches inside a batch.
	#[serde(default = "default_profile_delay")]
	pub profile_delay: u64,
	/// Seconds between consecutive batches.
	#[serde(default = "default_batch_delay")]
	pub batch_delay: u64,
}

impl Default for BatchConfig {
	fn default() -> Self {
		Self {
			profiles: Vec::new(),
			batch_size: DEFAULT_BATCH_SIZE,
			profile_delay: DEFAULT_PROFILE_DELAY_SECS,
			batch_delay: DEFAULT_BATCH_DELAY_SECS,
		}
	}
}

fn default_batch_size() -> usize {
	DEFAULT_BATCH_SIZE
}

fn default_profile_delay() -> u64 {
	DEFAULT_PROFILE_DELAY_SECS
}

fn default_batch_delay() -> u64 {
	DEFAULT_BATCH_DELAY_SECS
}

pub struct BatchStore {
	store: Store<BatchConfig>,
}

impl BatchStore {
	pub fn open(backend: impl Backend<BatchConfig> + 'static) -> Self {
		Self {
			store: Store::open(backend),
		}
	}

	/// Upsert: an existing config of the same name is overwritten.
	pub fn add(&mut self, name: &str, config: BatchConfig) -> Result<()> {
		self.store.insert(name.to_string(), config);
		self.store.persist()
	}

	/// Returns whether the config existed. Persists only when it did.
	pub fn remove(&mut self, name: &str) -> Result<bool> {
		if self.store.remove(name).is_none() {
			return Ok(false);
		}
		self.store.persist()?;
		Ok(true)
	}

	pub fn get(&self, name: &str) -> Option<&BatchConfig> {
		self.store.get(name)
	}

	pub fn configs(&self) -> &BTreeMap<String, BatchConfig> {
		self.store.records()
	}

	/// Runs a stored batch with its saved throttling parameters.
	pub fn run<D: SessionDriver>(
		&self,
		name: &str,
		registry: &ProfileRegistry,
		history: &mut HistoryTracker,
		sessions: &mut SessionCoordinator<D>,
		pace: &dyn Sleeper,
	) -> Result<BatchReport> {
		let config = self.get(name).ok_or_else(|| Error::BatchNotFound(name.to_string()))?;
		BatchScheduler::from_config(config).run(&config.profiles, registry, history, sessions, pace)
	}
}
