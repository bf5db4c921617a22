//! Per-profile launch history.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::{Backend, Store};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_opened: Option<DateTime<Utc>>,
	#[serde(default)]
	pub open_count: u64,
}

pub struct HistoryTracker {
	store: Store<HistoryEntry>,
}

impl HistoryTracker {
	pub fn open(backend: impl Backend<HistoryEntry> + 'static) -> Self {
		Self {
			store: Store::open(backend),
		}
	}

	/// Bumps the open count and re-stamps `last_opened`. Called exactly
	/// once per successful launch, never on failure.
	pub fn record_open(&mut self, name: &str) -> Result<()> {
		let mut entry = self.store.get(name).cloned().unwrap_or_default();
		entry.open_count += 1;
		entry.last_opened = Some(Utc::now());
		self.store.insert(name.to_string(), entry);
		self.store.persist()
	}

	pub fn entry(&self, name: &str) -> Option<&HistoryEntry> {
		self.store.get(name)
	}

	pub fn entries(&self) -> &BTreeMap<String, HistoryEntry> {
		self.store.records()
	}

	/// Cascade hook for profile removal. No-op when nothing is recorded.
	pub fn remove(&mut self, name: &str) -> Result<()> {
		if self.store.remove(name).is_some() {
			self.store.persist()?;
		}
		Ok(())
	}
}
