//! Active-session bookkeeping and launch orchestration.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::driver::{LaunchSpec, SessionDriver};
use crate::error::{Error, Result};
use crate::history::HistoryTracker;
use crate::profile::ProfileRegistry;
use crate::scheduler::Sleeper;

/// Chromium-style switches that keep unattended launches alive: no
/// sandbox, no /dev/shm pressure, an ephemeral debugging port, quiet logs.
const STABILITY_FLAGS: [&str; 4] = [
	"--no-sandbox",
	"--disable-dev-shm-usage",
	"--remote-debugging-port=0",
	"--disable-logging",
];

/// Tracks at most one live session per profile name and drives the
/// [`SessionDriver`] for launches and closes.
pub struct SessionCoordinator<D: SessionDriver> {
	driver: D,
	user_data_dir: PathBuf,
	active: BTreeMap<String, D::Session>,
}

impl<D: SessionDriver> SessionCoordinator<D> {
	pub fn new(driver: D, user_data_dir: PathBuf) -> Self {
		Self {
			driver,
			user_data_dir,
			active: BTreeMap::new(),
		}
	}

	pub fn is_active(&self, name: &str) -> bool {
		self.active.contains_key(name)
	}

	pub fn active_count(&self) -> usize {
		self.active.len()
	}

	/// Names with a tracked session, in name order.
	pub fn active_profiles(&self) -> impl Iterator<Item = &str> {
		self.active.keys().map(String::as_str)
	}

	/// Launches the named profile and tracks the resulting handle.
	///
	/// Re-opening an already-open name replaces the tracked handle without
	/// closing the previous one; the old session keeps running untracked.
	/// (Kept from the original tool; see DESIGN.md.)
	pub fn open(&mut self, registry: &ProfileRegistry, history: &mut HistoryTracker, name: &str) -> Result<&D::Session> {
		let profile = registry
			.get(name)
			.ok_or_else(|| Error::ProfileNotFound(name.to_string()))?;

		let spec = LaunchSpec {
			user_data_dir: self.user_data_dir.clone(),
			profile_directory: profile.path.clone(),
			locale: profile.preferred_language.clone(),
			extra_args: STABILITY_FLAGS.iter().map(|flag| flag.to_string()).collect(),
		};

		let session = self.driver.launch(&spec).map_err(|err| Error::LaunchFailed {
			profile: name.to_string(),
			message: err.to_string(),
		})?;

		let handle = match self.active.entry(name.to_string()) {
			Entry::Occupied(mut slot) => {
				warn!(target: "edgectl.session", profile = %name, "profile already open; replacing tracked handle");
				slot.insert(session);
				slot.into_mut()
			}
			Entry::Vacant(slot) => slot.insert(session),
		};
		history.record_open(name)?;
		info!(target: "edgectl.session", profile = %name, "session opened");
		Ok(&*handle)
	}

	/// Closes `from` when it is tracked (close failures only warn, and
	/// leave it tracked), then opens `to` regardless.
	pub fn switch(
		&mut self,
		registry: &ProfileRegistry,
		history: &mut HistoryTracker,
		from: &str,
		to: &str,
	) -> Result<&D::Session> {
		if let Some(session) = self.active.get_mut(from) {
			match self.driver.close(session) {
				Ok(()) => {
					self.active.remove(from);
					info!(target: "edgectl.session", profile = %from, "session closed");
				}
				Err(err) => {
					let err = Error::CloseFailed {
						profile: from.to_string(),
						message: err.to_string(),
					};
					warn!(target: "edgectl.session", error = %err, "continuing switch despite close failure");
				}
			}
		}
		self.open(registry, history, to)
	}

	/// Best-effort close of every tracked session, in name order. Returns
	/// how many closed cleanly; failed closes stay tracked.
	pub fn close_all(&mut self) -> usize {
		let names: Vec<String> = self.active.keys().cloned().collect();
		let mut closed = 0;
		for name in names {
			let Some(session) = self.active.get_mut(&name) else {
				continue;
			};
			match self.driver.close(session) {
				Ok(()) => {
					self.active.remove(&name);
					closed += 1;
					info!(target: "edgectl.session", profile = %name, "session closed");
				}
				Err(err) => {
					let err = Error::CloseFailed {
						profile: name.clone(),
						message: err.to_string(),
					};
					warn!(target: "edgectl.session", error = %err, "session left tracked after close failure");
				}
			}
		}
		closed
	}

	/// Opens several profiles in order with a settle delay between
	/// attempts. Launch failures are logged and passed over; an
	/// unregistered name aborts the whole call unless `skip_missing`.
	/// Returns the names that opened (their handles stay tracked here).
	pub fn open_many(
		&mut self,
		registry: &ProfileRegistry,
		history: &mut HistoryTracker,
		names: &[String],
		delay_between: Duration,
		skip_missing: bool,
		pace: &dyn Sleeper,
	) -> Result<Vec<String>> {
		let mut opened = Vec::new();
		for (index, name) in names.iter().enumerate() {
			if !registry.contains(name) {
				if !skip_missing {
					return Err(Error::ProfileNotFound(name.clone()));
				}
				warn!(target: "edgectl.session", profile = %name, "skipping unregistered profile");
				continue;
			}

			match self.open(registry, history, name) {
				Ok(_) => opened.push(name.clone()),
				Err(err) => {
					error!(target: "edgectl.session", profile = %name, error = %err, "launch failed; continuing");
				}
			}

			// Settle after every attempt except the final input item.
			if index + 1 < names.len() {
				pace.sleep(delay_between);
			}
		}
		Ok(opened)
	}
}
