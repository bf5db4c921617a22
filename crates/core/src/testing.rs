//! Shared in-memory fakes for unit tests: a persistence backend, a
//! session driver, and a wait recorder.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use std::time::Duration;

use crate::driver::{DriverError, LaunchSpec, SessionDriver};
use crate::error::Result;
use crate::history::HistoryTracker;
use crate::profile::ProfileRegistry;
use crate::scheduler::Sleeper;
use crate::store::Backend;

/// Backend that keeps the table in memory. Clones share the same table so
/// tests can inspect what was persisted.
pub struct MemoryBackend<T> {
	records: Rc<RefCell<BTreeMap<String, T>>>,
}

impl<T> MemoryBackend<T> {
	pub fn new() -> Self {
		Self {
			records: Rc::new(RefCell::new(BTreeMap::new())),
		}
	}

	pub fn saved(&self) -> BTreeMap<String, T>
	where
		T: Clone,
	{
		self.records.borrow().clone()
	}
}

impl<T> Clone for MemoryBackend<T> {
	fn clone(&self) -> Self {
		Self {
			records: Rc::clone(&self.records),
		}
	}
}

impl<T: Clone> Backend<T> for MemoryBackend<T> {
	fn load(&self) -> BTreeMap<String, T> {
		self.records.borrow().clone()
	}

	fn save(&self, records: &BTreeMap<String, T>) -> Result<()> {
		*self.records.borrow_mut() = records.clone();
		Ok(())
	}
}

/// Driver that records launches and fails on demand, keyed by the
/// profile-directory selector.
#[derive(Clone, Default)]
pub struct FakeDriver {
	state: Rc<RefCell<FakeDriverState>>,
}

#[derive(Default)]
struct FakeDriverState {
	fail_launch: BTreeSet<String>,
	fail_close: BTreeSet<String>,
	launches: Vec<LaunchSpec>,
	closed: Vec<String>,
}

#[derive(Debug)]
pub struct FakeSession {
	directory: String,
}

impl FakeDriver {
	pub fn fail_launch(&self, directory: &str) {
		self.state.borrow_mut().fail_launch.insert(directory.to_string());
	}

	pub fn fail_close(&self, directory: &str) {
		self.state.borrow_mut().fail_close.insert(directory.to_string());
	}

	/// Every accepted launch spec, in order.
	pub fn launches(&self) -> Vec<LaunchSpec> {
		self.state.borrow().launches.clone()
	}

	pub fn launched_dirs(&self) -> Vec<String> {
		self.state
			.borrow()
			.launches
			.iter()
			.map(|spec| spec.profile_directory.clone())
			.collect()
	}

	pub fn closed_dirs(&self) -> Vec<String> {
		self.state.borrow().closed.clone()
	}
}

impl SessionDriver for FakeDriver {
	type Session = FakeSession;

	fn launch(&self, spec: &LaunchSpec) -> std::result::Result<FakeSession, DriverError> {
		let mut state = self.state.borrow_mut();
		if state.fail_launch.contains(&spec.profile_directory) {
			return Err(DriverError::new("synthetic launch failure"));
		}
		state.launches.push(spec.clone());
		Ok(FakeSession {
			directory: spec.profile_directory.clone(),
		})
	}

	fn close(&self, session: &mut FakeSession) -> std::result::Result<(), DriverError> {
		let mut state = self.state.borrow_mut();
		if state.fail_close.contains(&session.directory) {
			return Err(DriverError::new("synthetic close failure"));
		}
		state.closed.push(session.directory.clone());
		Ok(())
	}
}

/// Sleeper that records each requested wait instead of blocking.
#[derive(Default)]
pub struct RecordingSleeper {
	waits: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
	pub fn waits(&self) -> Vec<Duration> {
		self.waits.borrow().clone()
	}
}

impl Sleeper for RecordingSleeper {
	fn sleep(&self, period: Duration) {
		self.waits.borrow_mut().push(period);
	}
}

/// Registry + history pair on in-memory backends. Each profile's path is
/// set to its name so driver fakes can key on it.
pub fn fixtures(profile_names: &[&str]) -> (ProfileRegistry, HistoryTracker) {
	let mut registry = ProfileRegistry::open(MemoryBackend::new());
	for name in profile_names.iter().copied() {
		registry.add(name, Some(name.to_string()), None).unwrap();
	}
	let history = HistoryTracker::open(MemoryBackend::new());
	(registry, history)
}
