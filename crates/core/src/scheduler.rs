//! Throttled multi-profile launching.
//!
//! Large launch requests are partitioned into fixed-size batches and
//! executed strictly sequentially, with a settle delay between launches
//! and a longer cool-down between batches. The pacing is the only
//! concurrency control: every wait is a blocking sleep on the calling
//! thread, so at most one launch is ever in flight.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::batch::BatchConfig;
use crate::driver::SessionDriver;
use crate::error::{Error, Result};
use crate::history::HistoryTracker;
use crate::profile::ProfileRegistry;
use crate::session::SessionCoordinator;

/// Wait port so tests observe pacing instead of sleeping through it.
pub trait Sleeper {
	fn sleep(&self, period: Duration);
}

/// Blocks the calling thread. Zero-length waits return immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
	fn sleep(&self, period: Duration) {
		if !period.is_zero() {
			std::thread::sleep(period);
		}
	}
}

/// One failed launch inside a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedLaunch {
	pub profile: String,
	pub error: String,
}

/// Classified outcome of a batch run. Transient; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
	pub successful: Vec<String>,
	pub failed: Vec<FailedLaunch>,
	pub skipped: Vec<String>,
}

/// Drives a full launch request through fixed-size batches.
pub struct BatchScheduler {
	batch_size: usize,
	profile_delay: Duration,
	batch_delay: Duration,
	skip_missing: bool,
}

impl BatchScheduler {
	pub fn new(batch_size: usize, profile_delay: Duration, batch_delay: Duration) -> Self {
		Self {
			batch_size,
			profile_delay,
			batch_delay,
			skip_missing: true,
		}
	}

	pub fn from_config(config: &BatchConfig) -> Self {
		Self::new(
			config.batch_size,
			Duration::from_secs(config.profile_delay),
			Duration::from_secs(config.batch_delay),
		)
	}

	/// When false, an unregistered name aborts the whole run instead of
	/// being classified as skipped.
	pub fn with_skip_missing(mut self, skip_missing: bool) -> Self {
		self.skip_missing = skip_missing;
		self
	}

	/// Launches `names` in input order, chunked into batches of at most
	/// `batch_size`. Returns the three classified buckets, or the first
	/// `ProfileNotFound` when `skip_missing` is off — in that case any
	/// classification accumulated so far is discarded (already-launched
	/// sessions stay open and keep their history entries).
	pub fn run<D: SessionDriver>(
		&self,
		names: &[String],
		registry: &ProfileRegistry,
		history: &mut HistoryTracker,
		sessions: &mut SessionCoordinator<D>,
		pace: &dyn Sleeper,
	) -> Result<BatchReport> {
		let mut report = BatchReport::default();
		if names.is_empty() {
			return Ok(report);
		}

		let chunks: Vec<&[String]> = names.chunks(self.batch_size.max(1)).collect();
		info!(target: "edgectl.batch", profiles = names.len(), batches = chunks.len(), "starting batched launch");

		for (index, chunk) in chunks.iter().enumerate() {
			debug!(target: "edgectl.batch", batch = index + 1, total = chunks.len(), "processing batch");

			for (position, name) in chunk.iter().enumerate() {
				if !registry.contains(name) {
					if !self.skip_missing {
						return Err(Error::ProfileNotFound(name.clone()));
					}
					warn!(target: "edgectl.batch", profile = %name, "skipping unregistered profile");
					report.skipped.push(name.clone());
					continue;
				}

				match sessions.open(registry, history, name) {
					Ok(_) => report.successful.push(name.clone()),
					Err(err) => {
						error!(target: "edgectl.batch", profile = %name, error = %err, "launch failed");
						report.failed.push(FailedLaunch {
							profile: name.clone(),
							error: err.to_string(),
						});
					}
				}

				// Settle delay follows every attempt, successful or not,
				// until nothing further will launch in this chunk. Skips
				// never pay it.
				let more_attempts = chunk[position + 1..]
					.iter()
					.any(|next| !self.skip_missing || registry.contains(next));
				if more_attempts {
					pace.sleep(self.profile_delay);
				}
			}

			if index + 1 < chunks.len() {
				pace.sleep(self.batch_delay);
			}
		}

		info!(
			target: "edgectl.batch",
			successful = report.successful.len(),
			failed = report.failed.len(),
			skipped = report.skipped.len(),
			"batched launch finished"
		);
		Ok(report)
	}
}
