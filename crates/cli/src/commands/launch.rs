//! Launch-type commands: coordinator construction plus the hold prompt.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use edgectl::{
	BatchScheduler, BatchStore, HistoryTracker, ProcessDriver, ProfileRegistry, Result, SessionCoordinator,
	ThreadSleeper, default_user_data_dir,
};

use crate::output;

pub struct Launcher {
	user_data_dir: Option<PathBuf>,
	browser: Option<PathBuf>,
}

impl Launcher {
	pub fn new(user_data_dir: Option<PathBuf>, browser: Option<PathBuf>) -> Self {
		Self { user_data_dir, browser }
	}

	fn coordinator(&self) -> Result<SessionCoordinator<ProcessDriver>> {
		let driver = match &self.browser {
			Some(binary) => ProcessDriver::with_binary(binary.clone()),
			None => ProcessDriver::discover()?,
		};
		let user_data_dir = self.user_data_dir.clone().unwrap_or_else(default_user_data_dir);
		Ok(SessionCoordinator::new(driver, user_data_dir))
	}

	pub fn open(&self, registry: &ProfileRegistry, history: &mut HistoryTracker, name: &str, detach: bool) -> Result<()> {
		let mut sessions = self.coordinator()?;
		sessions.open(registry, history, name)?;
		println!("{} profile '{name}'", "Opened".green().bold());
		hold_then_close(&mut sessions, detach)
	}

	pub fn open_multiple(
		&self,
		registry: &ProfileRegistry,
		history: &mut HistoryTracker,
		names: &[String],
		delay: u64,
		no_skip: bool,
		detach: bool,
	) -> Result<()> {
		let mut sessions = self.coordinator()?;
		let opened = sessions.open_many(
			registry,
			history,
			names,
			Duration::from_secs(delay),
			!no_skip,
			&ThreadSleeper,
		)?;
		println!("Opened {} of {} profiles", opened.len(), names.len());
		hold_then_close(&mut sessions, detach)
	}

	pub fn switch(
		&self,
		registry: &ProfileRegistry,
		history: &mut HistoryTracker,
		from: &str,
		to: &str,
		detach: bool,
	) -> Result<()> {
		let mut sessions = self.coordinator()?;
		sessions.switch(registry, history, from, to)?;
		println!("{} from '{from}' to '{to}'", "Switched".green().bold());
		hold_then_close(&mut sessions, detach)
	}

	pub fn close_all(&self) -> Result<()> {
		let mut sessions = self.coordinator()?;
		let closed = sessions.close_all();
		println!("Closed {closed} tracked session(s)");
		Ok(())
	}

	#[allow(clippy::too_many_arguments)]
	pub fn open_batch(
		&self,
		registry: &ProfileRegistry,
		history: &mut HistoryTracker,
		names: &[String],
		batch_size: usize,
		profile_delay: u64,
		batch_delay: u64,
		no_skip: bool,
		detach: bool,
	) -> Result<()> {
		let mut sessions = self.coordinator()?;
		let scheduler = BatchScheduler::new(
			batch_size,
			Duration::from_secs(profile_delay),
			Duration::from_secs(batch_delay),
		)
		.with_skip_missing(!no_skip);
		let report = scheduler.run(names, registry, history, &mut sessions, &ThreadSleeper)?;
		output::print_batch_report(&report);
		hold_then_close(&mut sessions, detach)
	}

	pub fn run_batch(
		&self,
		batches: &BatchStore,
		registry: &ProfileRegistry,
		history: &mut HistoryTracker,
		name: &str,
		detach: bool,
	) -> Result<()> {
		let mut sessions = self.coordinator()?;
		println!("Running batch '{name}'...");
		let report = batches.run(name, registry, history, &mut sessions, &ThreadSleeper)?;
		output::print_batch_report(&report);
		hold_then_close(&mut sessions, detach)
	}
}

/// Launched browsers outlive this process, so the prompt keeps the
/// close-all sweep available before exiting. Interrupting instead leaves
/// every session running.
fn hold_then_close(sessions: &mut SessionCoordinator<ProcessDriver>, detach: bool) -> Result<()> {
	if sessions.active_count() == 0 {
		return Ok(());
	}
	if detach {
		println!("Leaving {} session(s) running", sessions.active_count());
		return Ok(());
	}

	print!("Press Enter to close all tracked sessions and exit... ");
	io::stdout().flush()?;
	let mut line = String::new();
	io::stdin().read_line(&mut line)?;

	let closed = sessions.close_all();
	println!("Closed {closed} session(s)");
	Ok(())
}
