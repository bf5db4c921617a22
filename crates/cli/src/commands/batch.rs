//! Batch-configuration commands.

use colored::Colorize;
use edgectl::{BatchConfig, BatchStore, Result};

use crate::output;

pub fn list(batches: &BatchStore) -> Result<()> {
	output::print_batch_configs(batches);
	Ok(())
}

pub fn add(
	batches: &mut BatchStore,
	name: &str,
	profiles: Vec<String>,
	batch_size: usize,
	profile_delay: u64,
	batch_delay: u64,
) -> Result<()> {
	batches.add(
		name,
		BatchConfig {
			profiles,
			batch_size,
			profile_delay,
			batch_delay,
		},
	)?;
	println!("{} batch '{name}'", "Configured".green().bold());
	Ok(())
}

pub fn remove(batches: &mut BatchStore, name: &str) -> Result<()> {
	if batches.remove(name)? {
		println!("{} batch '{name}'", "Removed".green().bold());
	} else {
		println!("{} batch '{name}' not found", "warning:".yellow().bold());
	}
	Ok(())
}
