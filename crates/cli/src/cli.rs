//! Command-line surface, mirroring the profile/batch operations of the
//! core library.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use edgectl::batch::{DEFAULT_BATCH_DELAY_SECS, DEFAULT_BATCH_SIZE, DEFAULT_PROFILE_DELAY_SECS};

/// Microsoft Edge profile automation.
#[derive(Parser, Debug)]
#[command(name = "edgectl")]
#[command(about = "Manage Microsoft Edge browser profiles and batched launches")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Directory holding the registry state files
	#[arg(long, global = true, value_name = "DIR")]
	pub state_dir: Option<PathBuf>,

	/// Edge user-data root handed to launched browsers
	#[arg(long, global = true, value_name = "DIR")]
	pub user_data_dir: Option<PathBuf>,

	/// Browser binary to launch (skips discovery)
	#[arg(long, global = true, value_name = "PATH")]
	pub browser: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Register a new profile.
	Add {
		/// Profile name
		name: String,
		/// Profile directory (e.g. "Profile 2"); auto-derived when omitted
		#[arg(short, long)]
		path: Option<String>,
		/// Preferred language (e.g. en-US, es, fr)
		#[arg(short, long)]
		language: Option<String>,
	},
	/// Remove a profile and its history.
	Remove {
		name: String,
	},
	/// List registered profiles.
	List {
		/// Only show profiles that were never opened
		#[arg(long)]
		unopened: bool,
	},
	/// Launch Edge with a profile.
	Open {
		name: String,
		/// Exit immediately, leaving the browser running
		#[arg(long)]
		detach: bool,
	},
	/// Launch several profiles with a settle delay between them.
	OpenMultiple {
		#[arg(required = true)]
		names: Vec<String>,
		/// Seconds between launches
		#[arg(short, long, default_value_t = DEFAULT_PROFILE_DELAY_SECS)]
		delay: u64,
		/// Fail on unregistered names instead of skipping them
		#[arg(long)]
		no_skip: bool,
		#[arg(long)]
		detach: bool,
	},
	/// Close one profile's session and open another.
	Switch {
		from: String,
		to: String,
		#[arg(long)]
		detach: bool,
	},
	/// Set the preferred language for a profile.
	SetLanguage {
		name: String,
		language: String,
	},
	/// Show per-profile launch history.
	History {
		/// Single profile to show (all when omitted)
		#[arg(short, long)]
		name: Option<String>,
	},
	/// Close every tracked browser session.
	CloseAll,
	/// Launch profiles in resource-bounded batches.
	OpenBatch {
		#[arg(required = true)]
		names: Vec<String>,
		/// Profiles launched per batch
		#[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
		batch_size: usize,
		/// Seconds between launches within a batch
		#[arg(long, default_value_t = DEFAULT_PROFILE_DELAY_SECS)]
		profile_delay: u64,
		/// Seconds between batches
		#[arg(long, default_value_t = DEFAULT_BATCH_DELAY_SECS)]
		batch_delay: u64,
		/// Fail on unregistered names instead of skipping them
		#[arg(long)]
		no_skip: bool,
		#[arg(long)]
		detach: bool,
	},
	/// Manage stored batch configurations.
	Batch(BatchArgs),
}

#[derive(Args, Debug)]
pub struct BatchArgs {
	#[command(subcommand)]
	pub action: BatchAction,
}

#[derive(Subcommand, Debug)]
pub enum BatchAction {
	/// List stored batch configurations.
	List,
	/// Add or overwrite a batch configuration.
	Add {
		name: String,
		#[arg(required = true)]
		profiles: Vec<String>,
		#[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
		batch_size: usize,
		#[arg(long, default_value_t = DEFAULT_PROFILE_DELAY_SECS)]
		profile_delay: u64,
		#[arg(long, default_value_t = DEFAULT_BATCH_DELAY_SECS)]
		batch_delay: u64,
	},
	/// Remove a batch configuration.
	Remove {
		name: String,
	},
	/// Run a stored batch configuration.
	Run {
		name: String,
		#[arg(long)]
		detach: bool,
	},
}
