//! Command dispatch: builds the stores once, then hands off to the
//! per-area modules. No business logic lives here.

mod batch;
mod launch;
mod profile;

use edgectl::{BatchStore, HistoryTracker, JsonBackend, ProfileRegistry, Result, StatePaths};

use crate::cli::{BatchAction, Cli, Commands};

pub fn dispatch(cli: Cli) -> Result<()> {
	let state_dir = cli.state_dir.unwrap_or_else(StatePaths::default_dir);
	let paths = StatePaths::new(&state_dir);
	let mut registry = ProfileRegistry::open(JsonBackend::new(paths.profiles));
	let mut history = HistoryTracker::open(JsonBackend::new(paths.history));
	let mut batches = BatchStore::open(JsonBackend::new(paths.batches));

	let launcher = launch::Launcher::new(cli.user_data_dir, cli.browser);

	match cli.command {
		Commands::Add { name, path, language } => profile::add(&mut registry, &name, path, language),
		Commands::Remove { name } => profile::remove(&mut registry, &mut history, &name),
		Commands::List { unopened } => profile::list(&registry, &history, unopened),
		Commands::SetLanguage { name, language } => profile::set_language(&mut registry, &name, &language),
		Commands::History { name } => profile::history(&history, name.as_deref()),
		Commands::Open { name, detach } => launcher.open(&registry, &mut history, &name, detach),
		Commands::OpenMultiple { names, delay, no_skip, detach } => {
			launcher.open_multiple(&registry, &mut history, &names, delay, no_skip, detach)
		}
		Commands::Switch { from, to, detach } => launcher.switch(&registry, &mut history, &from, &to, detach),
		Commands::CloseAll => launcher.close_all(),
		Commands::OpenBatch {
			names,
			batch_size,
			profile_delay,
			batch_delay,
			no_skip,
			detach,
		} => launcher.open_batch(
			&registry,
			&mut history,
			&names,
			batch_size,
			profile_delay,
			batch_delay,
			no_skip,
			detach,
		),
		Commands::Batch(args) => match args.action {
			BatchAction::List => batch::list(&batches),
			BatchAction::Add {
				name,
				profiles,
				batch_size,
				profile_delay,
				batch_delay,
			} => batch::add(&mut batches, &name, profiles, batch_size, profile_delay, batch_delay),
			BatchAction::Remove { name } => batch::remove(&mut batches, &name),
			BatchAction::Run { name, detach } => launcher.run_batch(&batches, &registry, &mut history, &name, detach),
		},
	}
}
