use clap::Parser;
use colored::Colorize;
use edgectl_cli::{cli::Cli, commands, logging};

fn main() {
	let cli = Cli::parse();
	logging::init(cli.verbose);

	if let Err(err) = commands::dispatch(cli) {
		eprintln!("{} {err}", "error:".red().bold());
		std::process::exit(1);
	}
}
