mod cli;
mod commands;
mod dataset;
mod error;
mod logging;
mod shell;
mod utils;

use clap::Parser;
use cli::Cli;
use error::TabshResult;
use shell::{ShellConfig, EXIT_SENTINEL};

#[tokio::main(flavor = "current_thread")]
async fn main() {
	if let Err(e) = run().await {
		eprintln!("Error: {}", e);
		std::process::exit(1);
	}
}

async fn run() -> TabshResult<()> {
	let cli = Cli::parse();
	let config = ShellConfig::from(&cli);

	println!("Welcome to the interactive shell!");
	println!("Type \"{}\" to exit the shell", EXIT_SENTINEL);
	println!("Load dataset from: {}", cli.dataset_path.display());

	let dataset = utils::io::load_dataset(&cli.dataset_path).await?;
	let (rows, columns) = dataset.shape();
	println!("Dataset loaded successfully! Dataset shape: ({}, {})", rows, columns);

	if cli.log_enabled() {
		let log_path = logging::init_file_logger(&cli.log_dir)?;
		cli.log_if_verbose(&format!("Logging to: {}", log_path.display()));
		tracing::info!("loaded {} ({} rows, {} columns)", cli.dataset_path.display(), rows, columns);
	}

	shell::run(&dataset, &config).await
}
