use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tabsh")]
#[command(about = "An interactive shell for exploring CSV, JSON and Excel datasets")]
#[command(version)]
pub struct Cli {
	#[arg(short = 'd', long = "dataset_path", visible_alias = "dataset-path", help = "Dataset to load (.csv, .json, .jsonl, .xlsx)")]
	pub dataset_path: PathBuf,

	#[arg(long = "log", overrides_with = "no_log", help = "Write a log file for this session")]
	pub log: bool,

	#[arg(long = "no-log", overrides_with = "log", help = "Do not write a log file (default)")]
	pub no_log: bool,

	#[arg(long = "log_dir", visible_alias = "log-dir", default_value = "./logs", help = "Directory for log files")]
	pub log_dir: PathBuf,

	#[arg(short, long, help = "Enable verbose output")]
	pub verbose: bool,
}

impl Cli {
	pub fn log_enabled(&self) -> bool {
		self.log && !self.no_log
	}

	pub fn log_if_verbose(&self, message: &str) {
		if self.verbose {
			eprintln!("{}", message);
		}
	}
}
