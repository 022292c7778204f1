use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;
use crate::error::{TabshError, TabshResult};

/// `hour_minute_day_month_year`
const LOG_FILE_STEM_FORMAT: &str = "%H_%M_%d_%m_%Y";
const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
	fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
		write!(w, "{}", Local::now().format(LOG_TIMESTAMP_FORMAT))
	}
}

pub fn log_file_path(log_dir: &Path) -> PathBuf {
	log_dir.join(format!("{}.log", Local::now().format(LOG_FILE_STEM_FORMAT)))
}

/// Sends `tracing` events at INFO and above to a fresh file in `log_dir`.
/// Lines look like `2024-05-01 13:37:00  INFO > head`.
pub fn init_file_logger(log_dir: &Path) -> TabshResult<PathBuf> {
	fs::create_dir_all(log_dir)?;

	let path = log_file_path(log_dir);
	let file = File::create(&path)?;

	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.with_target(false)
		.with_timer(LocalTimestamp)
		.try_init()
		.map_err(|e| TabshError::InvalidArgument(format!("Failed to install logger: {}", e)))?;

	Ok(path)
}
