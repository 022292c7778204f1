pub mod column;
pub mod format;
pub mod io;
pub mod output;

use datafusion::prelude::*;
use std::path::Path;
use crate::error::{TabshError, TabshResult};

/// Single-partition context; keeps scans and filters in file order.
pub fn create_context() -> SessionContext {
	let config = SessionConfig::new()
		.with_batch_size(8192)
		.with_target_partitions(1);

	SessionContext::new_with_config(config)
}

pub fn detect_file_format(path: &Path) -> TabshResult<FileFormat> {
	let extension = path.extension()
		.and_then(|s| s.to_str())
		.map(|s| s.to_ascii_lowercase());

	match extension.as_deref() {
		Some("csv") => Ok(FileFormat::Csv),
		Some("json") => Ok(FileFormat::Json),
		Some("jsonl") => Ok(FileFormat::JsonLines),
		Some("xlsx") => Ok(FileFormat::Excel),
		_ => Err(TabshError::UnsupportedFormat(
			format!("{} (we only support .csv/.json/.jsonl/.xlsx)", path.display())
		)),
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
	Csv,
	Json,
	JsonLines,
	Excel,
}
