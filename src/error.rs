use thiserror::Error;

pub type TabshResult<T> = Result<T, TabshError>;

#[derive(Error, Debug)]
pub enum TabshError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("DataFusion error: {0}")]
	DataFusion(#[from] datafusion::error::DataFusionError),

	#[error("Arrow error: {0}")]
	Arrow(#[from] arrow::error::ArrowError),

	#[error("Regex error: {0}")]
	Regex(#[from] regex::Error),

	#[error("Serde JSON error: {0}")]
	SerdeJson(#[from] serde_json::Error),

	#[error("Excel error: {0}")]
	Excel(#[from] calamine::XlsxError),

	#[error("Readline error: {0}")]
	Readline(#[from] rustyline::error::ReadlineError),

	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Unsupported format: {0}")]
	UnsupportedFormat(String),

	#[error("Column not found: {0}")]
	ColumnNotFound(String),

	#[error("Index error: single positional indexer {index} is out-of-bounds for {len} rows")]
	IndexOutOfRange { index: usize, len: usize },
}
