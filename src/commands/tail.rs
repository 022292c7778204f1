use crate::commands::range::resolve_slice;
use crate::commands::{QueryOutput, PREVIEW_ROWS};
use crate::dataset::Dataset;
use crate::error::TabshResult;

pub async fn execute(dataset: &Dataset) -> TabshResult<QueryOutput> {
	let total_rows = dataset.num_rows();
	let (offset, count) = resolve_slice(-(PREVIEW_ROWS as i64), total_rows as i64, total_rows);

	tracing::debug!(offset, count, total_rows, "tail");

	let rows = dataset.slice(offset, count).await?;
	Ok(QueryOutput::Table(rows))
}
