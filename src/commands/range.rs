use crate::commands::QueryOutput;
use crate::dataset::{rows_from_batches, Dataset};
use crate::error::TabshResult;

/// `[start:end]`, half-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeArgs {
	pub start: i64,
	pub end: i64,
}

/// `[start:end].feature`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFeatureArgs {
	pub range: RangeArgs,
	pub feature: String,
}

/// Maps slice bounds onto `(offset, count)` for a table of `len` rows.
///
/// Negative bounds count from the end and out-of-range bounds are clamped,
/// so an inverted or empty range yields a zero count rather than an error.
pub fn resolve_slice(start: i64, end: i64, len: usize) -> (usize, usize) {
	let len = len as i64;
	let clamp = |bound: i64| -> i64 {
		if bound < 0 {
			(bound + len).max(0)
		} else {
			bound.min(len)
		}
	};

	let start = clamp(start);
	let end = clamp(end);
	(start as usize, (end - start).max(0) as usize)
}

pub async fn execute(dataset: &Dataset, args: &RangeArgs) -> TabshResult<QueryOutput> {
	let (offset, count) = resolve_slice(args.start, args.end, dataset.num_rows());
	let rows = dataset.slice(offset, count).await?;
	Ok(QueryOutput::Table(rows))
}

pub async fn execute_feature(dataset: &Dataset, args: &RangeFeatureArgs) -> TabshResult<QueryOutput> {
	let column = dataset.resolve_column(&args.feature)?;
	let (offset, count) = resolve_slice(args.range.start, args.range.end, dataset.num_rows());
	if count == 0 {
		return Ok(QueryOutput::Values(Vec::new()));
	}

	let batches = dataset.frame()
		.select_columns(&[column.as_str()])?
		.limit(offset, Some(count))?
		.collect()
		.await?;

	let values = rows_from_batches(&batches)?
		.into_iter()
		.filter_map(|row| row.cells.into_iter().next())
		.map(|(_, value)| value)
		.collect();

	Ok(QueryOutput::Values(values))
}
