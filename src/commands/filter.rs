use datafusion::arrow::datatypes::DataType;
use datafusion::prelude::*;
use crate::commands::QueryOutput;
use crate::dataset::{rows_from_batches, Dataset};
use crate::error::TabshResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterArgs {
	pub feature: String,
	pub value: String,
}

/// Rows whose `feature` cell, rendered as text, equals `value`. Nulls never match.
pub async fn execute(dataset: &Dataset, args: &FilterArgs) -> TabshResult<QueryOutput> {
	let column = dataset.resolve_column(&args.feature)?;

	tracing::debug!(column = %column, value = %args.value, "applying equality filter");

	let predicate = cast(ident(&column), DataType::Utf8).eq(lit(args.value.as_str()));
	let batches = dataset.frame().filter(predicate)?.collect().await?;

	Ok(QueryOutput::Table(rows_from_batches(&batches)?))
}
