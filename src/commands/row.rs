use crate::commands::QueryOutput;
use crate::dataset::Dataset;
use crate::error::{TabshError, TabshResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowArgs {
	pub index: usize,
}

pub async fn execute(dataset: &Dataset, args: &RowArgs) -> TabshResult<QueryOutput> {
	dataset.check_index(args.index)?;

	dataset.slice(args.index, 1).await?
		.into_iter()
		.next()
		.map(QueryOutput::Row)
		.ok_or(TabshError::IndexOutOfRange { index: args.index, len: dataset.num_rows() })
}
