use crate::commands::QueryOutput;
use crate::dataset::Dataset;

pub fn execute(dataset: &Dataset) -> QueryOutput {
	QueryOutput::Columns(dataset.column_names())
}
