use crate::commands::QueryOutput;
use crate::dataset::Dataset;

pub fn execute(dataset: &Dataset) -> QueryOutput {
	QueryOutput::Count(dataset.num_rows())
}
