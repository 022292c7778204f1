use crate::commands::{QueryOutput, PREVIEW_ROWS};
use crate::dataset::Dataset;
use crate::error::TabshResult;

pub async fn execute(dataset: &Dataset) -> TabshResult<QueryOutput> {
	let rows = dataset.slice(0, PREVIEW_ROWS).await?;
	Ok(QueryOutput::Table(rows))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dataset::test_util::sample_dataset;

	#[tokio::test]
	async fn test_head_returns_first_rows() {
		let dataset = sample_dataset();
		let rows = match execute(&dataset).await.unwrap() {
			QueryOutput::Table(rows) => rows,
			other => panic!("expected table, got {:?}", other),
		};
		let ids: Vec<String> = rows.iter().map(|r| r.get("id").unwrap().to_string()).collect();
		assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
	}
}
