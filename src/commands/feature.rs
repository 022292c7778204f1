use crate::commands::QueryOutput;
use crate::dataset::{rows_from_batches, Dataset};
use crate::error::{TabshError, TabshResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureArgs {
	pub index: usize,
	pub feature: String,
}

/// Value of one cell, `[index].feature`.
pub async fn execute(dataset: &Dataset, args: &FeatureArgs) -> TabshResult<QueryOutput> {
	let column = dataset.resolve_column(&args.feature)?;
	dataset.check_index(args.index)?;

	let batches = dataset.frame()
		.select_columns(&[column.as_str()])?
		.limit(args.index, Some(1))?
		.collect()
		.await?;

	rows_from_batches(&batches)?
		.into_iter()
		.next()
		.and_then(|row| row.cells.into_iter().next())
		.map(|(_, value)| QueryOutput::Scalar(value))
		.ok_or(TabshError::IndexOutOfRange { index: args.index, len: dataset.num_rows() })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dataset::CellValue;
	use crate::dataset::test_util::sample_dataset;

	fn args(index: usize, feature: &str) -> FeatureArgs {
		FeatureArgs { index, feature: feature.to_string() }
	}

	#[tokio::test]
	async fn test_feature_value() {
		let dataset = sample_dataset();
		assert_eq!(
			execute(&dataset, &args(1, "city")).await.unwrap(),
			QueryOutput::Scalar(CellValue::Text("Berlin".to_string()))
		);
		assert_eq!(
			execute(&dataset, &args(2, "score")).await.unwrap(),
			QueryOutput::Scalar(CellValue::Null)
		);
	}

	#[tokio::test]
	async fn test_feature_column_must_match_case() {
		let dataset = sample_dataset();
		match execute(&dataset, &args(0, "NAME")).await {
			Err(TabshError::ColumnNotFound(msg)) => assert!(msg.contains("Available columns")),
			other => panic!("expected column error, got {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_feature_errors() {
		let dataset = sample_dataset();
		assert!(matches!(
			execute(&dataset, &args(0, "salary")).await,
			Err(TabshError::ColumnNotFound(_))
		));
		assert!(matches!(
			execute(&dataset, &args(42, "name")).await,
			Err(TabshError::IndexOutOfRange { index: 42, .. })
		));
	}
}
