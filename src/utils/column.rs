use datafusion::common::DFSchema;
use crate::error::{TabshError, TabshResult};

/// Column names match exactly, case included.
pub fn resolve_column_name(
	schema: &DFSchema,
	column_input: &str,
) -> TabshResult<String> {
	let fields = schema.fields();

	fields.iter()
		.find(|f| f.name() == column_input)
		.map(|f| f.name().clone())
		.ok_or_else(|| {
			let available_cols: Vec<String> = fields.iter()
				.map(|f| f.name().clone())
				.collect();
			TabshError::ColumnNotFound(format!(
				"Column '{}' not found. Available columns: {:?}",
				column_input, available_cols
			))
		})
}
