use datafusion::arrow::array::{Array, ArrayRef, RecordBatch};
use datafusion::arrow::datatypes::{DataType, SchemaRef};
use datafusion::arrow::util::display::{ArrayFormatter, FormatOptions};
use datafusion::dataframe::DataFrame;
use datafusion::datasource::MemTable;
use datafusion::prelude::SessionContext;
use std::fmt;
use std::sync::Arc;
use crate::error::{TabshError, TabshResult};
use crate::utils::column::resolve_column_name;

/// The loaded table. Fully materialised at startup and never modified.
pub struct Dataset {
	df: DataFrame,
	num_rows: usize,
}

impl Dataset {
	/// Collects `df` once and re-registers the batches as an in-memory table.
	pub async fn from_frame(df: DataFrame, ctx: &SessionContext) -> TabshResult<Self> {
		let logical_schema: SchemaRef = Arc::new(df.schema().as_arrow().clone());
		let batches = df.collect().await?;
		let schema = batches.first()
			.map(|batch| batch.schema())
			.unwrap_or(logical_schema);
		Self::from_batches(schema, batches, ctx)
	}

	pub fn from_batches(schema: SchemaRef, batches: Vec<RecordBatch>, ctx: &SessionContext) -> TabshResult<Self> {
		let num_rows = batches.iter().map(|b| b.num_rows()).sum();
		let table = MemTable::try_new(schema, vec![batches])?;
		let df = ctx.read_table(Arc::new(table))?;

		Ok(Self { df, num_rows })
	}

	/// A fresh handle on the table; query plans built from it never touch the source file.
	pub fn frame(&self) -> DataFrame {
		self.df.clone()
	}

	pub fn num_rows(&self) -> usize {
		self.num_rows
	}

	pub fn num_columns(&self) -> usize {
		self.df.schema().fields().len()
	}

	pub fn shape(&self) -> (usize, usize) {
		(self.num_rows(), self.num_columns())
	}

	pub fn column_names(&self) -> Vec<String> {
		self.df.schema().fields().iter()
			.map(|f| f.name().clone())
			.collect()
	}

	pub fn resolve_column(&self, column: &str) -> TabshResult<String> {
		resolve_column_name(self.df.schema(), column)
	}

	pub fn check_index(&self, index: usize) -> TabshResult<()> {
		if index >= self.num_rows {
			return Err(TabshError::IndexOutOfRange { index, len: self.num_rows });
		}
		Ok(())
	}

	/// Rows `offset..offset + count`, clipped to the table.
	pub async fn slice(&self, offset: usize, count: usize) -> TabshResult<Vec<Row>> {
		if count == 0 || offset >= self.num_rows {
			return Ok(Vec::new());
		}
		let batches = self.frame().limit(offset, Some(count))?.collect().await?;
		rows_from_batches(&batches)
	}
}

/// A single cell rendered to text by Arrow's display rules.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
	Null,
	Text(String),
	Value(String),
}

impl CellValue {
	fn from_array(array: &ArrayRef, formatter: &ArrayFormatter<'_>, row: usize) -> Self {
		if array.is_null(row) {
			return CellValue::Null;
		}
		let rendered = formatter.value(row).to_string();
		match array.data_type() {
			DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => CellValue::Text(rendered),
			_ => CellValue::Value(rendered),
		}
	}

	/// Quoted form used inside sequences, e.g. `'Alice'`.
	pub fn repr(&self) -> String {
		match self {
			CellValue::Text(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
			other => other.to_string(),
		}
	}
}

impl fmt::Display for CellValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CellValue::Null => write!(f, "null"),
			CellValue::Text(s) | CellValue::Value(s) => write!(f, "{}", s),
		}
	}
}

/// One table row, cells in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
	pub cells: Vec<(String, CellValue)>,
}

#[cfg(test)]
impl Row {
	pub fn get(&self, column: &str) -> Option<&CellValue> {
		self.cells.iter()
			.find(|(name, _)| name == column)
			.map(|(_, value)| value)
	}
}

pub fn rows_from_batches(batches: &[RecordBatch]) -> TabshResult<Vec<Row>> {
	let options = FormatOptions::default();
	let mut rows = Vec::with_capacity(batches.iter().map(|b| b.num_rows()).sum());

	for batch in batches {
		let schema = batch.schema();
		let formatters = batch.columns().iter()
			.map(|column| ArrayFormatter::try_new(column.as_ref(), &options))
			.collect::<Result<Vec<_>, _>>()?;

		for row in 0..batch.num_rows() {
			let cells = schema.fields().iter()
				.zip(batch.columns())
				.zip(&formatters)
				.map(|((field, column), formatter)| {
					(field.name().clone(), CellValue::from_array(column, formatter, row))
				})
				.collect();
			rows.push(Row { cells });
		}
	}

	Ok(rows)
}


#[cfg(test)]
mod tests {
	use super::*;
	use super::test_util::sample_dataset;

	#[tokio::test]
	async fn test_shape_and_columns() {
		let dataset = sample_dataset();
		assert_eq!(dataset.shape(), (10, 4));
		assert_eq!(dataset.column_names(), vec!["id", "name", "city", "score"]);
	}

	#[tokio::test]
	async fn test_slice_clips_to_table() {
		let dataset = sample_dataset();
		let rows = dataset.slice(8, 5).await.unwrap();
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].get("name"), Some(&CellValue::Text("Ivan".to_string())));
		assert!(dataset.slice(10, 5).await.unwrap().is_empty());
		assert!(dataset.slice(3, 0).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_cells_render_nulls_and_numbers() {
		let dataset = sample_dataset();
		let rows = dataset.slice(2, 3).await.unwrap();
		assert_eq!(rows[0].get("score"), Some(&CellValue::Null));
		assert_eq!(rows[1].get("score").unwrap().to_string(), "4.25");
		assert_eq!(rows[2].get("name"), Some(&CellValue::Null));
		assert_eq!(rows[2].get("id").unwrap().to_string(), "4");
	}

	#[test]
	fn test_check_index() {
		let dataset = sample_dataset();
		assert!(dataset.check_index(9).is_ok());
		match dataset.check_index(9999) {
			Err(TabshError::IndexOutOfRange { index, len }) => {
				assert_eq!(index, 9999);
				assert_eq!(len, 10);
			},
			other => panic!("expected index error, got {:?}", other),
		}
	}

	#[test]
	fn test_cell_repr_quotes_text_only() {
		assert_eq!(CellValue::Text("it's".to_string()).repr(), "'it\\'s'");
		assert_eq!(CellValue::Value("3".to_string()).repr(), "3");
		assert_eq!(CellValue::Null.repr(), "null");
	}
}
