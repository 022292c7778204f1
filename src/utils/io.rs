use datafusion::prelude::{SessionContext, CsvReadOptions};
use datafusion::dataframe::DataFrame;
use datafusion::datasource::MemTable;
use datafusion::arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, RecordBatch, StringArray};
use datafusion::arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::Timelike;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use crate::dataset::Dataset;
use crate::error::{TabshError, TabshResult};
use crate::utils::{create_context, detect_file_format, FileFormat};

const JSON_BATCH_SIZE: usize = 8192;
/// Largest magnitude below which every whole `f64` is an exact `i64`.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Reads `path` according to its extension and materialises it in memory.
pub async fn load_dataset(path: &Path) -> TabshResult<Dataset> {
	let ctx = create_context();
	let df = read_data(path, &ctx).await?;
	Dataset::from_frame(df, &ctx).await
}

pub async fn read_data(path: &Path, ctx: &SessionContext) -> TabshResult<DataFrame> {
	let format = detect_file_format(path)?;

	if !path.is_file() {
		return Err(TabshError::FileNotFound(path.display().to_string()));
	}

	let path_str = path.to_str()
		.ok_or_else(|| TabshError::InvalidArgument(format!("Path is not valid UTF-8: {}", path.display())))?;
	let extension = format!(".{}", path.extension().and_then(|s| s.to_str()).unwrap_or_default());

	tracing::debug!(path = path_str, ?format, "reading dataset");

	match format {
		FileFormat::Csv => {
			// Type columns from every row, not a prefix.
			let options = CsvReadOptions::new()
				.file_extension(&extension)
				.schema_infer_max_records(usize::MAX);
			Ok(ctx.read_csv(path_str, options).await?)
		},
		FileFormat::JsonLines => read_json_lines(path, ctx),
		FileFormat::Json => read_json_document(path, ctx),
		FileFormat::Excel => read_excel_file(path, ctx),
	}
}

fn read_json_document(path: &Path, ctx: &SessionContext) -> TabshResult<DataFrame> {
	let content = std::fs::read_to_string(path)?;
	let document: Value = serde_json::from_str(&content)?;
	read_json_records(json_records(document)?, ctx)
}

fn read_json_lines(path: &Path, ctx: &SessionContext) -> TabshResult<DataFrame> {
	let content = std::fs::read_to_string(path)?;
	let records = content.lines()
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty())
		.map(|(n, line)| serde_json::from_str::<Value>(line).map_err(|e| {
			TabshError::InvalidArgument(format!("Invalid JSON on line {}: {}", n + 1, e))
		}))
		.collect::<TabshResult<Vec<_>>>()?;

	read_json_records(records, ctx)
}

/// Infers one schema over all records; mixed scalar columns widen to Utf8
/// and their numbers and booleans are kept as text.
fn read_json_records(records: Vec<Value>, ctx: &SessionContext) -> TabshResult<DataFrame> {
	let schema = Arc::new(arrow_json::reader::infer_json_schema_from_iterator(records.iter().map(Ok))?);
	let mut decoder = arrow_json::ReaderBuilder::new(schema.clone())
		.with_batch_size(JSON_BATCH_SIZE)
		.with_coerce_primitive(true)
		.build_decoder()?;

	let mut batches = Vec::new();
	for chunk in records.chunks(JSON_BATCH_SIZE) {
		decoder.serialize(chunk)?;
		if let Some(batch) = decoder.flush()? {
			batches.push(batch);
		}
	}

	read_batches(schema, batches, ctx)
}

/// Accepts an array of records or a column-oriented object
/// (`{"col": {"0": v}}` / `{"col": [v]}`) and returns one JSON object per row.
fn json_records(document: Value) -> TabshResult<Vec<Value>> {
	match document {
		Value::Array(items) => Ok(items),
		Value::Object(columns) => columns_to_records(columns),
		_ => Err(TabshError::InvalidArgument(
			"JSON document must be an array of records or an object of columns".to_string()
		)),
	}
}

fn columns_to_records(columns: Map<String, Value>) -> TabshResult<Vec<Value>> {
	let mut slots: HashMap<String, usize> = HashMap::new();
	let mut records: Vec<Map<String, Value>> = Vec::new();

	for (column, values) in columns {
		let cells: Vec<(String, Value)> = match values {
			Value::Object(by_label) => by_label.into_iter().collect(),
			Value::Array(items) => items.into_iter()
				.enumerate()
				.map(|(i, v)| (i.to_string(), v))
				.collect(),
			other => return Err(TabshError::InvalidArgument(format!(
				"Column '{}' must map to an object or an array, found {}", column, other
			))),
		};

		for (label, value) in cells {
			let slot = *slots.entry(label).or_insert_with(|| {
				records.push(Map::new());
				records.len() - 1
			});
			records[slot].insert(column.clone(), value);
		}
	}

	Ok(records.into_iter().map(Value::Object).collect())
}

fn read_batches(schema: SchemaRef, batches: Vec<RecordBatch>, ctx: &SessionContext) -> TabshResult<DataFrame> {
	let table = MemTable::try_new(schema, vec![batches])?;
	Ok(ctx.read_table(Arc::new(table))?)
}

fn read_excel_file(path: &Path, ctx: &SessionContext) -> TabshResult<DataFrame> {
	let mut workbook: Xlsx<_> = open_workbook(path)?;

	let sheet_names = workbook.sheet_names();
	let sheet_name = sheet_names.first()
		.ok_or_else(|| TabshError::InvalidArgument("No worksheets found in Excel file".to_string()))?
		.clone();
	let range = workbook.worksheet_range(&sheet_name)?;

	let mut rows = range.rows();
	let header_row = rows.next()
		.ok_or_else(|| TabshError::InvalidArgument(format!("Worksheet '{}' is empty", sheet_name)))?;
	let data_rows: Vec<&[Data]> = rows.collect();

	let headers: Vec<String> = header_row.iter()
		.enumerate()
		.map(|(col, cell)| match cell {
			Data::String(s) if !s.trim().is_empty() => s.clone(),
			Data::Int(i) => i.to_string(),
			Data::Float(f) => f.to_string(),
			_ => format!("Column_{}", col + 1),
		})
		.collect();

	let cell_at = |row: &[Data], col: usize| row.get(col).cloned().unwrap_or(Data::Empty);

	let mut fields = Vec::with_capacity(headers.len());
	let mut arrays: Vec<ArrayRef> = Vec::with_capacity(headers.len());

	for (col_idx, header) in headers.iter().enumerate() {
		let column: Vec<Data> = data_rows.iter()
			.map(|row| cell_at(*row, col_idx))
			.collect();
		let data_type = infer_excel_column_type(&column);

		let cells = column.into_iter();
		let array: ArrayRef = match data_type {
			DataType::Int64 => Arc::new(cells.map(|cell| match cell {
				Data::Int(i) => Some(i),
				Data::Float(f) => whole_number(f),
				_ => None,
			}).collect::<Int64Array>()),
			DataType::Float64 => Arc::new(cells.map(|cell| match cell {
				Data::Float(f) => Some(f),
				Data::Int(i) => Some(i as f64),
				_ => None,
			}).collect::<Float64Array>()),
			DataType::Boolean => Arc::new(cells.map(|cell| match cell {
				Data::Bool(b) => Some(b),
				_ => None,
			}).collect::<BooleanArray>()),
			_ => Arc::new(cells.map(|cell| excel_cell_text(&cell)).collect::<StringArray>()),
		};

		fields.push(Field::new(header, data_type, true));
		arrays.push(array);
	}

	let schema = Arc::new(Schema::new(fields));
	let batch = RecordBatch::try_new(schema.clone(), arrays)?;
	read_batches(schema, vec![batch], ctx)
}

/// Narrowest type that holds every non-empty cell of the column unchanged.
fn infer_excel_column_type(column: &[Data]) -> DataType {
	let values: Vec<&Data> = column.iter()
		.filter(|cell| !matches!(cell, Data::Empty))
		.collect();

	if values.is_empty() {
		DataType::Utf8
	} else if values.iter().all(|v| match v {
		Data::Int(_) => true,
		// Excel stores integral numbers as floats
		Data::Float(f) => whole_number(*f).is_some(),
		_ => false,
	}) {
		DataType::Int64
	} else if values.iter().all(|v| matches!(v, Data::Int(_) | Data::Float(_))) {
		DataType::Float64
	} else if values.iter().all(|v| matches!(v, Data::Bool(_))) {
		DataType::Boolean
	} else {
		DataType::Utf8
	}
}

fn whole_number(f: f64) -> Option<i64> {
	if f.fract() == 0.0 && f.abs() < EXACT_INTEGER_LIMIT {
		Some(f as i64)
	} else {
		None
	}
}

fn excel_cell_text(cell: &Data) -> Option<String> {
	match cell {
		Data::Empty => None,
		Data::String(s) => Some(s.clone()),
		Data::Int(i) => Some(i.to_string()),
		Data::Float(f) => Some(f.to_string()),
		Data::Bool(b) => Some(b.to_string()),
		Data::DateTime(dt) => Some(match dt.as_datetime() {
			Some(datetime) if datetime.num_seconds_from_midnight() == 0 => datetime.date().to_string(),
			Some(datetime) => datetime.to_string(),
			None => dt.as_f64().to_string(),
		}),
		Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
		Data::Error(e) => Some(format!("#{:?}", e)),
	}
}
