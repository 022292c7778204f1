use itertools::Itertools;
use tabled::builder::Builder;
use tabled::settings::Style;
use crate::dataset::{CellValue, Row};

pub const ROW_SEPARATOR: &str = "--";

/// `['a', 'b']`
pub fn format_columns(columns: &[String]) -> String {
	format!("[{}]", columns.iter()
		.map(|c| CellValue::Text(c.clone()).repr())
		.join(", "))
}

/// `[1, 'x', null]`
pub fn format_values(values: &[CellValue]) -> String {
	format!("[{}]", values.iter().map(CellValue::repr).join(", "))
}

/// One `column  value` line per cell, columns aligned.
pub fn format_row(row: &Row) -> String {
	if row.cells.is_empty() {
		return String::new();
	}

	let mut builder = Builder::default();
	for (name, value) in &row.cells {
		builder.push_record([name.clone(), value.to_string()]);
	}

	let mut table = builder.build();
	table.with(Style::blank());

	table.to_string()
		.lines()
		.map(str::trim_end)
		.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_format_columns() {
		let columns = vec!["id".to_string(), "first name".to_string()];
		assert_eq!(format_columns(&columns), "['id', 'first name']");
		assert_eq!(format_columns(&[]), "[]");
	}

	#[test]
	fn test_format_values() {
		let values = vec![
			CellValue::Value("1".to_string()),
			CellValue::Text("Paris".to_string()),
			CellValue::Null,
		];
		assert_eq!(format_values(&values), "[1, 'Paris', null]");
	}

	#[test]
	fn test_format_row_aligns_columns() {
		let row = Row {
			cells: vec![
				("id".to_string(), CellValue::Value("3".to_string())),
				("name".to_string(), CellValue::Text("Dave".to_string())),
				("score".to_string(), CellValue::Null),
			],
		};
		let rendered = format_row(&row);
		let lines: Vec<&str> = rendered.lines().collect();
		assert_eq!(lines.len(), 3);
		assert!(lines[0].contains("id") && lines[0].ends_with('3'));
		assert!(lines[1].contains("name") && lines[1].ends_with("Dave"));
		assert!(lines[2].ends_with("null"));

		let value_column = lines[0].find('3').unwrap();
		assert_eq!(lines[1].find("Dave").unwrap(), value_column);
	}
}
