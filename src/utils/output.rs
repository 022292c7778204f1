use colored::Colorize;
use std::io::Write;
use tracing::{error, info};
use crate::commands::QueryOutput;
use crate::error::{TabshError, TabshResult};
use crate::utils::format::{format_columns, format_row, format_values, ROW_SEPARATOR};

pub const UNKNOWN_COMMAND: &str = "Unknown command";
pub const EMPTY_TABLE: &str = "(no rows)";

/// Prints query results to `writer` and mirrors a text form into the run log.
pub struct OutputHandler<W: Write> {
	writer: W,
}

impl<W: Write> OutputHandler<W> {
	pub fn new(writer: W) -> Self {
		Self { writer }
	}

	pub fn handle_output(&mut self, output: &QueryOutput) -> TabshResult<()> {
		match output {
			QueryOutput::Table(rows) if rows.is_empty() => {
				self.emit(EMPTY_TABLE)?;
			},
			QueryOutput::Table(rows) => {
				for row in rows {
					let rendered = format_row(row);
					writeln!(self.writer, "{}", rendered)?;
					writeln!(self.writer, "{}", ROW_SEPARATOR)?;
					info!("{}", rendered);
				}
			},
			QueryOutput::Columns(columns) => self.emit(&format_columns(columns))?,
			QueryOutput::Count(count) => self.emit(&count.to_string())?,
			QueryOutput::Scalar(value) => self.emit(&value.to_string())?,
			QueryOutput::Values(values) => self.emit(&format_values(values))?,
			QueryOutput::Row(row) => self.emit(&format_row(row))?,
		}

		self.writer.flush()?;
		Ok(())
	}

	pub fn handle_unknown(&mut self) -> TabshResult<()> {
		writeln!(self.writer, "{}", UNKNOWN_COMMAND)?;
		self.writer.flush()?;
		Ok(())
	}

	pub fn handle_error(&mut self, err: &TabshError) -> TabshResult<()> {
		error!("{}", err);
		writeln!(self.writer, "{}", err.to_string().red())?;
		self.writer.flush()?;
		Ok(())
	}

	fn emit(&mut self, text: &str) -> TabshResult<()> {
		writeln!(self.writer, "{}", text)?;
		info!("{}", text);
		Ok(())
	}

	#[cfg(test)]
	pub fn into_inner(self) -> W {
		self.writer
	}
}
