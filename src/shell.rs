use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};
use crate::cli::Cli;
use crate::commands::Interpreter;
use crate::dataset::Dataset;
use crate::error::TabshResult;
use crate::utils::output::OutputHandler;

pub const PROMPT: &str = "> ";
pub const EXIT_SENTINEL: &str = "exit()";

#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
	pub verbose: bool,
}

impl From<&Cli> for ShellConfig {
	fn from(cli: &Cli) -> Self {
		Self { verbose: cli.verbose }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
	Running,
	Terminated,
}

/// Reads commands until `exit()`, end of input or Ctrl-C.
pub async fn run(dataset: &Dataset, config: &ShellConfig) -> TabshResult<()> {
	let interpreter = Interpreter::new(dataset)?;
	let mut editor = DefaultEditor::new()?;
	let mut output = OutputHandler::new(std::io::stdout());

	loop {
		let line = match editor.readline(PROMPT) {
			Ok(line) => line,
			Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
				debug!("input closed");
				break;
			},
			Err(e) => return Err(e.into()),
		};

		if !line.trim().is_empty() {
			if let Err(e) = editor.add_history_entry(line.as_str()) {
				debug!("history not updated: {}", e);
			}
		}

		if process_line(&interpreter, &line, &mut output, config).await? == ShellState::Terminated {
			break;
		}
	}

	Ok(())
}

/// Handles one input line. Command errors are reported and swallowed; only
/// failures to write output are returned.
pub async fn process_line<W: Write>(
	interpreter: &Interpreter<'_>,
	line: &str,
	output: &mut OutputHandler<W>,
	config: &ShellConfig,
) -> TabshResult<ShellState> {
	let command = line.trim();
	if command.is_empty() {
		return Ok(ShellState::Running);
	}

	info!("> {}", line);

	if command == EXIT_SENTINEL {
		return Ok(ShellState::Terminated);
	}

	let started = Instant::now();
	match interpreter.run(command).await {
		Ok(Some(result)) => output.handle_output(&result)?,
		Ok(None) => output.handle_unknown()?,
		Err(e) => output.handle_error(&e)?,
	}

	let elapsed = started.elapsed();
	debug!(elapsed_ms = elapsed.as_millis() as u64, "command finished");
	if config.verbose {
		eprintln!("({:.3}s)", elapsed.as_secs_f64());
	}

	Ok(ShellState::Running)
}
