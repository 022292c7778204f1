use regex::{Captures, Regex};
use crate::dataset::{CellValue, Dataset, Row};
use crate::error::{TabshError, TabshResult};

// Data Inspection
pub mod headers;
pub mod head;
pub mod tail;
pub mod count;

// Row Access
pub mod row;
pub mod feature;
pub mod range;

// Data Manipulation
pub mod filter;

/// Number of rows shown by `head` and `tail`.
pub const PREVIEW_ROWS: usize = 5;

/// A classified line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// `show`
	Headers,
	/// `head`
	Head,
	/// `tail`
	Tail,
	/// `len`
	Count,
	/// `N` or `[N]`
	Row(row::RowArgs),
	/// `[N].feature`
	Feature(feature::FeatureArgs),
	/// `[i:j].feature`
	RangeFeature(range::RangeFeatureArgs),
	/// `[i:j]`
	Range(range::RangeArgs),
	/// `filter.feature=value`
	Filter(filter::FilterArgs),
	Unknown(String),
}

/// What a command evaluates to.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
	Columns(Vec<String>),
	Count(usize),
	Scalar(CellValue),
	Values(Vec<CellValue>),
	Row(Row),
	Table(Vec<Row>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecognizerKind {
	Headers,
	Head,
	Tail,
	Count,
	BareIndex,
	BracketIndex,
	Feature,
	RangeFeature,
	Range,
	Filter,
}

struct Recognizer {
	kind: RecognizerKind,
	pattern: Regex,
}

/// Tested top to bottom, first match wins. Patterns are anchored to the whole line.
const RECOGNIZERS: &[(RecognizerKind, &str)] = &[
	(RecognizerKind::Headers, r"^show$"),
	(RecognizerKind::Head, r"^head$"),
	(RecognizerKind::Tail, r"^tail$"),
	(RecognizerKind::Count, r"^len$"),
	(RecognizerKind::BareIndex, r"^([0-9]+)$"),
	(RecognizerKind::BracketIndex, r"^\[([0-9]+)\]$"),
	(RecognizerKind::Feature, r"^\[([0-9]+)\]\.(\w+)$"),
	(RecognizerKind::RangeFeature, r"^\[([0-9]+):([0-9]+)\]\.(\w+)$"),
	(RecognizerKind::Range, r"^\[([0-9]+):([0-9]+)\]$"),
	(RecognizerKind::Filter, r"^filter\.(\w+)=(.+)$"),
];

/// Classifies input lines and evaluates them against one dataset.
pub struct Interpreter<'a> {
	dataset: &'a Dataset,
	recognizers: Vec<Recognizer>,
}

impl<'a> Interpreter<'a> {
	pub fn new(dataset: &'a Dataset) -> TabshResult<Self> {
		let recognizers = RECOGNIZERS.iter()
			.map(|(kind, pattern)| -> TabshResult<Recognizer> {
				Ok(Recognizer { kind: *kind, pattern: Regex::new(pattern)? })
			})
			.collect::<TabshResult<Vec<_>>>()?;

		Ok(Self { dataset, recognizers })
	}

	pub fn parse(&self, input: &str) -> TabshResult<Command> {
		let input = input.trim();

		for recognizer in &self.recognizers {
			if let Some(caps) = recognizer.pattern.captures(input) {
				return build_command(recognizer.kind, &caps);
			}
		}

		Ok(Command::Unknown(input.to_string()))
	}

	/// `Ok(None)` means the command was not recognised.
	pub async fn execute(&self, command: &Command) -> TabshResult<Option<QueryOutput>> {
		let output = match command {
			Command::Headers => headers::execute(self.dataset),
			Command::Head => head::execute(self.dataset).await?,
			Command::Tail => tail::execute(self.dataset).await?,
			Command::Count => count::execute(self.dataset),
			Command::Row(args) => row::execute(self.dataset, args).await?,
			Command::Feature(args) => feature::execute(self.dataset, args).await?,
			Command::RangeFeature(args) => range::execute_feature(self.dataset, args).await?,
			Command::Range(args) => range::execute(self.dataset, args).await?,
			Command::Filter(args) => filter::execute(self.dataset, args).await?,
			Command::Unknown(_) => return Ok(None),
		};

		Ok(Some(output))
	}

	pub async fn run(&self, input: &str) -> TabshResult<Option<QueryOutput>> {
		let command = self.parse(input)?;
		tracing::debug!(?command, "parsed command");
		self.execute(&command).await
	}
}

fn build_command(kind: RecognizerKind, caps: &Captures<'_>) -> TabshResult<Command> {
	Ok(match kind {
		RecognizerKind::Headers => Command::Headers,
		RecognizerKind::Head => Command::Head,
		RecognizerKind::Tail => Command::Tail,
		RecognizerKind::Count => Command::Count,
		RecognizerKind::BareIndex | RecognizerKind::BracketIndex => Command::Row(row::RowArgs {
			index: capture_number(caps, 1)?,
		}),
		RecognizerKind::Feature => Command::Feature(feature::FeatureArgs {
			index: capture_number(caps, 1)?,
			feature: capture_text(caps, 2),
		}),
		RecognizerKind::RangeFeature => Command::RangeFeature(range::RangeFeatureArgs {
			range: range::RangeArgs {
				start: capture_number(caps, 1)?,
				end: capture_number(caps, 2)?,
			},
			feature: capture_text(caps, 3),
		}),
		RecognizerKind::Range => Command::Range(range::RangeArgs {
			start: capture_number(caps, 1)?,
			end: capture_number(caps, 2)?,
		}),
		RecognizerKind::Filter => Command::Filter(filter::FilterArgs {
			feature: capture_text(caps, 1),
			value: capture_text(caps, 2),
		}),
	})
}

fn capture_text(caps: &Captures<'_>, group: usize) -> String {
	caps.get(group).map(|m| m.as_str().to_string()).unwrap_or_default()
}

fn capture_number<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> TabshResult<T> {
	let text = capture_text(caps, group);
	text.parse::<T>()
		.map_err(|_| TabshError::InvalidArgument(format!("Index out of supported range: {}", text)))
}
