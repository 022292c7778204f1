use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// id, name, city, score. Row 4 has no name and row 2 has no score.
pub const PEOPLE: &[(i64, Option<&str>, &str, Option<f64>)] = &[
	(0, Some("Alice"), "Paris", Some(1.5)),
	(1, Some("Bob"), "Berlin", Some(2.5)),
	(2, Some("Carol"), "Paris", None),
	(3, Some("Dave"), "Rome", Some(4.25)),
	(4, None, "Berlin", Some(5.5)),
	(5, Some("Frank"), "Paris", Some(6.5)),
	(6, Some("Grace"), "Rome", Some(7.5)),
	(7, Some("Heidi"), "Berlin", Some(8.5)),
	(8, Some("Ivan"), "Paris", Some(9.5)),
	(9, Some("Judy"), "Rome", Some(10.5)),
];

pub const COLUMNS: [&str; 4] = ["id", "name", "city", "score"];

pub struct TestFixtures {
	pub dir: TempDir,
	pub csv: PathBuf,
	pub json: PathBuf,
	pub jsonl: PathBuf,
	pub xlsx: PathBuf,
	pub txt: PathBuf,
}

impl TestFixtures {
	pub fn new() -> Self {
		let dir = tempdir().unwrap();
		let csv = dir.path().join("people.csv");
		let json = dir.path().join("people.json");
		let jsonl = dir.path().join("people.jsonl");
		let xlsx = dir.path().join("people.xlsx");
		let txt = dir.path().join("people.txt");

		create_people_csv(&csv).unwrap();
		create_people_json(&json).unwrap();
		create_people_jsonl(&jsonl).unwrap();
		create_people_excel(&xlsx).unwrap();
		fs::write(&txt, "id,name\n0,Alice\n").unwrap();

		Self { dir, csv, json, jsonl, xlsx, txt }
	}

	pub fn log_dir(&self) -> PathBuf {
		self.dir.path().join("logs")
	}
}

fn json_record(id: i64, name: Option<&str>, city: &str, score: Option<f64>) -> serde_json::Value {
	serde_json::json!({ "id": id, "name": name, "city": city, "score": score })
}

pub fn create_people_csv(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let mut content = COLUMNS.join(",");
	content.push('\n');
	for (id, name, city, score) in PEOPLE {
		let score = score.map(|s| s.to_string()).unwrap_or_default();
		content.push_str(&format!("{},{},{},{}\n", id, name.unwrap_or(""), city, score));
	}
	fs::write(path, content)?;
	Ok(())
}

pub fn create_people_json(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let records: Vec<serde_json::Value> = PEOPLE.iter()
		.map(|(id, name, city, score)| json_record(*id, *name, city, *score))
		.collect();
	fs::write(path, serde_json::to_string_pretty(&records)?)?;
	Ok(())
}

pub fn create_people_jsonl(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let lines: Vec<String> = PEOPLE.iter()
		.map(|(id, name, city, score)| json_record(*id, *name, city, *score).to_string())
		.collect();
	fs::write(path, lines.join("\n") + "\n")?;
	Ok(())
}

pub fn create_people_excel(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let mut workbook = Workbook::new();
	let worksheet = workbook.add_worksheet();

	for (col, header) in COLUMNS.iter().enumerate() {
		worksheet.write_string(0, col as u16, *header)?;
	}

	for (i, (id, name, city, score)) in PEOPLE.iter().enumerate() {
		let row = i as u32 + 1;
		worksheet.write_number(row, 0, *id as f64)?;
		if let Some(name) = name {
			worksheet.write_string(row, 1, *name)?;
		}
		worksheet.write_string(row, 2, *city)?;
		if let Some(score) = score {
			worksheet.write_number(row, 3, *score)?;
		}
	}

	workbook.save(path)?;
	Ok(())
}
