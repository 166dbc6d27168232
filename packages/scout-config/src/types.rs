use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub assist: Assist,
	pub search: Search,
	pub storage: Storage,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

/// The external intelligence service resolving queries into a reply plus
/// candidate cards.
#[derive(Debug, Deserialize)]
pub struct Assist {
	pub api_base: String,
	pub path: String,
	pub site_slug: String,
	pub temperature: f32,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	pub page_size: u32,
	#[serde(default = "default_sort")]
	pub default_sort: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub preferences_path: PathBuf,
	#[serde(default = "default_debounce_ms")]
	pub debounce_ms: u64,
}

fn default_sort() -> String {
	"relevance".to_string()
}

fn default_debounce_ms() -> u64 {
	250
}
