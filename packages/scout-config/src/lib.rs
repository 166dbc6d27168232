mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Assist, Config, Search, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.assist.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "assist.api_base must be non-empty.".to_string() });
	}
	if !cfg.assist.path.starts_with('/') {
		return Err(Error::Validation {
			message: "assist.path must start with a slash.".to_string(),
		});
	}
	if cfg.assist.site_slug.trim().is_empty() {
		return Err(Error::Validation {
			message: "assist.site_slug must be non-empty.".to_string(),
		});
	}
	if !cfg.assist.temperature.is_finite() {
		return Err(Error::Validation {
			message: "assist.temperature must be a finite number.".to_string(),
		});
	}
	if !(0.0..=2.0).contains(&cfg.assist.temperature) {
		return Err(Error::Validation {
			message: "assist.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}
	if cfg.assist.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "assist.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.page_size == 0 {
		return Err(Error::Validation {
			message: "search.page_size must be greater than zero.".to_string(),
		});
	}
	if !matches!(cfg.search.default_sort.as_str(), "relevance" | "rating" | "distance") {
		return Err(Error::Validation {
			message: "search.default_sort must be one of relevance, rating, or distance."
				.to_string(),
		});
	}
	if cfg.storage.preferences_path.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "storage.preferences_path must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.assist.api_base.ends_with('/') {
		cfg.assist.api_base.pop();
	}
}
