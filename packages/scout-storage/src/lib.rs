mod error;

pub use error::{Error, Result};

use std::{
	io::ErrorKind,
	path::{Path, PathBuf},
};

use scout_domain::LocationPreference;

/// Durable client-side storage for the location preference: one JSON file,
/// read once at session start and rewritten on every settled change.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
	path: PathBuf,
}
impl FilePreferenceStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// A missing file is an empty store, not an error.
	pub async fn load(&self) -> Result<Option<LocationPreference>> {
		let raw = match tokio::fs::read_to_string(&self.path).await {
			Ok(raw) => raw,
			Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
			Err(err) => return Err(err.into()),
		};

		Ok(Some(serde_json::from_str(&raw)?))
	}

	pub async fn save(&self, preference: &LocationPreference) -> Result<()> {
		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			tokio::fs::create_dir_all(parent).await?;
		}

		let raw = serde_json::to_string_pretty(preference)?;

		tokio::fs::write(&self.path, raw).await?;

		Ok(())
	}
}
