use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::warn;

use scout_domain::{ConversationTurn, Coordinate, LocationPreference};

use crate::{Error, PreferenceStore, Result};

/// Owns the conversation history and the location preference.
///
/// History is append-only: a user/assistant turn pair is added atomically
/// once an exchange succeeds, so a failed exchange never leaves a user
/// turn without a reply. Location changes are persisted on a debounce so
/// rapid edits produce a single write of the settled value.
pub struct SessionManager {
	history: Vec<ConversationTurn>,
	location: LocationPreference,
	store: Arc<dyn PreferenceStore>,
	debounce: Duration,
	pending_save: Option<JoinHandle<()>>,
	hydrated: bool,
}
impl SessionManager {
	pub fn new(store: Arc<dyn PreferenceStore>, debounce: Duration) -> Self {
		Self {
			history: Vec::new(),
			location: LocationPreference::default(),
			store,
			debounce,
			pending_save: None,
			hydrated: false,
		}
	}

	/// Load the persisted preference once at session start. Runs before
	/// the first query; a preference already set in memory wins.
	pub async fn hydrate(&mut self) -> Result<()> {
		if self.hydrated {
			return Ok(());
		}

		self.hydrated = true;

		if !self.location.is_empty() {
			return Ok(());
		}

		match self.store.load().await {
			Ok(Some(preference)) => self.location = preference,
			Ok(None) => {},
			Err(err) => return Err(Error::Storage { message: err.to_string() }),
		}

		Ok(())
	}

	pub fn history(&self) -> &[ConversationTurn] {
		&self.history
	}

	pub fn location(&self) -> &LocationPreference {
		&self.location
	}

	/// The reference coordinate for enrichment, when a finite one is
	/// resolved.
	pub fn reference(&self) -> Option<Coordinate> {
		self.location.coords.filter(Coordinate::is_finite)
	}

	/// Append a completed exchange as one user/assistant pair.
	pub fn record_exchange(
		&mut self,
		user: impl Into<String>,
		assistant: impl Into<String>,
	) {
		self.history.push(ConversationTurn::user(user));
		self.history.push(ConversationTurn::assistant(assistant));
	}

	pub fn set_location(&mut self, label: impl Into<String>, coords: Option<Coordinate>) {
		self.location = LocationPreference { label: label.into(), coords };
		self.schedule_save();
	}

	/// Restart the debounce timer; only the settled value is written.
	fn schedule_save(&mut self) {
		if let Some(handle) = self.pending_save.take() {
			handle.abort();
		}

		let store = self.store.clone();
		let preference = self.location.clone();
		let debounce = self.debounce;

		self.pending_save = Some(tokio::spawn(async move {
			tokio::time::sleep(debounce).await;

			if let Err(err) = store.save(&preference).await {
				warn!(error = %err, "Failed to persist location preference.");
			}
		}));
	}

	/// Cancel any pending timer and persist the current value now. Used
	/// at session teardown.
	pub async fn flush(&mut self) {
		let Some(handle) = self.pending_save.take() else {
			return;
		};

		handle.abort();

		if let Err(err) = self.store.save(&self.location).await {
			warn!(error = %err, "Failed to persist location preference.");
		}
	}
}
impl Drop for SessionManager {
	fn drop(&mut self) {
		if let Some(handle) = self.pending_save.take() {
			handle.abort();
		}
	}
}
