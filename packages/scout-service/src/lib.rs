pub mod ack;
pub mod pager;
pub mod session;

mod error;

pub use ack::{Intent, acknowledge};
pub use error::{Error, Result};
pub use pager::{Applied, Pager, Phase, QueryTicket};
pub use session::SessionManager;

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use scout_config::Config;
use scout_domain::{ConversationTurn, Coordinate, LocationPreference, ResultCard, SortMode};
use scout_providers::{AssistRequest, AssistResponse, RawCard, RequestMeta};
use scout_storage::FilePreferenceStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Shown when a request fails without a service-provided reason.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

pub trait AssistProvider
where
	Self: Send + Sync,
{
	fn ask<'a>(
		&'a self,
		cfg: &'a scout_config::Assist,
		request: &'a AssistRequest,
	) -> BoxFuture<'a, color_eyre::Result<AssistResponse>>;
}

pub trait PreferenceStore
where
	Self: Send + Sync,
{
	fn load<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Option<LocationPreference>>>;

	fn save<'a>(
		&'a self,
		preference: &'a LocationPreference,
	) -> BoxFuture<'a, color_eyre::Result<()>>;
}

struct DefaultAssist;
impl AssistProvider for DefaultAssist {
	fn ask<'a>(
		&'a self,
		cfg: &'a scout_config::Assist,
		request: &'a AssistRequest,
	) -> BoxFuture<'a, color_eyre::Result<AssistResponse>> {
		Box::pin(async move { Ok(scout_providers::ask(cfg, request).await?) })
	}
}

impl PreferenceStore for FilePreferenceStore {
	fn load<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Option<LocationPreference>>> {
		Box::pin(async move { Ok(FilePreferenceStore::load(self).await?) })
	}

	fn save<'a>(
		&'a self,
		preference: &'a LocationPreference,
	) -> BoxFuture<'a, color_eyre::Result<()>> {
		Box::pin(async move { Ok(FilePreferenceStore::save(self, preference).await?) })
	}
}

/// Outcome of a new top-level query.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
	Replied { answer: String, acknowledgment: String },
	Failed { message: String },
	/// The response arrived for a request that is no longer current.
	Superseded,
}

/// Outcome of a "load more" request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
	Appended { added: usize },
	Failed { message: String },
	/// No further page can be requested right now: nothing fetched yet,
	/// a request is outstanding, or upstream reported no more pages.
	Unavailable,
	Superseded,
}

/// The conversational discovery pipeline: session state, query lifecycle
/// and the ranked, merged card collection.
pub struct ScoutService {
	pub cfg: Config,
	session: SessionManager,
	pager: Pager,
	provider: Arc<dyn AssistProvider>,
}
impl ScoutService {
	pub fn new(cfg: Config, store: Arc<dyn PreferenceStore>) -> Self {
		Self::with_provider(cfg, store, Arc::new(DefaultAssist))
	}

	pub fn with_provider(
		cfg: Config,
		store: Arc<dyn PreferenceStore>,
		provider: Arc<dyn AssistProvider>,
	) -> Self {
		let pager = Pager::new(cfg.search.page_size, resolve_default_sort(&cfg));
		let session = SessionManager::new(store, Duration::from_millis(cfg.storage.debounce_ms));

		Self { cfg, session, pager, provider }
	}

	/// Load the persisted location preference. Call once, before the
	/// first query.
	pub async fn hydrate(&mut self) -> Result<()> {
		self.session.hydrate().await
	}

	/// Issue a new top-level query: resets pagination, sends the text
	/// with the full history and location context, and replaces the card
	/// collection with the enriched, sorted result.
	pub async fn send(&mut self, text: &str) -> Result<SendOutcome> {
		let text = text.trim();

		if text.is_empty() {
			return Err(Error::EmptyQuery);
		}

		let history = self.session.history().to_vec();
		let ticket = self.pager.begin_query(text.to_string(), history.clone());
		let request = self.build_request(text, history, ticket.page());

		tracing::info!(page = ticket.page(), "Sending query.");

		let result = self.provider.ask(&self.cfg.assist, &request).await;

		match result {
			Ok(response) if response.ok != Some(false) => {
				let answer = response.answer.clone().unwrap_or_default();
				let cards = collect_cards(response.cards);
				let has_more =
					response.meta.as_ref().and_then(|meta| meta.has_more).unwrap_or(false);

				match self.pager.apply_success(&ticket, cards, has_more, self.session.reference())
				{
					Applied::Applied => {
						self.session.record_exchange(text, answer.clone());

						let intent = response.intent.as_ref().map(Intent::from_value);
						let acknowledgment =
							acknowledge(intent.as_ref(), self.fallback_location());

						Ok(SendOutcome::Replied { answer, acknowledgment })
					},
					Applied::Stale => Ok(SendOutcome::Superseded),
				}
			},
			Ok(response) => {
				let message = failure_message(response.error);

				match self.pager.apply_failure(&ticket, message.clone()) {
					Applied::Applied => Ok(SendOutcome::Failed { message }),
					Applied::Stale => Ok(SendOutcome::Superseded),
				}
			},
			Err(err) => {
				tracing::warn!(error = %err, "Assist request failed.");

				let message = GENERIC_FAILURE.to_string();

				match self.pager.apply_failure(&ticket, message.clone()) {
					Applied::Applied => Ok(SendOutcome::Failed { message }),
					Applied::Stale => Ok(SendOutcome::Superseded),
				}
			},
		}
	}

	/// Fetch the next page for the current query and merge it into the
	/// accumulated collection.
	pub async fn load_more(&mut self) -> Result<LoadOutcome> {
		let Some(ticket) = self.pager.begin_load_more() else {
			return Ok(LoadOutcome::Unavailable);
		};
		let (text, history) = match self.pager.context() {
			Some((text, history)) => (text.to_string(), history.to_vec()),
			None => return Ok(LoadOutcome::Unavailable),
		};
		let before = self.pager.cards().len();
		let request = self.build_request(&text, history, ticket.page());

		tracing::info!(page = ticket.page(), "Loading more results.");

		let result = self.provider.ask(&self.cfg.assist, &request).await;

		match result {
			Ok(response) if response.ok != Some(false) => {
				let cards = collect_cards(response.cards);
				let has_more =
					response.meta.as_ref().and_then(|meta| meta.has_more).unwrap_or(false);

				match self.pager.apply_success(&ticket, cards, has_more, self.session.reference())
				{
					Applied::Applied => {
						Ok(LoadOutcome::Appended { added: self.pager.cards().len() - before })
					},
					Applied::Stale => Ok(LoadOutcome::Superseded),
				}
			},
			Ok(response) => {
				let message = failure_message(response.error);

				match self.pager.apply_failure(&ticket, message.clone()) {
					Applied::Applied => Ok(LoadOutcome::Failed { message }),
					Applied::Stale => Ok(LoadOutcome::Superseded),
				}
			},
			Err(err) => {
				tracing::warn!(error = %err, "Load more request failed.");

				let message = GENERIC_FAILURE.to_string();

				match self.pager.apply_failure(&ticket, message.clone()) {
					Applied::Applied => Ok(LoadOutcome::Failed { message }),
					Applied::Stale => Ok(LoadOutcome::Superseded),
				}
			},
		}
	}

	/// Re-order the existing collection; no re-enrichment, no network.
	pub fn set_sort(&mut self, mode: SortMode) {
		self.pager.resort(mode);
	}

	/// Update the location preference and recompute derived distances
	/// across the accumulated collection; no network.
	pub fn set_location(&mut self, label: &str, coords: Option<Coordinate>) {
		self.session.set_location(label, coords);
		self.pager.re_enrich(self.session.reference());
	}

	/// Persist any unsettled preference change. Call at teardown.
	pub async fn flush(&mut self) {
		self.session.flush().await;
	}

	pub fn cards(&self) -> &[ResultCard] {
		self.pager.cards()
	}

	pub fn has_more(&self) -> bool {
		self.pager.has_more()
	}

	pub fn phase(&self) -> Phase {
		self.pager.phase()
	}

	pub fn failure(&self) -> Option<&str> {
		self.pager.failure()
	}

	pub fn sort_mode(&self) -> SortMode {
		self.pager.sort_mode()
	}

	pub fn history(&self) -> &[ConversationTurn] {
		self.session.history()
	}

	pub fn location(&self) -> &LocationPreference {
		self.session.location()
	}

	fn fallback_location(&self) -> Option<&str> {
		let label = self.session.location().label.trim();

		if label.is_empty() { None } else { Some(label) }
	}

	fn build_request(
		&self,
		message: &str,
		history: Vec<ConversationTurn>,
		page: u32,
	) -> AssistRequest {
		AssistRequest {
			message: message.to_string(),
			history,
			temperature: self.cfg.assist.temperature,
			meta: RequestMeta {
				page,
				limit: self.cfg.search.page_size,
				user_location: self.session.location().label.clone(),
				coords: self.session.reference(),
				filters: Vec::new(),
			},
			site_slug: self.cfg.assist.site_slug.clone(),
		}
	}
}

fn resolve_default_sort(cfg: &Config) -> SortMode {
	cfg.search.default_sort.parse().unwrap_or(SortMode::Relevance)
}

fn collect_cards(cards: Option<Vec<RawCard>>) -> Vec<ResultCard> {
	cards.unwrap_or_default().into_iter().map(RawCard::into_card).collect()
}

fn failure_message(error: Option<String>) -> String {
	error.filter(|message| !message.trim().is_empty()).unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
