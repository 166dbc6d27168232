use scout_domain::{ConversationTurn, Coordinate, ResultCard, SortMode, enrich, sort_cards};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	Idle,
	Fetching,
	Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TicketKind {
	NewQuery,
	LoadMore,
}

/// Identity of one outstanding request.
///
/// A ticket snapshots the pager generation at issue time; applying a
/// response whose ticket generation no longer matches is a stale write
/// and is discarded without touching state.
#[derive(Debug, Clone)]
pub struct QueryTicket {
	generation: u64,
	page: u32,
	kind: TicketKind,
}
impl QueryTicket {
	pub fn page(&self) -> u32 {
		self.page
	}
}

/// Whether an apply call mutated state or hit a superseded ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
	Applied,
	Stale,
}

#[derive(Debug, Clone)]
struct QueryContext {
	text: String,
	history: Vec<ConversationTurn>,
}

/// Pagination/merge controller: owns the query lifecycle and the single
/// accumulated card collection, merging successive pages into one
/// consistently ordered whole.
#[derive(Debug)]
pub struct Pager {
	phase: Phase,
	generation: u64,
	page: u32,
	page_size: u32,
	sort_mode: SortMode,
	cards: Vec<ResultCard>,
	has_more: bool,
	failure: Option<String>,
	query: Option<QueryContext>,
}
impl Pager {
	pub fn new(page_size: u32, sort_mode: SortMode) -> Self {
		Self {
			phase: Phase::Idle,
			generation: 0,
			page: 0,
			page_size,
			sort_mode,
			cards: Vec::new(),
			has_more: false,
			failure: None,
			query: None,
		}
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn page(&self) -> u32 {
		self.page
	}

	pub fn page_size(&self) -> u32 {
		self.page_size
	}

	pub fn sort_mode(&self) -> SortMode {
		self.sort_mode
	}

	pub fn cards(&self) -> &[ResultCard] {
		&self.cards
	}

	pub fn has_more(&self) -> bool {
		self.has_more
	}

	pub fn failure(&self) -> Option<&str> {
		self.failure.as_deref()
	}

	/// Text and history snapshot of the query the pager is serving.
	pub fn context(&self) -> Option<(&str, &[ConversationTurn])> {
		self.query.as_ref().map(|query| (query.text.as_str(), query.history.as_slice()))
	}

	/// Start a new top-level query: page back to 0, collection cleared,
	/// generation bumped so any in-flight response becomes stale
	/// (last-write-wins).
	pub fn begin_query(&mut self, text: String, history: Vec<ConversationTurn>) -> QueryTicket {
		self.generation += 1;
		self.page = 0;
		self.cards.clear();
		self.has_more = false;
		self.failure = None;
		self.phase = Phase::Fetching;
		self.query = Some(QueryContext { text, history });

		QueryTicket { generation: self.generation, page: 0, kind: TicketKind::NewQuery }
	}

	/// Request the next page of the current query. Returns `None` (and
	/// leaves state untouched) while a request is outstanding, when no
	/// query has been issued, or when upstream reported no further pages.
	pub fn begin_load_more(&mut self) -> Option<QueryTicket> {
		if self.phase == Phase::Fetching || !self.has_more {
			return None;
		}
		if self.query.as_ref().map(|query| query.text.trim().is_empty()).unwrap_or(true) {
			return None;
		}

		self.failure = None;
		self.phase = Phase::Fetching;

		Some(QueryTicket {
			generation: self.generation,
			page: self.page + 1,
			kind: TicketKind::LoadMore,
		})
	}

	/// Apply a successful response for `ticket`. The batch is enriched
	/// against `reference`; a new-query batch replaces the collection
	/// while a load-more batch is appended and the FULL merged collection
	/// is re-sorted, keeping the order globally consistent rather than
	/// page-locally consistent.
	pub fn apply_success(
		&mut self,
		ticket: &QueryTicket,
		mut batch: Vec<ResultCard>,
		has_more: bool,
		reference: Option<Coordinate>,
	) -> Applied {
		if ticket.generation != self.generation {
			tracing::debug!(page = ticket.page, "Discarding stale response.");

			return Applied::Stale;
		}

		enrich(&mut batch, reference);

		match ticket.kind {
			TicketKind::NewQuery => {
				self.cards = sort_cards(&batch, self.sort_mode);
			},
			TicketKind::LoadMore => {
				self.cards.extend(batch);
				self.cards = sort_cards(&self.cards, self.sort_mode);
			},
		}

		self.page = ticket.page;
		self.has_more = has_more;
		self.failure = None;
		self.phase = Phase::Idle;

		Applied::Applied
	}

	/// Apply a failed response for `ticket`. A failing new query clears
	/// the collection; a failing load-more leaves the displayed cards and
	/// `has_more` intact so the user may retry.
	pub fn apply_failure(&mut self, ticket: &QueryTicket, message: impl Into<String>) -> Applied {
		if ticket.generation != self.generation {
			tracing::debug!(page = ticket.page, "Discarding stale failure.");

			return Applied::Stale;
		}

		if ticket.kind == TicketKind::NewQuery {
			self.cards.clear();
			self.has_more = false;
		}

		self.failure = Some(message.into());
		self.phase = Phase::Error;

		Applied::Applied
	}

	/// Sort-mode change: re-order the existing collection only.
	pub fn resort(&mut self, mode: SortMode) {
		self.sort_mode = mode;
		self.cards = sort_cards(&self.cards, mode);
	}

	/// Reference-location change: recompute every derived distance and
	/// re-sort, without contacting the service.
	pub fn re_enrich(&mut self, reference: Option<Coordinate>) {
		enrich(&mut self.cards, reference);
		self.cards = sort_cards(&self.cards, self.sort_mode);
	}
}
