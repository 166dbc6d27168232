//! Test doubles for the scout pipeline: a scripted assist provider and an
//! in-memory preference store, plus response builders.

use std::{
	collections::VecDeque,
	sync::{
		Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};

use color_eyre::eyre;

use scout_domain::LocationPreference;
use scout_providers::{AssistRequest, AssistResponse, RawCard, ResponseMeta};
use scout_service::{AssistProvider, BoxFuture, PreferenceStore};

enum Step {
	Respond(AssistResponse),
	Fail(String),
}

/// Assist provider that replays a queued script and records every request
/// it receives.
#[derive(Default)]
pub struct ScriptedAssist {
	script: Mutex<VecDeque<Step>>,
	requests: Mutex<Vec<AssistRequest>>,
}
impl ScriptedAssist {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_response(&self, response: AssistResponse) {
		lock(&self.script).push_back(Step::Respond(response));
	}

	pub fn push_failure(&self, message: &str) {
		lock(&self.script).push_back(Step::Fail(message.to_string()));
	}

	pub fn request_count(&self) -> usize {
		lock(&self.requests).len()
	}

	pub fn last_request(&self) -> Option<AssistRequest> {
		lock(&self.requests).last().cloned()
	}
}
impl AssistProvider for ScriptedAssist {
	fn ask<'a>(
		&'a self,
		_cfg: &'a scout_config::Assist,
		request: &'a AssistRequest,
	) -> BoxFuture<'a, color_eyre::Result<AssistResponse>> {
		lock(&self.requests).push(request.clone());

		let step = lock(&self.script).pop_front();

		Box::pin(async move {
			match step {
				Some(Step::Respond(response)) => Ok(response),
				Some(Step::Fail(message)) => Err(eyre::eyre!(message)),
				None => Err(eyre::eyre!("Scripted assist has no response queued.")),
			}
		})
	}
}

/// Preference store backed by memory, counting saves so debounce
/// behavior can be asserted.
#[derive(Default)]
pub struct MemoryPreferenceStore {
	value: Mutex<Option<LocationPreference>>,
	saves: AtomicUsize,
}
impl MemoryPreferenceStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_value(preference: LocationPreference) -> Self {
		Self { value: Mutex::new(Some(preference)), saves: AtomicUsize::new(0) }
	}

	pub fn save_count(&self) -> usize {
		self.saves.load(Ordering::SeqCst)
	}

	pub fn value(&self) -> Option<LocationPreference> {
		lock(&self.value).clone()
	}
}
impl PreferenceStore for MemoryPreferenceStore {
	fn load<'a>(&'a self) -> BoxFuture<'a, color_eyre::Result<Option<LocationPreference>>> {
		let value = self.value();

		Box::pin(async move { Ok(value) })
	}

	fn save<'a>(
		&'a self,
		preference: &'a LocationPreference,
	) -> BoxFuture<'a, color_eyre::Result<()>> {
		*lock(&self.value) = Some(preference.clone());

		self.saves.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move { Ok(()) })
	}
}

pub fn raw_card(title: &str) -> RawCard {
	RawCard {
		id: None,
		title: title.to_string(),
		subtitle: None,
		description: None,
		location: None,
		verified: None,
		rating: None,
		tags: Vec::new(),
		coords: None,
	}
}

pub fn ok_response(answer: &str, cards: Vec<RawCard>, has_more: bool) -> AssistResponse {
	AssistResponse {
		ok: Some(true),
		answer: Some(answer.to_string()),
		cards: Some(cards),
		meta: Some(ResponseMeta { has_more: Some(has_more) }),
		..AssistResponse::default()
	}
}

pub fn error_response(message: &str) -> AssistResponse {
	AssistResponse {
		ok: Some(false),
		error: Some(message.to_string()),
		..AssistResponse::default()
	}
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|err| err.into_inner())
}
