use std::sync::Arc;

use scout_domain::SortMode;
use scout_service::LoadOutcome;
use scout_testkit::{MemoryPreferenceStore, ScriptedAssist, ok_response, raw_card};

use super::build_service;

#[tokio::test]
async fn load_more_without_a_prior_query_is_a_no_op() {
	let provider = Arc::new(ScriptedAssist::new());
	let mut service = build_service(provider.clone(), Arc::new(MemoryPreferenceStore::new()));

	let outcome = service.load_more().await.expect("Load more failed.");

	assert_eq!(outcome, LoadOutcome::Unavailable);
	assert_eq!(provider.request_count(), 0);
	assert!(service.cards().is_empty());
}

#[tokio::test]
async fn load_more_is_refused_once_upstream_is_exhausted() {
	let provider = Arc::new(ScriptedAssist::new());
	provider.push_response(ok_response("Reply.", vec![raw_card("only")], false));
	let mut service = build_service(provider.clone(), Arc::new(MemoryPreferenceStore::new()));

	service.send("plumber").await.expect("Send failed.");

	assert_eq!(service.load_more().await.expect("Load more failed."), LoadOutcome::Unavailable);
	assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn merged_pages_form_one_consistent_order() {
	let ratings_page_one = [4.0, 2.0, 5.0, 1.0, 3.0, 4.5, 2.5, 3.5, 1.5];
	let ratings_page_two = [4.8, 0.5, 3.2, 5.0, 2.2];
	let provider = Arc::new(ScriptedAssist::new());
	provider.push_response(ok_response(
		"First page.",
		ratings_page_one
			.iter()
			.enumerate()
			.map(|(idx, rating)| {
				let mut card = raw_card(&format!("one-{idx}"));
				card.rating = Some(*rating);
				card
			})
			.collect(),
		true,
	));
	provider.push_response(ok_response(
		"Second page.",
		ratings_page_two
			.iter()
			.enumerate()
			.map(|(idx, rating)| {
				let mut card = raw_card(&format!("two-{idx}"));
				card.rating = Some(*rating);
				card
			})
			.collect(),
		true,
	));
	let mut service = build_service(provider.clone(), Arc::new(MemoryPreferenceStore::new()));

	service.send("hairdresser").await.expect("Send failed.");
	service.set_sort(SortMode::Rating);

	let outcome = service.load_more().await.expect("Load more failed.");

	assert_eq!(outcome, LoadOutcome::Appended { added: 5 });
	assert_eq!(service.cards().len(), 14);
	assert!(service.has_more());

	// One global order, not two independently sorted blocks.
	let ratings: Vec<f32> =
		service.cards().iter().map(|card| card.rating.expect("rating missing")).collect();

	assert!(ratings.windows(2).all(|pair| pair[0] >= pair[1]), "not sorted: {ratings:?}");
	assert_eq!(ratings[0], 5.0);
	assert_eq!(ratings[1], 5.0);
}

#[tokio::test]
async fn load_more_reuses_the_query_text_and_history_snapshot() {
	let provider = Arc::new(ScriptedAssist::new());
	provider.push_response(ok_response("Reply.", vec![raw_card("a")], true));
	provider.push_response(ok_response("More.", vec![raw_card("b")], false));
	let mut service = build_service(provider.clone(), Arc::new(MemoryPreferenceStore::new()));

	service.send("hairdresser").await.expect("Send failed.");
	service.load_more().await.expect("Load more failed.");

	let request = provider.last_request().expect("No request recorded.");

	assert_eq!(request.message, "hairdresser");
	assert_eq!(request.meta.page, 1);
	// The snapshot from the original query, not the post-exchange history.
	assert!(request.history.is_empty());
	// The exchange itself is recorded only once.
	assert_eq!(service.history().len(), 2);
}
