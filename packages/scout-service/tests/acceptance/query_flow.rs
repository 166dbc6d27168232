use std::sync::Arc;

use scout_domain::Role;
use scout_service::{Error, SendOutcome};
use scout_testkit::{MemoryPreferenceStore, ScriptedAssist, ok_response, raw_card};

use super::build_service;

#[tokio::test]
async fn first_query_replaces_collection_and_appends_history() {
	let provider = Arc::new(ScriptedAssist::new());
	provider.push_response(ok_response(
		"Here are two salons.",
		vec![raw_card("Salon A"), raw_card("Salon B")],
		false,
	));
	let mut service = build_service(provider.clone(), Arc::new(MemoryPreferenceStore::new()));

	let outcome = service.send("hairdresser").await.expect("Send failed.");

	assert_eq!(
		outcome,
		SendOutcome::Replied {
			answer: "Here are two salons.".to_string(),
			acknowledgment: String::new(),
		}
	);
	assert_eq!(service.cards().len(), 2);
	assert!(!service.has_more());

	let history = service.history();

	assert_eq!(history.len(), 2);
	assert_eq!(history[0].role, Role::User);
	assert_eq!(history[0].content, "hairdresser");
	assert_eq!(history[1].role, Role::Assistant);

	let request = provider.last_request().expect("No request recorded.");

	assert_eq!(request.message, "hairdresser");
	assert!(request.history.is_empty());
	assert_eq!(request.meta.page, 0);
	assert_eq!(request.meta.limit, 9);
	assert!(request.meta.filters.is_empty());
	assert_eq!(request.site_slug, "test");
}

#[tokio::test]
async fn second_query_sends_the_full_history() {
	let provider = Arc::new(ScriptedAssist::new());
	provider.push_response(ok_response("First reply.", Vec::new(), false));
	provider.push_response(ok_response("Second reply.", Vec::new(), false));
	let mut service = build_service(provider.clone(), Arc::new(MemoryPreferenceStore::new()));

	service.send("hairdresser").await.expect("Send failed.");
	service.send("open on sundays?").await.expect("Send failed.");

	let request = provider.last_request().expect("No request recorded.");

	assert_eq!(request.history.len(), 2);
	assert_eq!(request.history[0].content, "hairdresser");
	assert_eq!(request.history[1].content, "First reply.");
	assert_eq!(service.history().len(), 4);
}

#[tokio::test]
async fn acknowledgment_is_derived_from_intent() {
	let provider = Arc::new(ScriptedAssist::new());
	let mut response = ok_response("On it.", Vec::new(), false);
	response.intent =
		Some(serde_json::json!({ "service": "hairdresser", "location": "Malmö" }));
	provider.push_response(response);
	let mut service = build_service(provider, Arc::new(MemoryPreferenceStore::new()));

	let outcome = service.send("hairdresser in malmö").await.expect("Send failed.");

	let SendOutcome::Replied { acknowledgment, .. } = outcome else {
		panic!("Expected a reply.");
	};

	assert_eq!(acknowledgment, "Understood: service hairdresser, location Malmö.");
}

#[tokio::test]
async fn blank_query_is_rejected_without_a_request() {
	let provider = Arc::new(ScriptedAssist::new());
	let mut service = build_service(provider.clone(), Arc::new(MemoryPreferenceStore::new()));

	assert!(matches!(service.send("   ").await, Err(Error::EmptyQuery)));
	assert_eq!(provider.request_count(), 0);
}
