use std::sync::Arc;

use scout_domain::{Coordinate, SortMode};
use scout_testkit::{MemoryPreferenceStore, ScriptedAssist, ok_response, raw_card};

use super::build_service;

fn located(title: &str, lat: f64, lng: f64) -> scout_providers::RawCard {
	let mut card = raw_card(title);

	card.coords = Some(Coordinate::new(lat, lng));

	card
}

#[tokio::test]
async fn unresolved_location_leaves_every_distance_unknown() {
	let provider = Arc::new(ScriptedAssist::new());
	provider.push_response(ok_response(
		"Reply.",
		vec![located("a", 55.61, 13.0), located("b", 55.59, 13.02), raw_card("c")],
		false,
	));
	let mut service = build_service(provider, Arc::new(MemoryPreferenceStore::new()));

	service.send("hairdresser in city a").await.expect("Send failed.");

	assert!(service.cards().iter().all(|card| card.distance_km.is_none()));

	// Everything ties on unknown, so switching to distance keeps the
	// upstream relative order.
	let before: Vec<String> = service.cards().iter().map(|card| card.title.clone()).collect();

	service.set_sort(SortMode::Distance);

	let after: Vec<String> = service.cards().iter().map(|card| card.title.clone()).collect();

	assert_eq!(before, after);
}

#[tokio::test]
async fn location_change_resorts_in_place_without_a_request() {
	let provider = Arc::new(ScriptedAssist::new());
	provider.push_response(ok_response(
		"Reply.",
		vec![
			located("gothenburg", 57.7089, 11.9746),
			located("lund", 55.7047, 13.191),
			raw_card("nowhere"),
		],
		false,
	));
	let mut service = build_service(provider.clone(), Arc::new(MemoryPreferenceStore::new()));

	service.send("hairdresser").await.expect("Send failed.");
	service.set_sort(SortMode::Distance);
	service.set_location("Malmö", Some(Coordinate::new(55.605, 13.0038)));

	assert_eq!(provider.request_count(), 1);
	assert_eq!(service.cards().len(), 3);

	let titles: Vec<&str> = service.cards().iter().map(|card| card.title.as_str()).collect();

	assert_eq!(titles, ["lund", "gothenburg", "nowhere"]);
	assert!(service.cards()[0].distance_km.expect("distance missing") < 50.0);
	assert!(service.cards()[2].distance_km.is_none());
}

#[tokio::test]
async fn location_context_is_sent_with_the_next_query() {
	let provider = Arc::new(ScriptedAssist::new());
	provider.push_response(ok_response("Reply.", Vec::new(), false));
	let mut service = build_service(provider.clone(), Arc::new(MemoryPreferenceStore::new()));

	service.set_location("Malmö", Some(Coordinate::new(55.605, 13.0038)));
	service.send("hairdresser").await.expect("Send failed.");

	let request = provider.last_request().expect("No request recorded.");

	assert_eq!(request.meta.user_location, "Malmö");

	let coords = request.meta.coords.expect("coords missing");

	assert_eq!(coords.lat, 55.605);
	assert_eq!(coords.lng, 13.0038);
}

#[tokio::test]
async fn non_finite_resolved_coordinate_is_not_used() {
	let provider = Arc::new(ScriptedAssist::new());
	provider.push_response(ok_response("Reply.", vec![located("a", 55.61, 13.0)], false));
	let mut service = build_service(provider.clone(), Arc::new(MemoryPreferenceStore::new()));

	service.set_location("nowhere", Some(Coordinate::new(f64::NAN, 13.0)));
	service.send("hairdresser").await.expect("Send failed.");

	let request = provider.last_request().expect("No request recorded.");

	assert!(request.meta.coords.is_none());
	assert!(service.cards()[0].distance_km.is_none());
}
