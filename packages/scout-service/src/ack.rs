use serde::Deserialize;
use serde_json::Value;

/// Structured fields the assist service extracts from free text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Intent {
	#[serde(default)]
	pub service: Option<String>,
	#[serde(default)]
	pub location: Option<String>,
}
impl Intent {
	/// Lenient decode: unknown fields are ignored and a malformed value
	/// collapses to an empty intent rather than an error.
	pub fn from_value(value: &Value) -> Self {
		serde_json::from_value(value.clone()).unwrap_or_default()
	}
}

/// Short confirmation line derived from the extracted intent.
///
/// The location clause falls back to the session's location preference;
/// either clause is omitted when its value is absent, and no intent at
/// all yields the empty string.
pub fn acknowledge(intent: Option<&Intent>, fallback_location: Option<&str>) -> String {
	let Some(intent) = intent else {
		return String::new();
	};
	let service = intent.service.as_deref().map(str::trim).filter(|value| !value.is_empty());
	let location = intent
		.location
		.as_deref()
		.or(fallback_location)
		.map(str::trim)
		.filter(|value| !value.is_empty());

	match (service, location) {
		(Some(service), Some(location)) => {
			format!("Understood: service {service}, location {location}.")
		},
		(Some(service), None) => format!("Understood: service {service}."),
		(None, Some(location)) => format!("Understood: location {location}."),
		(None, None) => String::new(),
	}
}
