use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
	pub lat: f64,
	pub lng: f64,
}
impl Coordinate {
	pub fn new(lat: f64, lng: f64) -> Self {
		Self { lat, lng }
	}

	pub fn is_finite(&self) -> bool {
		self.lat.is_finite() && self.lng.is_finite()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
	pub role: Role,
	pub content: String,
}
impl ConversationTurn {
	pub fn user(content: impl Into<String>) -> Self {
		Self { role: Role::User, content: content.into() }
	}

	pub fn assistant(content: impl Into<String>) -> Self {
		Self { role: Role::Assistant, content: content.into() }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
	Relevance,
	Rating,
	Distance,
}
impl SortMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Relevance => "relevance",
			Self::Rating => "rating",
			Self::Distance => "distance",
		}
	}
}
impl FromStr for SortMode {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_lowercase().as_str() {
			"relevance" => Ok(Self::Relevance),
			"rating" => Ok(Self::Rating),
			"distance" => Ok(Self::Distance),
			other => Err(format!("Unknown sort mode: {other}.")),
		}
	}
}

/// The user's current reference location: a free-text label plus the
/// resolved coordinate, when one is known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationPreference {
	pub label: String,
	pub coords: Option<Coordinate>,
}
impl LocationPreference {
	pub fn is_empty(&self) -> bool {
		self.label.trim().is_empty() && self.coords.is_none()
	}
}

/// A single result item for a query.
///
/// `distance_km` is derived state: it is written only by the enrichment
/// stage and recomputed on every pass, never taken from upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
	pub id: Option<String>,
	pub title: String,
	pub subtitle: Option<String>,
	pub description: Option<String>,
	pub location: Option<String>,
	pub verified: Option<bool>,
	pub rating: Option<f32>,
	pub tags: Vec<String>,
	pub coords: Option<Coordinate>,
	pub distance_km: Option<f64>,
}
impl ResultCard {
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			id: None,
			title: title.into(),
			subtitle: None,
			description: None,
			location: None,
			verified: None,
			rating: None,
			tags: Vec::new(),
			coords: None,
			distance_km: None,
		}
	}
}
