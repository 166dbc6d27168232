// std
use std::time::Duration as StdDuration;

// crates.io
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// self
use crate::{Error, Result};
use scout_domain::{ConversationTurn, Coordinate, ResultCard};

#[derive(Debug, Clone, Serialize)]
pub struct AssistRequest {
	pub message: String,
	pub history: Vec<ConversationTurn>,
	pub temperature: f32,
	pub meta: RequestMeta,
	pub site_slug: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestMeta {
	pub page: u32,
	pub limit: u32,
	#[serde(rename = "userLocation")]
	pub user_location: String,
	pub coords: Option<Coordinate>,
	pub filters: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistResponse {
	#[serde(default)]
	pub ok: Option<bool>,
	#[serde(default)]
	pub answer: Option<String>,
	#[serde(default)]
	pub cards: Option<Vec<RawCard>>,
	#[serde(default)]
	pub intent: Option<Value>,
	#[serde(default)]
	pub meta: Option<ResponseMeta>,
	#[serde(default)]
	pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMeta {
	#[serde(default, rename = "hasMore")]
	pub has_more: Option<bool>,
}

/// A card as the service sends it: the ResultCard shape minus the derived
/// `distance_km`, which only the enrichment stage may write.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCard {
	#[serde(default)]
	pub id: Option<String>,
	pub title: String,
	#[serde(default)]
	pub subtitle: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub location: Option<String>,
	#[serde(default)]
	pub verified: Option<bool>,
	#[serde(default)]
	pub rating: Option<f32>,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub coords: Option<Coordinate>,
}
impl RawCard {
	pub fn into_card(self) -> ResultCard {
		ResultCard {
			id: self.id,
			title: self.title,
			subtitle: self.subtitle,
			description: self.description,
			location: self.location,
			verified: self.verified,
			rating: self.rating,
			tags: self.tags,
			coords: self.coords,
			distance_km: None,
		}
	}
}

pub async fn ask(cfg: &scout_config::Assist, request: &AssistRequest) -> Result<AssistResponse> {
	let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let res = client.post(url).json(request).send().await?;
	let json: Value = res.error_for_status()?.json().await?;
	parse_assist_response(json)
}

pub fn parse_assist_response(json: Value) -> Result<AssistResponse> {
	if !json.is_object() {
		return Err(Error::InvalidResponse {
			message: "Assist response is not a JSON object.".to_string(),
		});
	}

	Ok(serde_json::from_value(json)?)
}
