use std::cmp::Ordering;

use crate::card::{ResultCard, SortMode};

/// Order a card collection under a sort mode, returning a new collection;
/// the input is left untouched.
///
/// All non-identity modes use a stable sort, so cards whose key does not
/// change keep their relative order across repeated invocations and the
/// displayed order never jitters.
pub fn sort_cards(cards: &[ResultCard], mode: SortMode) -> Vec<ResultCard> {
	let mut out = cards.to_vec();
	if let Some(compare) = comparator(mode) {
		out.sort_by(compare);
	}
	out
}

/// Comparator selection. `None` means upstream relevance order is
/// authoritative and must not be touched.
fn comparator(mode: SortMode) -> Option<fn(&ResultCard, &ResultCard) -> Ordering> {
	match mode {
		SortMode::Relevance => None,
		SortMode::Rating => Some(by_rating_desc),
		SortMode::Distance => Some(by_distance_asc),
	}
}

/// Descending rating; a missing rating compares as -1 so unrated cards
/// sink below every rated card.
fn by_rating_desc(a: &ResultCard, b: &ResultCard) -> Ordering {
	let left = a.rating.unwrap_or(-1.0);
	let right = b.rating.unwrap_or(-1.0);
	right.partial_cmp(&left).unwrap_or(Ordering::Equal)
}

/// Ascending distance; an unknown distance compares as positive infinity
/// so undistanced cards sink to the bottom.
fn by_distance_asc(a: &ResultCard, b: &ResultCard) -> Ordering {
	let left = a.distance_km.unwrap_or(f64::INFINITY);
	let right = b.distance_km.unwrap_or(f64::INFINITY);
	left.partial_cmp(&right).unwrap_or(Ordering::Equal)
}
