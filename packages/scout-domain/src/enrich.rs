use crate::{
	card::{Coordinate, ResultCard},
	geo,
};

/// Attach a computed `distance_km` to every card, relative to `reference`.
///
/// With no reference, or for a card without a finite coordinate pair, the
/// distance is the explicit unknown (`None`) rather than zero or a
/// sentinel; infinity is a sort-time convention only. Idempotent for a
/// fixed reference.
pub fn enrich(cards: &mut [ResultCard], reference: Option<Coordinate>) {
	for card in cards.iter_mut() {
		card.distance_km = match (reference, card.coords) {
			(Some(origin), Some(target)) if origin.is_finite() && target.is_finite() => {
				Some(round_km(geo::distance_km(origin, target)))
			},
			_ => None,
		};
	}
}

fn round_km(value: f64) -> f64 {
	(value * 10.0).round() / 10.0
}
