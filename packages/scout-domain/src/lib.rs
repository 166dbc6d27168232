pub mod card;
pub mod enrich;
pub mod geo;
pub mod sort;

pub use card::{ConversationTurn, Coordinate, LocationPreference, ResultCard, Role, SortMode};
pub use enrich::enrich;
pub use geo::distance_km;
pub use sort::sort_cards;
