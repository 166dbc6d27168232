use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use scout_domain::{Coordinate, ResultCard, SortMode};
use scout_service::{LoadOutcome, ScoutService, SendOutcome};

const HELP: &str = "\
Type a query to search, or one of:
  :sort <relevance|rating|distance>  change the result order
  :location <label> [lat lng]        set the reference location
  :more                              load the next page
  :help                              show this message
  :quit                              exit";

pub async fn run(service: &mut ScoutService) -> color_eyre::Result<()> {
	println!("scout {} - type :help for commands", scout_cli::VERSION);

	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	loop {
		prompt()?;

		let Some(line) = lines.next_line().await? else {
			break;
		};
		let line = line.trim();

		if line.is_empty() {
			continue;
		}
		if let Some(command) = line.strip_prefix(':') {
			if !dispatch(service, command).await? {
				break;
			}

			continue;
		}

		match service.send(line).await {
			Ok(SendOutcome::Replied { answer, acknowledgment }) => {
				if !acknowledgment.is_empty() {
					println!("{acknowledgment}");
				}
				if !answer.is_empty() {
					println!("{answer}");
				}

				render_cards(service);
			},
			Ok(SendOutcome::Failed { message }) => println!("{message}"),
			Ok(SendOutcome::Superseded) => {},
			Err(err) => println!("{err}"),
		}
	}

	Ok(())
}

async fn dispatch(service: &mut ScoutService, command: &str) -> color_eyre::Result<bool> {
	let (name, rest) = match command.split_once(char::is_whitespace) {
		Some((name, rest)) => (name, rest.trim()),
		None => (command, ""),
	};

	match name {
		"quit" | "q" | "exit" => return Ok(false),
		"help" => println!("{HELP}"),
		"more" => match service.load_more().await? {
			LoadOutcome::Appended { added } => {
				println!("Loaded {added} more.");

				render_cards(service);
			},
			LoadOutcome::Failed { message } => println!("{message}"),
			LoadOutcome::Unavailable => println!("No more results to load."),
			LoadOutcome::Superseded => {},
		},
		"sort" => match rest.parse::<SortMode>() {
			Ok(mode) => {
				service.set_sort(mode);
				render_cards(service);
			},
			Err(err) => println!("{err}"),
		},
		"location" => {
			if rest.is_empty() {
				println!("Usage: :location <label> [lat lng]");
			} else {
				let (label, coords) = parse_location(rest);

				service.set_location(label, coords);
				println!("Location set to {label}.");

				if !service.cards().is_empty() {
					render_cards(service);
				}
			}
		},
		other => println!("Unknown command :{other}; type :help for commands."),
	}

	Ok(true)
}

/// `"Malmö 55.605 13.0038"` splits into a label and a coordinate;
/// anything without two trailing numbers is all label.
fn parse_location(input: &str) -> (&str, Option<Coordinate>) {
	let mut tokens = input.rsplitn(3, char::is_whitespace);
	let lng = tokens.next().and_then(|token| token.parse::<f64>().ok());
	let lat = tokens.next().and_then(|token| token.parse::<f64>().ok());

	if let (Some(lat), Some(lng), Some(label)) = (lat, lng, tokens.next()) {
		(label.trim(), Some(Coordinate::new(lat, lng)))
	} else {
		(input, None)
	}
}

fn render_cards(service: &ScoutService) {
	let cards = service.cards();

	if cards.is_empty() {
		println!("No results.");

		return;
	}

	println!("Results ({}):", service.sort_mode().as_str());

	for (idx, card) in cards.iter().enumerate() {
		println!("{:>3}. {}", idx + 1, describe(card));
	}
	if service.has_more() {
		println!("Type :more for more results.");
	}
}

fn describe(card: &ResultCard) -> String {
	let mut line = card.title.clone();

	if let Some(rating) = card.rating {
		line.push_str(&format!("  [{rating:.1}]"));
	}
	if let Some(distance) = card.distance_km {
		line.push_str(&format!("  {distance} km"));
	}
	if let Some(location) = card.location.as_deref() {
		line.push_str(&format!("  - {location}"));
	}
	if card.verified == Some(true) {
		line.push_str("  (verified)");
	}

	line
}

fn prompt() -> color_eyre::Result<()> {
	let mut stdout = std::io::stdout();

	write!(stdout, "> ")?;
	stdout.flush()?;

	Ok(())
}
