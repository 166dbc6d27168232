pub mod repl;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scout_service::ScoutService;
use scout_storage::FilePreferenceStore;

#[derive(Debug, Parser)]
#[command(
	version = scout_cli::VERSION,
	rename_all = "kebab",
	styles = scout_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = scout_config::load(&args.config)?;

	init_tracing(&config);

	let store = FilePreferenceStore::new(&config.storage.preferences_path);
	let mut service = ScoutService::new(config, Arc::new(store));

	service.hydrate().await?;
	tracing::info!("Session hydrated.");

	repl::run(&mut service).await?;

	service.flush().await;

	Ok(())
}

fn init_tracing(config: &scout_config::Config) {
	let filter = EnvFilter::try_new(&config.service.log_level)
		.unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
