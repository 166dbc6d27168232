use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = scout_chat::Args::parse();
	scout_chat::run(args).await
}
