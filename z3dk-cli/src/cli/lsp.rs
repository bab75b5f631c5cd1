use std::path::PathBuf;

use clap::Args;

use crate::err::Error;

#[derive(Args, Debug)]
pub(super) struct LspArgs {
	#[arg(long, help = "path to a z3dk.toml providing the default workspace configuration")]
	config: Option<PathBuf>,
}

pub(super) async fn run(args: LspArgs) -> Result<(), Error> {
	let config = match &args.config {
		Some(path) => z3dk_core::Config::load(path)?,
		None => z3dk_core::Config::default(),
	};

	info!("starting language server over stdio");
	z3dk_lsp::run_stdio(config).await;
	Ok(())
}
