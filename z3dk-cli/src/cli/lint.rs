use std::path::PathBuf;

use clap::Args;
use z3dk_core::assemble::AssembleResult;
use z3dk_core::hooks::HookManifest;
use z3dk_core::lint::{self, LintOptions};

use crate::err::Error;

#[derive(Args, Debug)]
pub(super) struct LintArgs {
	#[arg(short, long, help = "path to an AssembleResult JSON document")]
	result: PathBuf,

	#[arg(long, help = "path to a z3dk.toml to read lint toggles from")]
	config: Option<PathBuf>,

	#[arg(long, help = "path to a hook manifest JSON file, overrides --config")]
	hooks: Option<PathBuf>,
}

pub(super) async fn run(args: LintArgs) -> Result<(), Error> {
	let config = match &args.config {
		Some(path) => z3dk_core::Config::load(path)?,
		None => z3dk_core::Config::default(),
	};

	let text = std::fs::read_to_string(&args.result)?;
	let result: AssembleResult = serde_json::from_str(&text)?;

	let known_hooks = args.hooks.as_ref().map(|path| HookManifest::load(path)).transpose()?;

	let options = LintOptions {
		default_m_width: z3dk_core::flags::Width::W8,
		default_x_width: z3dk_core::flags::Width::W8,
		warn_unknown_width: config.warn_unknown_width,
		warn_branch_outside_bank: config.warn_branch_outside_bank,
		warn_org_collision: config.warn_org_collision,
		warn_unauthorized_hook: config.warn_unauthorized_hook,
		warn_unused_symbols: config.warn_unused_symbols,
		known_hooks,
		prohibited_memory_ranges: config.parsed_memory_ranges(),
		state_overrides: std::collections::HashMap::new(),
	};

	let diagnostics = lint::run(&result, &options);

	let mut error_count = 0usize;
	for diagnostic in &diagnostics {
		if diagnostic.is_error() {
			error_count += 1;
		}
		let level = if diagnostic.is_error() { "error" } else { "warning" };
		match (&diagnostic.file, diagnostic.line) {
			(Some(file), Some(line)) => {
				println!("{level}: {}:{line}: {}", file.display(), diagnostic.message);
			}
			_ => println!("{level}: {}", diagnostic.message),
		}
	}

	info!("{} diagnostics reported ({error_count} errors)", diagnostics.len());

	if error_count > 0 {
		return Err(Error::LintFailed(error_count));
	}
	Ok(())
}
