mod disasm;
mod lint;
mod lsp;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use z3dk_common::cst::LOGO;

use crate::logging::{Custom, CustomEnvFilterParser, Target};

const INFO: &str = r"
z3dk: a 65816 disassembly and lint toolchain for SNES romhacking
";

#[derive(Parser, Debug)]
#[command(name = "z3dk command-line interface", bin_name = "z3dk")]
#[command(author, version, about = INFO, before_help = LOGO)]
#[command(disable_version_flag = true, arg_required_else_help = true)]
struct Cli {
	#[arg(help = "The logging level")]
	#[arg(env = "Z3DK_LOG", short = 'l', long = "log")]
	#[arg(default_value = "info")]
	#[arg(value_parser = CustomEnvFilterParser::new())]
	#[arg(global = true)]
	log: Custom,

	#[command(subcommand)]
	command: Commands,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Subcommand)]
enum Commands {
	#[command(about = "Disassemble a LoROM image into per-bank listings")]
	Disasm(disasm::DisasmArgs),
	#[command(about = "Lint an assembler's output for unsafe writes")]
	Lint(lint::LintArgs),
	#[command(about = "Run the language server over stdio")]
	Lsp(lsp::LspArgs),
}

pub(crate) fn prepare(log: Custom, target: Target) -> Option<tracing_appender::non_blocking::WorkerGuard> {
	crate::logging::builder()
		.with_filter(log)
		.with_target(target)
		.with_file_appender(std::path::PathBuf::from(".logs"))
		.build()
}

pub async fn init() -> ExitCode {
	let args = Cli::parse();

	// The lsp subcommand owns stdout for the wire protocol; route its logs
	// to stderr instead. Everything else is free to log to stdout.
	let target = if matches!(args.command, Commands::Lsp(_)) { Target::Stderr } else { Target::Stdout };
	let _guard = prepare(args.log, target);

	let outcome = match args.command {
		Commands::Disasm(args) => disasm::run(args).await,
		Commands::Lint(args) => lint::run(args).await,
		Commands::Lsp(args) => lsp::run(args).await,
	};

	match outcome {
		Ok(()) => ExitCode::SUCCESS,
		Err(crate::err::Error::LintFailed(count)) => {
			error!("{count} error diagnostics were reported");
			ExitCode::FAILURE
		}
		Err(e) => {
			error!("{e}");
			ExitCode::FAILURE
		}
	}
}
