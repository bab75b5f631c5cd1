use std::path::PathBuf;

use clap::Args;
use z3dk_core::disasm::{self, DisasmOptions};
use z3dk_core::flags::Width;
use z3dk_core::hooks::HookManifest;
use z3dk_core::symbols::{LabelIndex, SymbolFormat, load_into};

use crate::err::Error;

#[derive(Args, Debug)]
pub(super) struct DisasmArgs {
	#[arg(short, long, help = "path to the ROM image")]
	rom: PathBuf,

	#[arg(short, long, help = "directory to write bank_XX.asm files into")]
	out: PathBuf,

	#[arg(long, help = "path to a z3dk.toml to read defaults from")]
	config: Option<PathBuf>,

	#[arg(long, help = "path to a symbol file (mlb/wla/csv)")]
	symbols: Option<PathBuf>,

	#[arg(long, value_enum, help = "symbol file format, inferred from --config if omitted")]
	symbols_format: Option<SymbolFormatArg>,

	#[arg(long, help = "path to a hook manifest JSON file")]
	hooks: Option<PathBuf>,

	#[arg(long, default_value_t = 0, help = "first bank to disassemble")]
	bank_start: u8,

	#[arg(long, default_value_t = 0x7F, help = "last bank to disassemble (inclusive)")]
	bank_end: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SymbolFormatArg {
	Mlb,
	Wla,
	Csv,
}

impl From<SymbolFormatArg> for SymbolFormat {
	fn from(value: SymbolFormatArg) -> Self {
		match value {
			SymbolFormatArg::Mlb => Self::Mlb,
			SymbolFormatArg::Wla => Self::Wla,
			SymbolFormatArg::Csv => Self::Csv,
		}
	}
}

pub(super) async fn run(args: DisasmArgs) -> Result<(), Error> {
	let config = match &args.config {
		Some(path) => z3dk_core::Config::load(path)?,
		None => z3dk_core::Config::default(),
	};

	let rom = z3dk_rom::Rom::load(&args.rom)?;

	let mut labels = LabelIndex::new();
	let symbols_path = args.symbols.clone().or(config.symbols_path.clone());
	if let Some(path) = symbols_path {
		let format = args
			.symbols_format
			.map(SymbolFormat::from)
			.or_else(|| config.symbol_format())
			.unwrap_or(SymbolFormat::Mlb);
		load_into(&path, format, &mut labels)?;
		info!("loaded {} labels from {}", labels.len(), path.display());
	}

	let hooks = match &args.hooks {
		Some(path) => Some(HookManifest::load(path)?),
		None => None,
	};

	let options = DisasmOptions {
		bank_start: args.bank_start,
		bank_end: args.bank_end.min((rom.bank_count().saturating_sub(1)) as u8),
		default_m_width: Width::W8,
		default_x_width: Width::W8,
		output_dir: args.out.clone(),
	};

	disasm::run(rom.bytes(), &labels, hooks.as_ref(), &options)?;
	info!(
		"wrote banks ${:02X}-${:02X} to {}",
		options.bank_start,
		options.bank_end,
		args.out.display()
	);

	Ok(())
}
