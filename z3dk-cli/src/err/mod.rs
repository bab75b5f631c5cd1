use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("bad argument: {0}")]
	BadArgument(String),
	#[error("cannot open the specified file: {0}")]
	Io(#[from] std::io::Error),
	#[error("z3dk-rom error: {0}")]
	Rom(#[from] z3dk_rom::Error),
	#[error("z3dk-core error: {0}")]
	Core(#[from] z3dk_core::CoreError),
	#[error("there was an error with JSON serialization/deserialization: {0}")]
	Json(#[from] serde_json::Error),
	#[error("{0} error diagnostics were reported")]
	LintFailed(usize),
}
