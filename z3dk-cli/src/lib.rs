//! Command-line entry points for the z3dk disassembly and lint toolchain.

#[macro_use]
extern crate tracing;

pub mod cli;
mod err;
pub mod logging;
