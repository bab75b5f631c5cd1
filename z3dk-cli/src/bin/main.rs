#![deny(clippy::mem_forget)]
#![forbid(unsafe_code)]

use std::future::Future;
use std::process::ExitCode;

use z3dk_common::cst;

fn main() -> ExitCode {
	with_enough_stack(z3dk_cli::cli::init())
}

/// Rust's default thread stack size of 2MiB doesn't allow sufficient recursion depth.
fn with_enough_stack<T>(fut: impl Future<Output = T> + Send) -> T {
	tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.max_blocking_threads(*cst::RUNTIME_MAX_BLOCKING_THREADS)
		.thread_stack_size(*cst::RUNTIME_STACK_SIZE)
		.thread_name("z3dk-worker")
		.build()
		.unwrap()
		.block_on(fut)
}
