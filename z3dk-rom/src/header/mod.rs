//! Copier-header detection and removal.
//!
//! Some ROM dumps carry a 512-byte copier header ahead of the actual LoROM
//! image. It carries no information this toolchain needs; its only effect
//! is shifting every PC-relative offset by 512 bytes if left in place.

use z3dk_common::address::{COPIER_HEADER_SIZE, has_copier_header};

/// Strip the copier header from `data` if its size indicates one is present.
#[must_use]
pub fn strip(data: &[u8]) -> &[u8] {
	if has_copier_header(data.len()) { &data[COPIER_HEADER_SIZE..] } else { data }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_when_present() {
		let data = vec![0u8; 0x8000 + COPIER_HEADER_SIZE];
		assert_eq!(strip(&data).len(), 0x8000);
	}

	#[test]
	fn leaves_clean_dumps_alone() {
		let data = vec![0u8; 0x8000];
		assert_eq!(strip(&data).len(), 0x8000);
	}
}
