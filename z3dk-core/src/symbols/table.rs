//! The label index: a multi-valued `Address -> [name]` map (spec.md §4.2).
//!
//! Lookups are mirror-aware — `lookup` and its callers probe both an address
//! and its `^ 0x800000` mirror, since the same WRAM byte is addressable from
//! either bank range.

use indexmap::IndexMap;
use z3dk_common::address::Address;

/// Labels keyed by address, each bucket kept in insertion order so that
/// duplicate names registered at the same address are never silently
/// collapsed (spec.md §4.2).
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
	by_address: IndexMap<Address, Vec<String>>,
}

impl LabelIndex {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `name` at `address`. A no-op for an empty name.
	pub fn add_label(&mut self, address: Address, name: impl Into<String>) {
		let name = name.into();
		if name.is_empty() {
			return;
		}
		self.by_address.entry(address).or_default().push(name);
	}

	/// Names registered directly at `address`, ignoring its mirror.
	#[must_use]
	pub fn labels_at(&self, address: Address) -> &[String] {
		self.by_address.get(&address).map_or(&[], Vec::as_slice)
	}

	/// The first label at `address` or its mirror, probing in canonical
	/// `[address, address.mirror()]` order.
	#[must_use]
	pub fn lookup(&self, address: Address) -> Option<&str> {
		for probe in address.with_mirror() {
			if let Some(name) = self.by_address.get(&probe).and_then(|names| names.first()) {
				return Some(name.as_str());
			}
		}
		None
	}

	/// All labels at `address` or its mirror, address probed first.
	#[must_use]
	pub fn lookup_all(&self, address: Address) -> Vec<&str> {
		let mut found = Vec::new();
		for probe in address.with_mirror() {
			found.extend(self.labels_at(probe).iter().map(String::as_str));
		}
		found
	}

	/// Total number of distinct addresses carrying at least one label.
	#[must_use]
	pub fn len(&self) -> usize {
		self.by_address.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.by_address.is_empty()
	}

	/// Every `(address, names)` pair, in first-insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (Address, &[String])> {
		self.by_address.iter().map(|(addr, names)| (*addr, names.as_slice()))
	}

	pub fn merge(&mut self, other: Self) {
		for (address, names) in other.by_address {
			for name in names {
				self.add_label(address, name);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_name_is_a_no_op() {
		let mut index = LabelIndex::new();
		index.add_label(Address::new(0x008000), "");
		assert!(index.is_empty());
	}

	#[test]
	fn duplicate_names_at_same_address_are_retained_in_order() {
		let mut index = LabelIndex::new();
		let addr = Address::new(0x008000);
		index.add_label(addr, "Start");
		index.add_label(addr, "EntryPoint");
		assert_eq!(index.labels_at(addr), ["Start", "EntryPoint"]);
	}

	#[test]
	fn lookup_is_mirror_aware() {
		let mut index = LabelIndex::new();
		index.add_label(Address::new(0x7E0010), "RamFlag");
		assert_eq!(index.lookup(Address::new(0xFE0010)), Some("RamFlag"));
		assert_eq!(index.lookup(Address::new(0x7E0010)), Some("RamFlag"));
	}

	#[test]
	fn lookup_returns_none_when_absent() {
		let index = LabelIndex::new();
		assert_eq!(index.lookup(Address::new(0x008000)), None);
	}
}
