use criterion::{Criterion, criterion_group, criterion_main};
use z3dk_core::disasm::{DisasmOptions, disassemble_bank};
use z3dk_core::flags::Width;
use z3dk_core::symbols::LabelIndex;

fn bank_of_varied_instructions() -> Vec<u8> {
	let mut rom = vec![0u8; 0x8000];
	let pattern: [u8; 12] = [0xA9, 0x01, 0xE2, 0x30, 0xC2, 0x30, 0xA9, 0x00, 0x00, 0x10, 0x02, 0xEA];
	for chunk in rom.chunks_mut(pattern.len()) {
		let len = chunk.len();
		chunk.copy_from_slice(&pattern[..len]);
	}
	rom
}

fn bench_disassemble_bank(c: &mut Criterion) {
	let rom = bank_of_varied_instructions();
	let labels = LabelIndex::new();
	let options = DisasmOptions {
		bank_start: 0,
		bank_end: 0,
		default_m_width: Width::W8,
		default_x_width: Width::W8,
		output_dir: std::path::PathBuf::new(),
	};

	c.bench_function("disassemble_bank/32KB", |b| {
		b.iter(|| disassemble_bank(&rom, 0, &labels, None, &options));
	});
}

criterion_group!(benches, bench_disassemble_bank);
criterion_main!(benches);
