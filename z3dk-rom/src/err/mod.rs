use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("could not read ROM file: {0}")]
	Io(#[from] std::io::Error),
	#[error("unsupported mapper '{0}', only LoROM is implemented")]
	UnsupportedMapper(String),
	#[error("ROM is too small to contain bank {bank:#04X} ({size} bytes)")]
	BankOutOfRange { bank: u8, size: usize },
}
