// Game Boy cartridge loader and header inspector
pub mod emu;
