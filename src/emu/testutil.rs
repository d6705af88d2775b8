// synthetic images for tests
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use super::{
    header::rom_size_kib,
    validate::{header_checksum, NINTENDO_LOGO},
};

/// Builds a cartridge image with a valid logo and a correct header checksum.
pub struct RomBuilder {
    title: Vec<u8>,
    cart_type: u8,
    rom_size_code: u8,
    ram_size_code: u8,
    old_licensee: u8,
    new_licensee: [u8; 2],
    len: Option<usize>,
}

impl RomBuilder {
    pub fn new() -> Self {
        Self {
            title: Vec::new(),
            cart_type: 0x00,
            rom_size_code: 0x00,
            ram_size_code: 0x00,
            old_licensee: 0x00,
            new_licensee: [0, 0],
            len: None,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.as_bytes().to_vec();
        self
    }

    pub fn cart_type(mut self, code: u8) -> Self {
        self.cart_type = code;
        self
    }

    pub fn rom_size_code(mut self, code: u8) -> Self {
        self.rom_size_code = code;
        self
    }

    pub fn ram_size_code(mut self, code: u8) -> Self {
        self.ram_size_code = code;
        self
    }

    pub fn licensee(mut self, old: u8, new: [u8; 2]) -> Self {
        self.old_licensee = old;
        self.new_licensee = new;
        self
    }

    /// Overrides the image length, which otherwise follows the size code.
    pub fn len(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let len = self.len.unwrap_or_else(|| {
            rom_size_kib(self.rom_size_code).map_or(0x8000, |kib| kib as usize * 1024)
        });
        let mut image = vec![0u8; len.max(0x150)];
        image[0x100..0x104].copy_from_slice(&[0x00, 0xC3, 0x50, 0x01]);
        image[0x104..0x134].copy_from_slice(&NINTENDO_LOGO);
        let n = self.title.len().min(16);
        image[0x134..0x134 + n].copy_from_slice(&self.title[..n]);
        image[0x144..0x146].copy_from_slice(&self.new_licensee);
        image[0x147] = self.cart_type;
        image[0x148] = self.rom_size_code;
        image[0x149] = self.ram_size_code;
        image[0x14B] = self.old_licensee;
        image[0x14D] = header_checksum(&image[0x134..0x14D]);
        image
    }
}

/// A file under the temp dir, removed on drop.
pub struct TempRom {
    path: PathBuf,
}

impl TempRom {
    pub fn new(tag: &str, bytes: &[u8]) -> Self {
        let name = format!("gb_cartinfo_{}_{}.gb", tag, process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, bytes).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempRom {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
