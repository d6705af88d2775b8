// cartridge header view over 0x0100..0x0150
use std::borrow::Cow;

use serde::Serialize;

use super::{error::LayoutError, rom::RomImage};

pub const HEADER_START: usize = 0x100;
pub const HEADER_END: usize = 0x150;
pub const HEADER_LEN: usize = HEADER_END - HEADER_START;

// offsets relative to HEADER_START
const ENTRY_POINT: usize = 0x00;
const LOGO: usize = 0x04;
const TITLE: usize = 0x34;
const MANUFACTURER: usize = 0x3F;
const CGB_FLAG: usize = 0x43;
const NEW_LICENSEE: usize = 0x44;
const SGB_FLAG: usize = 0x46;
const CART_TYPE: usize = 0x47;
const ROM_SIZE: usize = 0x48;
const RAM_SIZE: usize = 0x49;
const DESTINATION: usize = 0x4A;
const OLD_LICENSEE: usize = 0x4B;
const VERSION: usize = 0x4C;
const HEADER_CHECKSUM: usize = 0x4D;
const GLOBAL_CHECKSUM: usize = 0x4E;

pub const LOGO_LEN: usize = 0x30;
pub const TITLE_LEN: usize = 0x10;

/// Highest `rom_size_code` with a defined size (8 MiB).
pub const MAX_ROM_SIZE_CODE: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CgbSupport {
    None,
    Supported,
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Japan,
    Overseas,
    Unknown,
}

/// Borrowed, read-only view of the header bytes of a [`RomImage`].
#[derive(Debug, Clone, Copy)]
pub struct CartridgeHeader<'a> {
    raw: &'a [u8; HEADER_LEN],
}

/// Builds the header view, failing if the image is too short to contain it.
pub fn view(rom: &RomImage) -> Result<CartridgeHeader<'_>, LayoutError> {
    CartridgeHeader::from_image(rom.bytes())
}

impl<'a> CartridgeHeader<'a> {
    pub fn from_image(image: &'a [u8]) -> Result<Self, LayoutError> {
        let raw = image
            .get(HEADER_START..HEADER_END)
            .and_then(|s| s.try_into().ok())
            .ok_or(LayoutError::Truncated { len: image.len() })?;
        Ok(Self { raw })
    }

    fn fixed<const N: usize>(&self, at: usize) -> &'a [u8; N] {
        // offsets are the constants above, all with at + N <= HEADER_LEN
        let raw: &'a [u8; HEADER_LEN] = self.raw;
        raw[at..at + N]
            .try_into()
            .expect("header field lies inside the header")
    }

    pub fn raw(&self) -> &'a [u8; HEADER_LEN] {
        self.raw
    }

    pub fn entry_point(&self) -> &'a [u8; 4] {
        self.fixed(ENTRY_POINT)
    }

    pub fn logo(&self) -> &'a [u8; LOGO_LEN] {
        self.fixed(LOGO)
    }

    pub fn title_bytes(&self) -> &'a [u8; TITLE_LEN] {
        self.fixed(TITLE)
    }

    /// Title text up to the first NUL. Non-ASCII bytes are replaced, never rejected.
    pub fn title(&self) -> Cow<'a, str> {
        let bytes = self.title_bytes();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(TITLE_LEN);
        String::from_utf8_lossy(&bytes[..end])
    }

    /// Four-character manufacturer code found in newer cartridges, overlapping the title.
    pub fn manufacturer_code(&self) -> Option<&'a str> {
        let code: &'a [u8; 4] = self.fixed(MANUFACTURER);
        if code
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            std::str::from_utf8(code).ok()
        } else {
            None
        }
    }

    pub fn cgb_flag(&self) -> u8 {
        self.raw[CGB_FLAG]
    }

    pub fn cgb_support(&self) -> CgbSupport {
        match self.cgb_flag() {
            0x80 => CgbSupport::Supported,
            0xC0 => CgbSupport::Required,
            _ => CgbSupport::None,
        }
    }

    /// Two raw ASCII bytes, e.g. `*b"01"`. Not a number.
    pub fn new_licensee_code(&self) -> [u8; 2] {
        *self.fixed(NEW_LICENSEE)
    }

    pub fn sgb_flag(&self) -> u8 {
        self.raw[SGB_FLAG]
    }

    pub fn sgb_support(&self) -> bool {
        self.sgb_flag() == 0x03
    }

    pub fn cart_type(&self) -> u8 {
        self.raw[CART_TYPE]
    }

    pub fn rom_size_code(&self) -> u8 {
        self.raw[ROM_SIZE]
    }

    /// `32 KiB << rom_size_code`, or `None` past the known range.
    pub fn rom_size_kib(&self) -> Option<u32> {
        rom_size_kib(self.rom_size_code())
    }

    pub fn ram_size_code(&self) -> u8 {
        self.raw[RAM_SIZE]
    }

    pub fn destination_code(&self) -> u8 {
        self.raw[DESTINATION]
    }

    pub fn destination(&self) -> Destination {
        match self.destination_code() {
            0x00 => Destination::Japan,
            0x01 => Destination::Overseas,
            _ => Destination::Unknown,
        }
    }

    pub fn old_licensee_code(&self) -> u8 {
        self.raw[OLD_LICENSEE]
    }

    pub fn version(&self) -> u8 {
        self.raw[VERSION]
    }

    pub fn header_checksum(&self) -> u8 {
        self.raw[HEADER_CHECKSUM]
    }

    /// Big-endian, unlike every other multi-byte value on the system.
    pub fn global_checksum(&self) -> u16 {
        u16::from_be_bytes(*self.fixed(GLOBAL_CHECKSUM))
    }

    /// Title through version byte (0x134..=0x14C), the input of the header checksum.
    pub fn checksummed_bytes(&self) -> &'a [u8] {
        &self.raw[TITLE..HEADER_CHECKSUM]
    }
}

pub fn rom_size_kib(code: u8) -> Option<u32> {
    (code <= MAX_ROM_SIZE_CODE).then(|| 32u32 << code)
}
