// metadata resolution from header byte values
use serde::Serialize;

use super::{
    header::{CartridgeHeader, CgbSupport, Destination},
    licensee::{self, UNKNOWN},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMetadata {
    pub cart_type_name: &'static str,
    pub licensee_name: &'static str,
    /// `None` when the size code is outside the known range.
    pub rom_size_kib: Option<u32>,
    pub ram_size_code: u8,
    pub ram_size_label: &'static str,
    pub ram_size_kib: Option<u32>,
    pub cgb_support: CgbSupport,
    pub sgb_support: bool,
    pub destination: Destination,
}

impl ResolvedMetadata {
    pub fn resolve(header: &CartridgeHeader<'_>) -> Self {
        Self {
            cart_type_name: cart_type_name(header.cart_type()),
            licensee_name: licensee::licensee_name(
                header.old_licensee_code(),
                header.new_licensee_code(),
            ),
            rom_size_kib: header.rom_size_kib(),
            ram_size_code: header.ram_size_code(),
            ram_size_label: ram_size_label(header.ram_size_code()),
            ram_size_kib: ram_size_kib(header.ram_size_code()),
            cgb_support: header.cgb_support(),
            sgb_support: header.sgb_support(),
            destination: header.destination(),
        }
    }
}

pub fn cart_type_name(code: u8) -> &'static str {
    match code {
        0x00 => "ROM ONLY",
        0x01 => "MBC1",
        0x02 => "MBC1+RAM",
        0x03 => "MBC1+RAM+BATTERY",
        0x05 => "MBC2",
        0x06 => "MBC2+BATTERY",
        0x08 => "ROM+RAM",
        0x09 => "ROM+RAM+BATTERY",
        0x0B => "MMM01",
        0x0C => "MMM01+RAM",
        0x0D => "MMM01+RAM+BATTERY",
        0x0F => "MBC3+TIMER+BATTERY",
        0x10 => "MBC3+TIMER+RAM+BATTERY",
        0x11 => "MBC3",
        0x12 => "MBC3+RAM",
        0x13 => "MBC3+RAM+BATTERY",
        0x19 => "MBC5",
        0x1A => "MBC5+RAM",
        0x1B => "MBC5+RAM+BATTERY",
        0x1C => "MBC5+RUMBLE",
        0x1D => "MBC5+RUMBLE+RAM",
        0x1E => "MBC5+RUMBLE+RAM+BATTERY",
        0x20 => "MBC6",
        0x22 => "MBC7+SENSOR+RUMBLE+RAM+BATTERY",
        0xFC => "POCKET CAMERA",
        0xFD => "BANDAI TAMA5",
        0xFE => "HuC3",
        0xFF => "HuC1+RAM+BATTERY",
        _ => UNKNOWN,
    }
}

/// External RAM in KiB. Code 0x01 is listed as unused by Nintendo.
pub fn ram_size_kib(code: u8) -> Option<u32> {
    match code {
        0x00 => Some(0),
        0x02 => Some(8),
        0x03 => Some(32),
        0x04 => Some(128),
        0x05 => Some(64),
        _ => None,
    }
}

pub fn ram_size_label(code: u8) -> &'static str {
    match code {
        0x00 => "none",
        0x01 => "unused",
        0x02 => "8 KiB (1 bank)",
        0x03 => "32 KiB (4 banks)",
        0x04 => "128 KiB (16 banks)",
        0x05 => "64 KiB (8 banks)",
        _ => UNKNOWN,
    }
}
