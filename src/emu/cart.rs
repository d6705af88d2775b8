// cartridge loader: rom -> header -> checks -> report
use std::path::Path;

use log::{debug, warn};

use super::{
    error::LoadError,
    header::{self, CartridgeHeader},
    meta::ResolvedMetadata,
    report::{HeaderFields, LoadReport},
    rom::RomImage,
    validate,
};

/// Loads `path` and returns its report. The image bytes are dropped.
pub fn load(path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
    Cartridge::load(path).map(Cartridge::into_report)
}

/// Runs header decoding, validation and resolution over an image already in memory.
pub fn inspect(rom: &RomImage) -> Result<LoadReport, LoadError> {
    let header = header::view(rom)?;
    debug!(
        "header: type={:02X} rom={:02X} ram={:02X} old_lic={:02X} new_lic={:?} ver={:02X}",
        header.cart_type(),
        header.rom_size_code(),
        header.ram_size_code(),
        header.old_licensee_code(),
        header.new_licensee_code().escape_ascii().to_string(),
        header.version(),
    );

    let validation = validate::validate(&header);
    let metadata = ResolvedMetadata::resolve(&header);
    let report = LoadReport {
        filename: rom.name().to_owned(),
        file_size: rom.len(),
        header: HeaderFields::from(&header),
        validation,
        metadata,
        size_matches_header: size_matches_header(rom, &header),
    };

    if !validation.logo_valid {
        return Err(LoadError::LogoMismatch {
            report: Box::new(report),
        });
    }
    if !validation.header_checksum_valid {
        warn!(
            "{}: header checksum mismatch (computed {:02X}, header says {:02X})",
            rom.name(),
            validation.computed_checksum,
            header.header_checksum()
        );
    }

    Ok(report)
}

fn size_matches_header(rom: &RomImage, header: &CartridgeHeader<'_>) -> Option<bool> {
    let Some(kib) = header.rom_size_kib() else {
        warn!(
            "{}: unrecognized ROM size code {:02X}",
            rom.name(),
            header.rom_size_code()
        );
        return None;
    };
    let declared = kib as usize * 1024;
    if declared != rom.len() {
        warn!(
            "{}: header declares {} bytes but file has {}",
            rom.name(),
            declared,
            rom.len()
        );
    }
    Some(declared == rom.len())
}

/// A validated image plus its report, as handed to the memory bus.
#[derive(Clone, Debug)]
pub struct Cartridge {
    rom: RomImage,
    report: LoadReport,
}

impl Cartridge {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::from_rom(RomImage::load(path)?)
    }

    pub fn from_rom(rom: RomImage) -> Result<Self, LoadError> {
        let report = inspect(&rom)?;
        Ok(Self { rom, report })
    }

    pub fn rom(&self) -> &RomImage {
        &self.rom
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn into_report(self) -> LoadReport {
        self.report
    }

    /// Fixed bank 0..1 window; reads past the image float high.
    pub fn read(&self, addr: u16) -> u8 {
        let i = addr as usize;
        if addr <= 0x7FFF && i < self.rom.len() {
            self.rom.bytes()[i]
        } else {
            0xFF
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emu::testutil::{RomBuilder, TempRom};

    #[test]
    fn well_formed_rom_only_image() {
        let image = RomBuilder::new()
            .cart_type(0x00)
            .licensee(0x01, [0, 0])
            .build();
        assert_eq!(image.len(), 32 * 1024);
        let tmp = TempRom::new("cart_ok", &image);

        let report = load(tmp.path()).unwrap();
        assert!(report.validation.logo_valid);
        assert!(report.validation.header_checksum_valid);
        assert_eq!(report.metadata.cart_type_name, "ROM ONLY");
        assert_eq!(report.metadata.licensee_name, "Nintendo");
        assert_eq!(report.metadata.rom_size_kib, Some(32));
        assert_eq!(report.size_matches_header, Some(true));
        assert_eq!(report.file_size, 32 * 1024);
        assert!(report.is_valid());
    }

    #[test]
    fn short_file_is_truncated() {
        let tmp = TempRom::new("cart_short", &[0u8; 0x14F]);
        match load(tmp.path()) {
            Err(LoadError::TruncatedImage { expected, actual }) => {
                assert_eq!(expected, 0x150);
                assert_eq!(actual, 0x14F);
            }
            other => panic!("expected TruncatedImage, got {:?}", other),
        }
    }

    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("gb_cartinfo_missing_cart.gb");
        assert!(matches!(load(&path), Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn bad_logo_is_fatal_but_keeps_diagnostics() {
        let mut image = RomBuilder::new().cart_type(0x01).build();
        image[0x104] = 0x00;
        match inspect(&RomImage::from_bytes("nologo.gb", image)) {
            Err(LoadError::LogoMismatch { report }) => {
                assert!(!report.validation.logo_valid);
                assert!(!report.is_valid());
                assert_eq!(report.metadata.cart_type_name, "MBC1");
                assert_eq!(report.filename, "nologo.gb");
            }
            other => panic!("expected LogoMismatch, got {:?}", other),
        }
    }

    #[test]
    fn bad_checksum_still_loads() {
        let mut image = RomBuilder::new().build();
        image[0x14D] = image[0x14D].wrapping_add(1);
        let report = inspect(&RomImage::from_bytes("sum.gb", image)).unwrap();
        assert!(report.validation.logo_valid);
        assert!(!report.validation.header_checksum_valid);
        assert_eq!(
            report.validation.computed_checksum,
            report.header.header_checksum.wrapping_sub(1)
        );
    }

    #[test]
    fn size_mismatch_is_informational() {
        let image = RomBuilder::new().rom_size_code(1).len(0x8000).build();
        let report = inspect(&RomImage::from_bytes("half.gb", image)).unwrap();
        assert_eq!(report.metadata.rom_size_kib, Some(64));
        assert_eq!(report.size_matches_header, Some(false));
    }

    #[test]
    fn report_outlives_image() {
        let report = {
            let rom = RomImage::from_bytes("tmp.gb", RomBuilder::new().title("KEEP").build());
            inspect(&rom).unwrap()
        };
        assert_eq!(report.header.title, "KEEP");
    }

    #[test]
    fn read_serves_image_and_open_bus() {
        let image = RomBuilder::new().len(0x4000).build();
        let cart = Cartridge::from_rom(RomImage::from_bytes("small.gb", image)).unwrap();
        assert_eq!(cart.read(0x0104), 0xCE);
        assert_eq!(cart.read(0x3FFF), cart.rom().bytes()[0x3FFF]);
        assert_eq!(cart.read(0x4000), 0xFF);
        assert_eq!(cart.read(0xC000), 0xFF);
        assert_eq!(cart.report().filename, "small.gb");
    }
}
