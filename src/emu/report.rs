// load report: owned copy of everything the caller needs after the rom is gone
use std::fmt;

use serde::{Serialize, Serializer};

use super::{header::CartridgeHeader, meta::ResolvedMetadata, validate::ValidationOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderFields {
    pub entry_point: [u8; 4],
    pub title: String,
    pub manufacturer_code: Option<String>,
    pub cgb_flag: u8,
    #[serde(serialize_with = "ascii_pair")]
    pub new_licensee_code: [u8; 2],
    pub sgb_flag: u8,
    pub cart_type: u8,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub destination_code: u8,
    pub old_licensee_code: u8,
    pub version: u8,
    pub header_checksum: u8,
    /// Raw value only, never verified.
    pub global_checksum: u16,
}

fn ascii_pair<S: Serializer>(code: &[u8; 2], s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&code.escape_ascii())
}

impl From<&CartridgeHeader<'_>> for HeaderFields {
    fn from(h: &CartridgeHeader<'_>) -> Self {
        Self {
            entry_point: *h.entry_point(),
            title: h.title().into_owned(),
            manufacturer_code: h.manufacturer_code().map(str::to_owned),
            cgb_flag: h.cgb_flag(),
            new_licensee_code: h.new_licensee_code(),
            sgb_flag: h.sgb_flag(),
            cart_type: h.cart_type(),
            rom_size_code: h.rom_size_code(),
            ram_size_code: h.ram_size_code(),
            destination_code: h.destination_code(),
            old_licensee_code: h.old_licensee_code(),
            version: h.version(),
            header_checksum: h.header_checksum(),
            global_checksum: h.global_checksum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub filename: String,
    pub file_size: usize,
    pub header: HeaderFields,
    pub validation: ValidationOutcome,
    pub metadata: ResolvedMetadata,
    /// `None` when the header's size code is unknown.
    pub size_matches_header: Option<bool>,
}

impl LoadReport {
    /// Logo and file layout are sound. The header checksum does not count.
    pub fn is_valid(&self) -> bool {
        self.validation.logo_valid
    }
}

fn pass_fail(ok: bool) -> &'static str {
    if ok {
        "PASSED"
    } else {
        "FAILED"
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        let m = &self.metadata;
        let v = &self.validation;

        writeln!(f, "Cartridge: {} ({} bytes)", self.filename, self.file_size)?;
        writeln!(f, "\t Title        : {}", h.title)?;
        if let Some(code) = &h.manufacturer_code {
            writeln!(f, "\t Manufacturer : {}", code)?;
        }
        writeln!(f, "\t Type         : {:02X} ({})", h.cart_type, m.cart_type_name)?;
        match m.rom_size_kib {
            Some(kib) => writeln!(f, "\t ROM Size     : {} KB", kib)?,
            None => writeln!(f, "\t ROM Size     : UNKNOWN (code {:02X})", h.rom_size_code)?,
        }
        writeln!(f, "\t RAM Size     : {:02X} ({})", h.ram_size_code, m.ram_size_label)?;
        writeln!(
            f,
            "\t New LIC Code : \"{}\"",
            h.new_licensee_code.escape_ascii()
        )?;
        writeln!(f, "\t Old LIC Code : {:02X}", h.old_licensee_code)?;
        writeln!(f, "\t Licensee     : {}", m.licensee_name)?;
        writeln!(f, "\t CGB / SGB    : {:?} / {}", m.cgb_support, m.sgb_support)?;
        writeln!(f, "\t Destination  : {:?}", m.destination)?;
        writeln!(f, "\t ROM Version  : {:02X}", h.version)?;
        writeln!(f, "\t Logo         : {}", pass_fail(v.logo_valid))?;
        writeln!(
            f,
            "\t Checksum     : {:02X} ({})",
            v.computed_checksum,
            pass_fail(v.header_checksum_valid)
        )?;
        write!(f, "\t Global Sum   : {:04X}", h.global_checksum)
    }
}
