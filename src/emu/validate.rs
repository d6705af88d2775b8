// structural checks: boot logo and header checksum
use serde::Serialize;

use super::header::{CartridgeHeader, LOGO_LEN};

/// Bitmap the boot ROM compares against 0x0104..0x0134.
pub const NINTENDO_LOGO: [u8; LOGO_LEN] = [
    0xCE, 0xED, 0x66, 0x66, 0xCC, 0x0D, 0x00, 0x0B, 0x03, 0x73, 0x00, 0x83, 0x00, 0x0C, 0x00, 0x0D,
    0x00, 0x08, 0x11, 0x1F, 0x88, 0x89, 0x00, 0x0E, 0xDC, 0xCC, 0x6E, 0xE6, 0xDD, 0xDD, 0xD9, 0x99,
    0xBB, 0xBB, 0x67, 0x63, 0x6E, 0x0E, 0xEC, 0xCC, 0xDD, 0xDC, 0x99, 0x9F, 0xBB, 0xB9, 0x33, 0x3E,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub logo_valid: bool,
    pub header_checksum_valid: bool,
    pub computed_checksum: u8,
}

/// `c = c - b - 1` over title..version, wrapping, seeded at 0.
pub fn header_checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0u8, |c, &b| c.wrapping_sub(b).wrapping_sub(1))
}

pub fn logo_valid(header: &CartridgeHeader<'_>) -> bool {
    header.logo() == &NINTENDO_LOGO
}

/// Runs both checks. The header already borrows the image, so the checksum
/// is computed over the same bytes the boot ROM would read.
pub fn validate(header: &CartridgeHeader<'_>) -> ValidationOutcome {
    let computed_checksum = header_checksum(header.checksummed_bytes());
    ValidationOutcome {
        logo_valid: logo_valid(header),
        header_checksum_valid: computed_checksum == header.header_checksum(),
        computed_checksum,
    }
}
