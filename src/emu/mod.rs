// cartridge loading and header inspection
mod cart;
mod error;
mod header;
mod licensee;
mod meta;
mod report;
mod rom;
mod validate;

#[cfg(test)]
mod testutil;

pub use cart::{inspect, load, Cartridge};
pub use error::{LayoutError, LoadError};
pub use header::{view, CartridgeHeader, CgbSupport, Destination};
pub use licensee::{licensee_name, new_licensee_name, old_licensee_name};
pub use meta::{cart_type_name, ram_size_kib, ram_size_label, ResolvedMetadata};
pub use report::{HeaderFields, LoadReport};
pub use rom::RomImage;
pub use validate::{header_checksum, validate, ValidationOutcome, NINTENDO_LOGO};
