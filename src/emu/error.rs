// loader error kinds
use std::{io, path::PathBuf};

use thiserror::Error;

use super::{header::HEADER_END, report::LoadReport};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("image is {len} bytes, too small to hold a cartridge header")]
    Truncated { len: usize },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("truncated image (got {actual} bytes, expected {expected})")]
    TruncatedImage { expected: usize, actual: usize },

    /// The diagnostic report is still attached so callers can show it.
    #[error("boot logo mismatch in {}, not a valid cartridge", .report.filename)]
    LogoMismatch { report: Box<LoadReport> },
}

impl From<LayoutError> for LoadError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::Truncated { len } => LoadError::TruncatedImage {
                expected: HEADER_END,
                actual: len,
            },
        }
    }
}
