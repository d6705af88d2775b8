// rom buffer: owns the raw image bytes
use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    path::Path,
};

use log::{debug, info};

use super::error::LoadError;

#[derive(Clone, Debug)]
pub struct RomImage {
    name: String,
    data: Vec<u8>,
}

impl RomImage {
    /// Reads the whole file at `path`. The handle is dropped before returning,
    /// on success and on every error path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|source| LoadError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Opened file {}", path.display());

        let data = read_all(&mut file, path)?;
        Ok(Self {
            name: path.display().to_string(),
            data,
        })
    }

    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Sizes the stream by seeking to its end, then reads exactly that many bytes.
fn read_all<R: Read + Seek>(r: &mut R, path: &Path) -> Result<Vec<u8>, LoadError> {
    let read_err = |source: io::Error| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let size = r.seek(SeekFrom::End(0)).map_err(read_err)? as usize;
    r.rewind().map_err(read_err)?;
    info!("{} reports {} bytes", path.display(), size);

    let mut data = vec![0u8; size];
    let mut filled = 0;
    while filled < size {
        match r.read(&mut data[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_err(e)),
        }
    }
    if filled < size {
        debug!("{}: stream ended after {} of {} bytes", path.display(), filled, size);
        return Err(LoadError::TruncatedImage {
            expected: size,
            actual: filled,
        });
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emu::testutil::TempRom;

    /// Claims `claimed` bytes when sized but only yields `data`.
    struct ShrinkingStream {
        data: io::Cursor<Vec<u8>>,
        claimed: u64,
    }

    impl Read for ShrinkingStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.data.read(buf)
        }
    }

    impl Seek for ShrinkingStream {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            match pos {
                SeekFrom::End(0) => Ok(self.claimed),
                other => self.data.seek(other),
            }
        }
    }

    #[test]
    fn short_read_is_truncated_image() {
        let mut stream = ShrinkingStream {
            data: io::Cursor::new(vec![0xAA; 23]),
            claimed: 4096,
        };
        match read_all(&mut stream, Path::new("shrinking.gb")) {
            Err(err @ LoadError::TruncatedImage { expected, actual }) => {
                assert_eq!(expected, 4096);
                assert_eq!(actual, 23);
                assert_eq!(
                    err.to_string(),
                    "truncated image (got 23 bytes, expected 4096)"
                );
            }
            other => panic!("expected TruncatedImage, got {:?}", other),
        }
    }

    #[test]
    fn read_all_takes_the_whole_stream() {
        let mut stream = io::Cursor::new(vec![1u8, 2, 3, 4]);
        stream.set_position(2);
        let data = read_all(&mut stream, Path::new("cursor.gb")).unwrap();
        assert_eq!(data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn load_reads_entire_file() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(0x8000).collect();
        let tmp = TempRom::new("rom_whole", &bytes);

        let rom = RomImage::load(tmp.path()).unwrap();
        assert_eq!(rom.len(), 0x8000);
        assert_eq!(rom.bytes(), &bytes[..]);
        assert_eq!(rom.name(), tmp.path().display().to_string());
    }

    #[test]
    fn load_missing_file_is_file_not_found() {
        let path = std::env::temp_dir().join("gb_cartinfo_does_not_exist.gb");
        match RomImage::load(&path) {
            Err(LoadError::FileNotFound { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn load_accepts_short_files() {
        // the size gate belongs to the header view, not the buffer
        let tmp = TempRom::new("rom_short", &[1, 2, 3]);
        let rom = RomImage::load(tmp.path()).unwrap();
        assert_eq!(rom.bytes(), &[1, 2, 3]);
        assert!(!rom.is_empty());
    }
}
