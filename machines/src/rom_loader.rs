//! ROM loading and validation for the DMG.
//!
//! A cartridge image is a single file whose bytes land at offset 0 of the
//! flat address space, so the only structural validation is the size cap.
//! No header parsing happens at this layer.

use std::path::Path;

/// Largest ROM image that fits the flat 64 KiB address space.
pub const ROM_MAX: usize = 0x1_0000;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a ROM image.
#[derive(Debug)]
pub enum RomLoadError {
    /// Underlying I/O error (file not found, permission denied, etc.)
    Io(std::io::Error),

    /// ROM image does not fit the 64 KiB address space.
    Oversize { size: usize },
}

impl std::fmt::Display for RomLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Oversize { size } => write!(
                f,
                "ROM is {size} bytes, larger than the {ROM_MAX}-byte address space"
            ),
        }
    }
}

impl std::error::Error for RomLoadError {}

impl From<std::io::Error> for RomLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Validate a ROM image already in memory (ZIP extraction, tests).
pub fn from_bytes(data: Vec<u8>) -> Result<Vec<u8>, RomLoadError> {
    if data.len() > ROM_MAX {
        return Err(RomLoadError::Oversize { size: data.len() });
    }
    Ok(data)
}

/// Read a whole ROM image from disk, validating its size.
pub fn load(path: &Path) -> Result<Vec<u8>, RomLoadError> {
    from_bytes(std::fs::read(path)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
