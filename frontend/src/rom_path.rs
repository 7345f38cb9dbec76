//! ROM path resolution: a raw cartridge image, or a ZIP archive containing
//! one. Either way the image is size-validated by the loader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use olivine_machines::rom_loader::{self, RomLoadError};

/// Load a ROM image from `path`. A `.zip` extension is resolved by
/// extracting the first cartridge image inside; anything else is read as a
/// raw image.
pub fn load_rom(path: &Path) -> Result<Vec<u8>, RomLoadError> {
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
    {
        return load_from_zip(path);
    }

    rom_loader::load(path)
}

/// Extract the first `.gb`/`.gbc`/`.bin` entry from a ZIP archive.
fn load_from_zip(path: &Path) -> Result<Vec<u8>, RomLoadError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut archive = zip::ZipArchive::new(reader).map_err(zip_error)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(zip_error)?;
        if !entry.is_file() {
            continue;
        }

        let name = entry.name().to_ascii_lowercase();
        if name.ends_with(".gb") || name.ends_with(".gbc") || name.ends_with(".bin") {
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;
            return rom_loader::from_bytes(data);
        }
    }

    Err(RomLoadError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("no ROM image found in {}", path.display()),
    )))
}

fn zip_error(e: zip::result::ZipError) -> RomLoadError {
    RomLoadError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("invalid ZIP: {e}"),
    ))
}
