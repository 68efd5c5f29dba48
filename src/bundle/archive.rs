//! Tar archive access for bundles and namespace locations
//!
//! Archives may be plain tar or gzip-compressed tar; compression is detected
//! from the magic bytes, not the file extension. Only regular file entries are
//! visible, addressed by their normalized forward-slash names.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

use crate::path_utils::{normalize_entry_name, to_forward_slashes};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open an archive for one sequential pass over its entries
pub fn open_archive(path: &Path) -> io::Result<Archive<Box<dyn Read>>> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 2];
    let read = file.read(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;

    let reader: Box<dyn Read> = if read == GZIP_MAGIC.len() && magic == GZIP_MAGIC {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(Archive::new(reader))
}

/// Visit every regular file entry until `visit` returns `false`
pub fn for_each_entry<F>(path: &Path, mut visit: F) -> io::Result<()>
where
    F: FnMut(&str, &mut dyn Read) -> io::Result<bool>,
{
    let mut archive = open_archive(path)?;
    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = normalize_entry_name(&to_forward_slashes(&entry.path()?));
        if !visit(&name, &mut entry)? {
            break;
        }
    }
    Ok(())
}

/// Names of all regular file entries
pub fn entry_names(path: &Path) -> io::Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for_each_entry(path, |name, _| {
        names.insert(name.to_string());
        Ok(true)
    })?;
    Ok(names)
}

/// Stream one entry into `dest`, returning the number of bytes copied.
///
/// Fails with [`io::ErrorKind::NotFound`] when the archive has no such entry.
pub fn copy_entry(path: &Path, entry: &str, dest: &mut dyn Write) -> io::Result<u64> {
    let mut copied = None;
    for_each_entry(path, |name, reader| {
        if name == entry {
            copied = Some(io::copy(reader, &mut *dest)?);
            return Ok(false);
        }
        Ok(true)
    })?;

    copied.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("entry '{entry}' not found in {}", path.display()),
        )
    })
}
