use crate::CoreError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

const COPY_CHUNK: usize = 8 * 1024;

/// Recursively mirror `source` into `target`.
///
/// A directory source is walked entry by entry, creating destination
/// directories as needed; a file source is byte-copied in fixed-size chunks.
/// No exclusion patterns and no symlink special-casing. A failure partway
/// through leaves `target` partially populated; the caller decides whether
/// to clean up.
pub fn copy_recursive(source: &Path, target: &Path) -> Result<(), CoreError> {
    if source.is_dir() {
        copy_dir(source, target)
    } else {
        copy_file(source, target)
    }
}

fn copy_dir(source: &Path, target: &Path) -> Result<(), CoreError> {
    if !target.exists() {
        fs::create_dir_all(target).map_err(|e| copy_err(source, target, e))?;
    }
    for entry in fs::read_dir(source).map_err(|e| copy_err(source, target, e))? {
        let entry = entry.map_err(|e| copy_err(source, target, e))?;
        copy_recursive(&entry.path(), &target.join(entry.file_name()))?;
    }
    Ok(())
}

fn copy_file(source: &Path, target: &Path) -> Result<(), CoreError> {
    let mut reader = File::open(source).map_err(|e| copy_err(source, target, e))?;
    let mut writer = File::create(target).map_err(|e| copy_err(source, target, e))?;
    let mut buf = [0u8; COPY_CHUNK];
    loop {
        let n = reader.read(&mut buf).map_err(|e| copy_err(source, target, e))?;
        if n == 0 {
            break;
        }
        writer
            .write_all(&buf[..n])
            .map_err(|e| copy_err(source, target, e))?;
    }
    writer.flush().map_err(|e| copy_err(source, target, e))?;
    Ok(())
}

fn copy_err(from: &Path, to: &Path, source: std::io::Error) -> CoreError {
    CoreError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    }
}
