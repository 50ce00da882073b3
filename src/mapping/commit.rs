use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::MappingError;

/// Write `path` through a sibling temporary file renamed into place once
/// `fill` and the flush succeed. On failure the temporary is removed and
/// `path` is untouched.
pub(crate) fn write_atomically<F>(path: &Path, fill: F) -> Result<(), MappingError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let temp = temp_path(path);
    let result = File::create(&temp)
        .and_then(|file| {
            let mut out = BufWriter::new(file);
            fill(&mut out)?;
            out.flush()?;
            out.get_ref().sync_all()
        })
        .and_then(|()| fs::rename(&temp, path));

    result.map_err(|e| {
        let _ = fs::remove_file(&temp);
        MappingError::io(path, e)
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
