use crate::error::GenerateError;
use crate::project::scaffold::{is_excluded, walk_error};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

const COMPRESSION_LEVEL: i64 = 9;

/// Zip every non-excluded file under `src` into `archive`, with paths
/// relative to `src`. Entries are written in sorted order with fixed
/// timestamps so identical trees give identical archives.
///
/// On error a partial archive may be left behind; discarding it is the
/// caller's job.
pub fn pack_tree(src: &Path, archive: &Path) -> Result<u64, GenerateError> {
    let file = File::create(archive).map_err(|e| GenerateError::io(archive, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL))
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let zip_err = |source| GenerateError::Archive {
        path: archive.to_path_buf(),
        source,
    };

    let mut added = 0u64;
    let walker = WalkDir::new(src)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e));
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(src, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry_name(src, entry.path())?;

        zip.start_file(name, options).map_err(zip_err)?;
        let mut input = File::open(entry.path()).map_err(|e| GenerateError::io(entry.path(), e))?;
        io::copy(&mut input, &mut zip).map_err(|e| GenerateError::io(entry.path(), e))?;
        added += 1;
    }

    zip.finish().map_err(zip_err)?;
    Ok(added)
}

/// Async wrapper: packs on the blocking pool and resolves once the archive
/// is fully written.
pub async fn pack(src: PathBuf, archive: PathBuf) -> Result<u64, GenerateError> {
    tokio::task::spawn_blocking(move || pack_tree(&src, &archive))
        .await
        .map_err(|e| GenerateError::ArchiveTask(e.to_string()))?
}

/// Archive entry name: relative path with `/` separators.
fn entry_name(root: &Path, path: &Path) -> Result<String, GenerateError> {
    let rel = path
        .strip_prefix(root)
        .map_err(|e| GenerateError::io(path, io::Error::other(e)))?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Ok(parts.join("/"))
}
