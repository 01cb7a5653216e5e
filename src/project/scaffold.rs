use crate::error::GenerateError;
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Entry names skipped at any depth: build caches, version control,
/// installed dependencies and the dependency lock file.
pub const EXCLUDED: &[&str] = &[".git", ".next", ".turbo", "node_modules", "package-lock.json"];

pub fn is_excluded(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED.contains(&name))
}

/// Mirror `src` into `dest`, overwriting files that already exist.
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<u64, GenerateError> {
    if !src.is_dir() {
        return Err(GenerateError::io(
            src,
            std::io::Error::new(std::io::ErrorKind::NotFound, "scaffold directory not found"),
        ));
    }

    let mut copied = 0u64;
    let walker = WalkDir::new(src)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e));
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(src, e))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| GenerateError::io(entry.path(), std::io::Error::other(e)))?;
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| GenerateError::io(&target, e))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| GenerateError::io(entry.path(), e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

pub(crate) fn walk_error(root: &Path, err: walkdir::Error) -> GenerateError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("file system loop"));
    GenerateError::io(path, source)
}
