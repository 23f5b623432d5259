#![forbid(unsafe_code)]

use super::error::RegistryError;
use super::options::LoadOptions;
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

/// Every file under `root` carrying the configured extension, depth first,
/// siblings in file-name order.
pub(crate) fn collect_source_files(
    root: &Path,
    options: &LoadOptions,
) -> Result<Vec<PathBuf>, RegistryError> {
    let mut out = Vec::new();
    visit(root, options, &mut out)?;
    Ok(out)
}

fn visit(dir: &Path, options: &LoadOptions, out: &mut Vec<PathBuf>) -> Result<(), RegistryError> {
    let walk_err = |source| RegistryError::DirectoryWalk {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = std::fs::read_dir(dir)
        .map_err(walk_err)?
        .collect::<Result<Vec<DirEntry>, _>>()
        .map_err(walk_err)?;
    entries.sort_by_key(DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        // Symlinked directories are not followed.
        if entry.file_type().map_err(walk_err)?.is_dir() {
            visit(&path, options, out)?;
        } else if options.matches(&path) {
            out.push(path);
        }
    }
    Ok(())
}
