//! Client asset bundling module
//!
//! Seeds a fresh snapshot directory with the bundled static client tree
//! before any crawling happens.

use std::fs;
use std::io;
use std::path::Path;

/// Copy the client asset tree into a newly created `out_dir`.
///
/// The output directory must not exist yet; an existing snapshot is never
/// overwritten. The source directory is probed first, so a missing asset
/// tree fails before anything is created. Returns the number of files
/// copied.
pub fn copy_client_assets(assets_dir: &Path, out_dir: &Path) -> io::Result<usize> {
    let entries = fs::read_dir(assets_dir)?;
    fs::create_dir(out_dir)?;
    copy_entries(entries, out_dir)
}

fn copy_entries(entries: fs::ReadDir, to: &Path) -> io::Result<usize> {
    let mut copied = 0;
    for entry in entries {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            fs::create_dir(&target)?;
            copied += copy_entries(fs::read_dir(entry.path())?, &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
