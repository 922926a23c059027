//! Filesystem copy and move primitives behind `cp` and `mv`.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Copies a file's contents, permission bits and timestamps.
pub fn copy_file(source: &Path, target: &Path) -> io::Result<()> {
    fs::copy(source, target)?;

    let metadata = fs::metadata(source)?;
    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    File::open(target)?.set_times(times)
}

/// Copies `source` into `target`, creating it if needed and merging into
/// whatever is already there. Files at the same relative path are
/// overwritten; symlinks are recreated rather than followed.
pub fn copy_tree(source: &Path, target: &Path) -> io::Result<()> {
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let destination = target.join(relative);
        let file_type = entry.file_type();

        if entry.depth() == 0 || file_type.is_dir() {
            fs::create_dir_all(&destination)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &destination)?;
        } else {
            copy_file(entry.path(), &destination)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
pub fn copy_symlink(source: &Path, target: &Path) -> io::Result<()> {
    let link = fs::read_link(source)?;
    if fs::symlink_metadata(target).is_ok() {
        fs::remove_file(target)?;
    }
    std::os::unix::fs::symlink(link, target)
}

#[cfg(not(unix))]
pub fn copy_symlink(source: &Path, target: &Path) -> io::Result<()> {
    if source.is_dir() {
        copy_tree(source, target)
    } else {
        copy_file(source, target)
    }
}

/// Renames `source` to `target`, falling back to copy and delete when
/// they live on different filesystems.
pub fn move_path(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(err) if is_cross_device(&err) => {
            debug!(
                source = %source.display(),
                target = %target.display(),
                "rename crosses devices, copying instead"
            );
            copy_then_delete(source, target)
        }
        Err(err) => Err(err),
    }
}

fn copy_then_delete(source: &Path, target: &Path) -> io::Result<()> {
    let file_type = fs::symlink_metadata(source)?.file_type();
    if file_type.is_symlink() {
        copy_symlink(source, target)?;
        fs::remove_file(source)
    } else if file_type.is_dir() {
        copy_tree(source, target)?;
        fs::remove_dir_all(source).inspect_err(|e| {
            warn!(source = %source.display(), "copied but could not remove source: {e}")
        })
    } else {
        copy_file(source, target)?;
        fs::remove_file(source)
    }
}

#[cfg(unix)]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(windows)]
fn is_cross_device(err: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    err.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_err: &io::Error) -> bool {
    false
}
