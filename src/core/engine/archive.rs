//! ZIP output for the `zip` command.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};

use walkdir::WalkDir;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes every entry below `folder` into a new archive at `archive`,
/// named relative to `folder`. Returns the number of entries written.
///
/// `archive` itself is skipped when it lives inside `folder`.
pub fn write_archive(folder: &Path, archive: &Path) -> ZipResult<usize> {
    let mut writer = ZipWriter::new(File::create(archive)?);
    let mut entries = 0;

    for entry in WalkDir::new(folder).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if entry.path() == archive {
            continue;
        }

        let name = entry_name(entry.path().strip_prefix(folder).map_err(io::Error::other)?);
        let options = entry_options(&entry.path().symlink_metadata()?);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            writer.add_directory(format!("{name}/"), options)?;
        } else if file_type.is_symlink() {
            let target = fs::read_link(entry.path())?;
            writer.add_symlink(name, target.to_string_lossy(), options)?;
        } else {
            writer.start_file(name, options)?;
            io::copy(&mut File::open(entry.path())?, &mut writer)?;
        }
        entries += 1;
    }

    writer.finish()?;
    Ok(entries)
}

/// Archive names always use `/`, whatever the host separator.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
fn entry_options(metadata: &fs::Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn entry_options(_metadata: &fs::Metadata) -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_entries_are_relative_to_folder() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("project");
        fs::create_dir_all(folder.join("src")).unwrap();
        fs::write(folder.join("README"), "hello").unwrap();
        fs::write(folder.join("src/lib.rs"), "fn main() {}").unwrap();
        let archive_path = temp.path().join("project.zip");

        let written = write_archive(&folder, &archive_path).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(written, 3);
        assert_eq!(names, vec!["README", "src/", "src/lib.rs"]);

        let mut content = String::new();
        archive
            .by_name("src/lib.rs")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "fn main() {}");
    }

    #[test]
    fn test_skips_archive_inside_folder() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        let archive_path = temp.path().join("self.zip");

        let written = write_archive(temp.path(), &archive_path).unwrap();

        let archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(written, 1);
        assert_eq!(archive.file_names().collect::<Vec<_>>(), vec!["a.txt"]);
    }

    #[test]
    fn test_empty_folder() {
        let temp = TempDir::new().unwrap();
        let folder = temp.path().join("empty");
        fs::create_dir(&folder).unwrap();
        let archive_path = temp.path().join("empty.zip");

        assert_eq!(write_archive(&folder, &archive_path).unwrap(), 0);
        assert_eq!(
            zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap().len(),
            0
        );
    }
}
