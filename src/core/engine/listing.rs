//! Directory entries and their `ls -l` style details.

use std::fmt;
use std::fs::{self, DirEntry, Metadata};
use std::io;
use std::time::SystemTime;

use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub details: Option<EntryDetails>,
}

/// Owner and group are `None` where the platform has no such concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetails {
    pub permissions: String,
    pub owner: Option<String>,
    pub group: Option<String>,
    pub size: u64,
    pub accessed: Option<SystemTime>,
}

impl ListEntry {
    pub(super) fn from_dir_entry(entry: &DirEntry, detailed: bool) -> io::Result<Self> {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !detailed {
            return Ok(ListEntry {
                name,
                details: None,
            });
        }

        // follow links like `stat`, but still describe dangling ones
        let path = entry.path();
        let metadata = fs::metadata(&path).or_else(|_| fs::symlink_metadata(&path))?;
        Ok(ListEntry {
            name,
            details: Some(EntryDetails::from_metadata(&metadata)),
        })
    }
}

impl EntryDetails {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let (owner, group) = owner_and_group(metadata);
        EntryDetails {
            permissions: permission_string(metadata),
            owner,
            group,
            size: metadata.len(),
            accessed: metadata.accessed().ok(),
        }
    }
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(details) = &self.details else {
            return write!(f, "{}", self.name);
        };

        write!(f, "{}\t", details.permissions)?;
        if let Some(owner) = &details.owner {
            write!(f, "{owner}\t")?;
        }
        if let Some(group) = &details.group {
            write!(f, "{group}\t")?;
        }
        let accessed = details
            .accessed
            .map(|time| DateTime::<Local>::from(time).format("%a %b %e %H:%M:%S %Y").to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(f, "{}\t{}\t{}", details.size, accessed, self.name)
    }
}

#[cfg(unix)]
fn permission_string(metadata: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    mode_string(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn permission_string(metadata: &Metadata) -> String {
    let kind = if metadata.is_dir() { 'd' } else { '-' };
    let bits = if metadata.permissions().readonly() { "r-xr-xr-x" } else { "rwxrwxrwx" };
    format!("{kind}{bits}")
}

/// Renders a raw `st_mode` the way `ls -l` does.
#[cfg(unix)]
pub fn mode_string(mode: u32) -> String {
    let kind = match mode & libc::S_IFMT as u32 {
        m if m == libc::S_IFDIR as u32 => 'd',
        m if m == libc::S_IFLNK as u32 => 'l',
        m if m == libc::S_IFCHR as u32 => 'c',
        m if m == libc::S_IFBLK as u32 => 'b',
        m if m == libc::S_IFIFO as u32 => 'p',
        m if m == libc::S_IFSOCK as u32 => 's',
        _ => '-',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    // (read, write, exec, special bit, special char)
    let triads = [
        (0o400, 0o200, 0o100, 0o4000, 's'),
        (0o040, 0o020, 0o010, 0o2000, 's'),
        (0o004, 0o002, 0o001, 0o1000, 't'),
    ];
    for (read, write, exec, special, mark) in triads {
        out.push(if mode & read != 0 { 'r' } else { '-' });
        out.push(if mode & write != 0 { 'w' } else { '-' });
        out.push(match (mode & exec != 0, mode & special != 0) {
            (true, true) => mark,
            (false, true) => mark.to_ascii_uppercase(),
            (true, false) => 'x',
            (false, false) => '-',
        });
    }
    out
}

#[cfg(unix)]
fn owner_and_group(metadata: &Metadata) -> (Option<String>, Option<String>) {
    use std::os::unix::fs::MetadataExt;

    let uid = metadata.uid();
    let gid = metadata.gid();
    (
        Some(user_name(uid).unwrap_or_else(|| uid.to_string())),
        Some(group_name(gid).unwrap_or_else(|| gid.to_string())),
    )
}

#[cfg(not(unix))]
fn owner_and_group(_metadata: &Metadata) -> (Option<String>, Option<String>) {
    (None, None)
}

#[cfg(unix)]
fn user_name(uid: u32) -> Option<String> {
    let mut buf = vec![0 as libc::c_char; 4096];
    let mut entry: libc::passwd = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::passwd = std::ptr::null_mut();

    let rc = unsafe { libc::getpwuid_r(uid, &mut entry, buf.as_mut_ptr(), buf.len(), &mut result) };
    if rc != 0 || result.is_null() || entry.pw_name.is_null() {
        return None;
    }
    let name = unsafe { std::ffi::CStr::from_ptr(entry.pw_name) };
    Some(name.to_string_lossy().into_owned())
}

#[cfg(unix)]
fn group_name(gid: u32) -> Option<String> {
    let mut buf = vec![0 as libc::c_char; 4096];
    let mut entry: libc::group = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::group = std::ptr::null_mut();

    let rc = unsafe { libc::getgrgid_r(gid, &mut entry, buf.as_mut_ptr(), buf.len(), &mut result) };
    if rc != 0 || result.is_null() || entry.gr_name.is_null() {
        return None;
    }
    let name = unsafe { std::ffi::CStr::from_ptr(entry.gr_name) };
    Some(name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[cfg(unix)]
    #[test]
    fn test_mode_string() {
        assert_eq!(mode_string(0o040755), "drwxr-xr-x");
        assert_eq!(mode_string(0o100644), "-rw-r--r--");
        assert_eq!(mode_string(0o120777), "lrwxrwxrwx");
        assert_eq!(mode_string(0o104755), "-rwsr-xr-x");
        assert_eq!(mode_string(0o041777), "drwxrwxrwt");
        assert_eq!(mode_string(0o102644), "-rw-r-Sr--");
    }

    #[test]
    fn test_plain_entry_renders_name_only() {
        let entry = ListEntry {
            name: "file.txt".to_string(),
            details: None,
        };
        assert_eq!(entry.to_string(), "file.txt");
    }

    #[test]
    fn test_detailed_entry_skips_missing_owner() {
        let entry = ListEntry {
            name: "file.txt".to_string(),
            details: Some(EntryDetails {
                permissions: "-rw-r--r--".to_string(),
                owner: None,
                group: None,
                size: 4,
                accessed: None,
            }),
        };
        assert_eq!(entry.to_string(), "-rw-r--r--\t4\t-\tfile.txt");
    }

    #[test]
    fn test_detailed_entry_with_owner() {
        let entry = ListEntry {
            name: "data".to_string(),
            details: Some(EntryDetails {
                permissions: "drwxr-xr-x".to_string(),
                owner: Some("alice".to_string()),
                group: Some("staff".to_string()),
                size: 4096,
                accessed: None,
            }),
        };
        assert_eq!(entry.to_string(), "drwxr-xr-x\talice\tstaff\t4096\t-\tdata");
    }
}
