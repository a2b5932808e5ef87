use std::fs;
use std::path::Path;

use crate::model::{EntryInfo, EntryKind};

/// List the entries of `dir`, sorted by name. Hidden entries are included;
/// filtering them is up to the caller.
pub fn list_entries(dir: &Path) -> std::io::Result<Vec<EntryInfo>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        entries.push(EntryInfo::new(
            entry.file_name().to_string_lossy().into_owned(),
            kind,
        ));
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
