/// What kind of filesystem object an entry is. Symlinks are not followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

impl EntryKind {
    pub fn icon(self) -> &'static str {
        match self {
            EntryKind::File => "\u{1F4C4}",
            EntryKind::Dir => "\u{1F4C1}",
            EntryKind::Symlink => "\u{1F517}",
        }
    }
}

/// One directory entry as reported by the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub kind: EntryKind,
}

impl EntryInfo {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        EntryInfo {
            name: name.into(),
            kind,
        }
    }

    /// Dot-prefixed names are hidden from the listing
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}
