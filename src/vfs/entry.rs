/// Kind of a VFS entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry in the VFS index.
///
/// `mode` carries the archive's permission bits (informational only, never
/// enforced). `owner` defaults to the archive-embedded owner where the format
/// records one (tar), otherwise it stays empty until a `chown`.
#[derive(Debug, Clone, PartialEq)]
pub struct VfsEntry {
    kind: EntryKind,
    mode: u32,
    owner: String,
}

impl VfsEntry {
    pub fn new(kind: EntryKind, mode: u32, owner: impl Into<String>) -> VfsEntry {
        VfsEntry {
            kind,
            mode,
            owner: owner.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn mode(&self) -> u32 {
        self.mode
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A directory entry returned by a child listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    /// Name of the entry (last path segment, not the full key).
    pub name: String,
    pub kind: EntryKind,
    pub mode: u32,
    pub owner: String,
}

impl DirEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// One member descriptor read from an opened archive, before normalization.
#[derive(Debug, Clone)]
pub struct ArchiveMember {
    /// Member name as stored in the archive (may carry trailing slashes).
    pub path: String,
    pub kind: EntryKind,
    /// Permission bits, already masked to `0o777`.
    pub mode: u32,
    /// Archive-embedded owner, empty when the format has none.
    pub owner: String,
}
