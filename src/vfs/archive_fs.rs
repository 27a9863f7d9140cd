//! Read-mostly VFS backing over an archive member index.

use anyhow::anyhow;

use crate::core::{Result, VfsBackend};
use crate::vfs::{ArchiveMember, DirEntry, EntryKind, VfsIndex};

/// Archive-backed VFS variant.
///
/// Mirrors the opened archive: structure is fixed for the life of the
/// process. Only the `owner` field of individual entries may change
/// (ownership emulation); directory removal is rejected as read-only.
pub struct ArchiveFS {
    index: VfsIndex,
}

impl ArchiveFS {
    /// Builds the backing from an ordered archive member list.
    pub fn from_members(members: Vec<ArchiveMember>) -> ArchiveFS {
        ArchiveFS {
            index: VfsIndex::from_members(members),
        }
    }

    pub fn index(&self) -> &VfsIndex {
        &self.index
    }
}

impl VfsBackend for ArchiveFS {
    fn exists(&self, path: &str) -> bool {
        self.index.exists(path)
    }

    fn kind(&self, path: &str) -> Option<EntryKind> {
        self.index.kind(path)
    }

    fn children(&self, path: &str) -> Vec<DirEntry> {
        self.index.children(path)
    }

    fn set_owner(&mut self, path: &str, owner: &str) -> Result<()> {
        self.index.set_owner(path, owner)
    }

    /// Always fails: the archive-backed variant never drops entries.
    fn remove_dir(&mut self, path: &str) -> Result<()> {
        Err(anyhow!(
            "{} is read-only",
            if path.is_empty() { "/" } else { path }
        ))
    }
}
