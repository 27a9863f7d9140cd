//! Mutable directory-tree VFS backing.

use crate::core::{Result, VfsBackend};
use crate::vfs::{ArchiveMember, DirEntry, EntryKind, VfsIndex};

/// Mutable directory-tree VFS variant.
///
/// Seeded from the same archive member list as [`crate::ArchiveFS`] but
/// honors structural mutation: empty directories can be removed, after which
/// their paths report not-found.
pub struct TreeFS {
    index: VfsIndex,
}

impl TreeFS {
    /// Builds the backing from an ordered archive member list.
    pub fn from_members(members: Vec<ArchiveMember>) -> TreeFS {
        TreeFS {
            index: VfsIndex::from_members(members),
        }
    }

    pub fn index(&self) -> &VfsIndex {
        &self.index
    }
}

impl VfsBackend for TreeFS {
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

    fn remove_dir(&mut self, path: &str) -> Result<()> {
        self.index.remove_dir(path)
    }
}
