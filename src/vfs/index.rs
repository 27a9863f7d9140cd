//! Flat path index over an archive's member list.
//!
//! Mapping a flat member enumeration onto a tree-like API is an indexing
//! problem, not a structural tree: the index keeps one map from canonical
//! path to entry plus the original member order, and answers child listings
//! with prefix and segment-count queries. No pointer-based tree is built.

use std::collections::HashMap;

use anyhow::anyhow;

use crate::core::{Result, utils};
use crate::vfs::{ArchiveMember, DirEntry, EntryKind, VfsEntry};

/// Path-keyed index built once from an archive's ordered member list.
///
/// ### Internal state
///
/// * `entries` — canonical path → [`VfsEntry`]. Keys never start with a
///   separator and contain no `.`/`..` segments; the root (`""`) is implicit
///   and has no entry of its own.
/// * `order` — the canonical keys in archive enumeration order. Listings
///   iterate this vector, so `ls` preserves archive order instead of
///   sorting alphabetically.
///
/// ### Invariants
///
/// 1. `entries` and `order` hold exactly the same key set.
/// 2. Later duplicate member names overwrite earlier entries (archive order
///    wins for metadata), keeping the first order slot.
/// 3. Every ancestor of a key is itself a key: ancestors the archive omitted
///    are synthesized as directories when the first member implying them is
///    inserted.
///
/// ### Lifecycle
///
/// Created once when the archive is opened and never rebuilt. Only `owner`
/// field mutation (`set_owner`) and empty-directory removal (`remove_dir`)
/// touch it afterwards.
#[derive(Debug, Default)]
pub struct VfsIndex {
    entries: HashMap<String, VfsEntry>,
    order: Vec<String>,
}

impl VfsIndex {
    /// Builds the index from an ordered sequence of archive members.
    ///
    /// Member names are normalized first; names that normalize to the root
    /// (for example a bare `/` member) are dropped.
    pub fn from_members(members: Vec<ArchiveMember>) -> VfsIndex {
        let mut index = VfsIndex::default();

        for member in members {
            let key = utils::normalize(&member.path);
            if key.is_empty() {
                continue;
            }
            index.insert_ancestors(&key);
            index.insert(key, VfsEntry::new(member.kind, member.mode, member.owner));
        }

        index
    }

    /// Synthesizes directory entries for ancestors the archive omitted.
    fn insert_ancestors(&mut self, key: &str) {
        for (pos, _) in key.match_indices('/') {
            let prefix = &key[..pos];
            if !self.entries.contains_key(prefix) {
                self.insert(
                    prefix.to_string(),
                    VfsEntry::new(EntryKind::Directory, 0o755, ""),
                );
            }
        }
    }

    fn insert(&mut self, key: String, entry: VfsEntry) {
        if self.entries.insert(key.clone(), entry).is_none() {
            self.order.push(key);
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        path.is_empty() || self.entries.contains_key(path)
    }

    /// Returns the entry kind; the root is always a directory.
    pub fn kind(&self, path: &str) -> Option<EntryKind> {
        if path.is_empty() {
            return Some(EntryKind::Directory);
        }
        self.entries.get(path).map(|e| e.kind())
    }

    pub fn entry(&self, path: &str) -> Option<&VfsEntry> {
        self.entries.get(path)
    }

    /// Lists the immediate children of `dir`, in archive member order.
    ///
    /// An entry is a child iff its key starts with `dir` (empty prefix for
    /// the root) and the remainder after the prefix and one separator holds
    /// no further separator. A missing or file `dir` lists as empty.
    pub fn children(&self, dir: &str) -> Vec<DirEntry> {
        self.order
            .iter()
            .filter_map(|key| {
                let rest = if dir.is_empty() {
                    key.as_str()
                } else {
                    key.strip_prefix(dir)?.strip_prefix('/')?
                };
                if rest.is_empty() || rest.contains('/') {
                    return None;
                }
                let entry = &self.entries[key];
                Some(DirEntry {
                    name: rest.to_string(),
                    kind: entry.kind(),
                    mode: entry.mode(),
                    owner: entry.owner().to_string(),
                })
            })
            .collect()
    }

    /// Changes the owner of a file entry in place.
    pub fn set_owner(&mut self, path: &str, owner: &str) -> Result<()> {
        match self.entries.get_mut(path) {
            None => Err(anyhow!("{} does not exist", display(path))),
            Some(entry) if entry.is_dir() => Err(anyhow!("{} is not a file", display(path))),
            Some(entry) => {
                entry.set_owner(owner);
                Ok(())
            }
        }
    }

    /// Removes an empty directory from the index.
    pub fn remove_dir(&mut self, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(anyhow!("the root cannot be removed"));
        }
        match self.kind(path) {
            None => return Err(anyhow!("{} does not exist", display(path))),
            Some(EntryKind::File) => {
                return Err(anyhow!("{} is not a directory", display(path)));
            }
            Some(EntryKind::Directory) => {}
        }
        if !self.children(path).is_empty() {
            return Err(anyhow!("{} is not empty", display(path)));
        }

        self.entries.remove(path);
        self.order.retain(|key| key != path);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders a canonical key for error messages (root as `/`).
fn display(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(path: &str, kind: EntryKind, mode: u32, owner: &str) -> ArchiveMember {
        ArchiveMember {
            path: path.to_string(),
            kind,
            mode,
            owner: owner.to_string(),
        }
    }

    /// Mirrors the fixture archive: one top-level folder with a subfolder
    /// and two files.
    fn fixture() -> VfsIndex {
        VfsIndex::from_members(vec![
            member("root_folder/", EntryKind::Directory, 0o755, ""),
            member("root_folder/another_folder/", EntryKind::Directory, 0o755, ""),
            member("root_folder/test.py", EntryKind::File, 0o644, ""),
            member("root_folder/example.txt", EntryKind::File, 0o644, ""),
        ])
    }

    mod build {
        use super::*;

        #[test]
        fn test_keys_are_normalized() {
            let index = VfsIndex::from_members(vec![
                member("./a//b/", EntryKind::Directory, 0o755, ""),
                member("/a/c.txt", EntryKind::File, 0o644, ""),
            ]);
            assert!(index.exists("a/b"));
            assert!(index.exists("a/c.txt"));
            assert!(!index.exists("/a/b"));
        }

        #[test]
        fn test_duplicate_member_overwrites_metadata() {
            let index = VfsIndex::from_members(vec![
                member("a.txt", EntryKind::File, 0o600, "alice"),
                member("b.txt", EntryKind::File, 0o644, ""),
                member("a.txt", EntryKind::File, 0o644, "bob"),
            ]);
            assert_eq!(index.len(), 2);
            assert_eq!(index.entry("a.txt").unwrap().owner(), "bob");
            // first order slot is kept
            let names: Vec<_> = index.children("").into_iter().map(|c| c.name).collect();
            assert_eq!(names, vec!["a.txt", "b.txt"]);
        }

        #[test]
        fn test_omitted_ancestors_are_synthesized() {
            let index = VfsIndex::from_members(vec![member(
                "deep/nested/file.txt",
                EntryKind::File,
                0o644,
                "",
            )]);
            assert_eq!(index.kind("deep"), Some(EntryKind::Directory));
            assert_eq!(index.kind("deep/nested"), Some(EntryKind::Directory));
            assert_eq!(index.entry("deep").unwrap().mode(), 0o755);
        }

        #[test]
        fn test_root_member_is_dropped() {
            let index = VfsIndex::from_members(vec![
                member("/", EntryKind::Directory, 0o755, ""),
                member("a.txt", EntryKind::File, 0o644, ""),
            ]);
            assert_eq!(index.len(), 1);
            assert_eq!(index.kind(""), Some(EntryKind::Directory));
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn test_kind() {
            let index = fixture();
            assert_eq!(index.kind(""), Some(EntryKind::Directory));
            assert_eq!(index.kind("root_folder"), Some(EntryKind::Directory));
            assert_eq!(index.kind("root_folder/test.py"), Some(EntryKind::File));
            assert_eq!(index.kind("missing"), None);
        }

        #[test]
        fn test_children_of_root_are_top_level_only() {
            let index = fixture();
            let children = index.children("");
            assert_eq!(children.len(), 1);
            assert_eq!(children[0].name, "root_folder");
            assert!(children[0].is_dir());
        }

        #[test]
        fn test_children_preserve_archive_order() {
            let index = fixture();
            let names: Vec<_> = index
                .children("root_folder")
                .into_iter()
                .map(|c| c.name)
                .collect();
            assert_eq!(names, vec!["another_folder", "test.py", "example.txt"]);
        }

        #[test]
        fn test_children_of_file_or_missing_are_empty() {
            let index = fixture();
            assert!(index.children("root_folder/test.py").is_empty());
            assert!(index.children("missing").is_empty());
        }

        #[test]
        fn test_children_do_not_leak_prefix_siblings() {
            // "root_folder2" merely shares a string prefix with "root_folder"
            let index = VfsIndex::from_members(vec![
                member("root_folder/", EntryKind::Directory, 0o755, ""),
                member("root_folder2/", EntryKind::Directory, 0o755, ""),
                member("root_folder2/inner.txt", EntryKind::File, 0o644, ""),
            ]);
            assert!(index.children("root_folder").is_empty());
            assert_eq!(index.children("root_folder2").len(), 1);
        }
    }

    mod mutation {
        use super::*;

        #[test]
        fn test_set_owner_on_file() {
            let mut index = fixture();
            index.set_owner("root_folder/test.py", "user1").unwrap();
            assert_eq!(index.entry("root_folder/test.py").unwrap().owner(), "user1");
        }

        #[test]
        fn test_set_owner_on_directory_fails() {
            let mut index = fixture();
            let err = index.set_owner("root_folder", "user1").unwrap_err();
            assert!(err.to_string().contains("is not a file"));
            assert_eq!(index.entry("root_folder").unwrap().owner(), "");
        }

        #[test]
        fn test_set_owner_missing_fails() {
            let mut index = fixture();
            let err = index.set_owner("nope", "user1").unwrap_err();
            assert!(err.to_string().contains("does not exist"));
        }

        #[test]
        fn test_remove_dir_requires_empty() {
            let mut index = fixture();
            let err = index.remove_dir("root_folder").unwrap_err();
            assert!(err.to_string().contains("is not empty"));
            assert!(index.exists("root_folder"));
        }

        #[test]
        fn test_remove_empty_dir() {
            let mut index = fixture();
            index.remove_dir("root_folder/another_folder").unwrap();
            assert_eq!(index.kind("root_folder/another_folder"), None);
            let names: Vec<_> = index
                .children("root_folder")
                .into_iter()
                .map(|c| c.name)
                .collect();
            assert_eq!(names, vec!["test.py", "example.txt"]);
        }

        #[test]
        fn test_remove_dir_on_file_fails() {
            let mut index = fixture();
            let err = index.remove_dir("root_folder/test.py").unwrap_err();
            assert!(err.to_string().contains("is not a directory"));
        }

        #[test]
        fn test_remove_root_fails() {
            let mut index = fixture();
            assert!(index.remove_dir("").is_err());
        }
    }
}
