use crate::vfs::{DirEntry, EntryKind};

/// Capability interface shared by all VFS backings.
///
/// Paths are canonical slash-separated keys with no leading separator;
/// the empty string denotes the VFS root. Use [`utils::resolve`] to turn
/// user input (relative or absolute) into this form before calling in.
pub trait VfsBackend {
    /// Checks if a `path` exists in the VFS.
    fn exists(&self, path: &str) -> bool;

    /// Returns the entry kind, or `None` if `path` is not present.
    fn kind(&self, path: &str) -> Option<EntryKind>;

    /// Returns the immediate children of a directory, in archive member order.
    fn children(&self, path: &str) -> Vec<DirEntry>;

    /// Changes the owner of a file entry in place.
    fn set_owner(&mut self, path: &str, owner: &str) -> Result<()>;

    /// Removes an empty directory entry.
    fn remove_dir(&mut self, path: &str) -> Result<()>;
}

pub type Result<T> = std::result::Result<T, anyhow::Error>;

pub mod utils {
    /// Resolves `input` against the current directory into a canonical key.
    ///
    /// Input starting with `/` is absolute; anything else is joined under
    /// `current`. `.` segments collapse, `..` pops one segment (clamped at
    /// the root), and repeated separators collapse. The result never begins
    /// with a separator; the root is the empty string.
    ///
    /// Pure function with no failure mode: malformed input degrades to the
    /// closest normalized form.
    pub fn resolve(current: &str, input: &str) -> String {
        let joined = if input.starts_with('/') || current.is_empty() {
            input.to_string()
        } else {
            format!("{}/{}", current, input)
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in joined.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        segments.join("/")
    }

    /// Normalizes an archive member name into a canonical key.
    pub fn normalize(name: &str) -> String {
        resolve("", name)
    }
}

#[cfg(test)]
mod tests {
    use super::utils;

    mod resolve {
        use super::*;

        #[test]
        fn test_absolute_input_ignores_current() {
            assert_eq!(utils::resolve("", "/a/b"), "a/b");
            assert_eq!(utils::resolve("deep/down", "/a/b"), "a/b");
        }

        #[test]
        fn test_relative_input_joins_current() {
            assert_eq!(utils::resolve("a", "b"), "a/b");
            assert_eq!(utils::resolve("", "b"), "b");
            assert_eq!(utils::resolve("a/b", "c/d"), "a/b/c/d");
        }

        #[test]
        fn test_dot_and_dotdot_segments() {
            assert_eq!(utils::resolve("a", "./b"), "a/b");
            assert_eq!(utils::resolve("a", "../c"), "c");
            assert_eq!(utils::resolve("a/b", ".."), "a");
            assert_eq!(utils::resolve("a", "b/../c"), "a/c");
        }

        #[test]
        fn test_dotdot_clamped_at_root() {
            assert_eq!(utils::resolve("", ".."), "");
            assert_eq!(utils::resolve("a", "../../.."), "");
            assert_eq!(utils::resolve("", "/../a"), "a");
        }

        #[test]
        fn test_repeated_and_trailing_separators() {
            assert_eq!(utils::resolve("", "a//b/"), "a/b");
            assert_eq!(utils::resolve("", "///"), "");
            assert_eq!(utils::resolve("a", "b///c"), "a/b/c");
        }

        #[test]
        fn test_root_forms() {
            assert_eq!(utils::resolve("", ""), "");
            assert_eq!(utils::resolve("", "/"), "");
            assert_eq!(utils::resolve("a/b", "/"), "");
        }
    }

    mod names {
        use super::*;

        #[test]
        fn test_normalize_member_name() {
            assert_eq!(utils::normalize("root_folder/"), "root_folder");
            assert_eq!(utils::normalize("./a/b.txt"), "a/b.txt");
            assert_eq!(utils::normalize("/a/b.txt"), "a/b.txt");
        }
    }
}
