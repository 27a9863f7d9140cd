mod archive_fs;
mod entry;
mod index;
mod loader;
mod tree_fs;

pub use archive_fs::ArchiveFS;
pub use entry::{ArchiveMember, DirEntry, EntryKind, VfsEntry};
pub use index::VfsIndex;
pub use loader::{ArchiveFormat, VfsMode, open_vfs, read_members};
pub use tree_fs::TreeFS;
