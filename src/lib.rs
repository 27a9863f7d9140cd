//! An interactive shell emulator over archive-backed virtual file systems.
//! A zip or tar archive is opened once at startup and its member list becomes
//! a navigable namespace; shell commands (`ls`, `cd`, `chown`, ...) operate
//! on that namespace without ever touching the host disk.
//!
//! ### Overview
//!
//! `arcsh` defines the generic `VfsBackend` trait and provides two concrete
//! implementations built from the same archive member list: the read-mostly
//! `ArchiveFS` and the mutable `TreeFS`.
//!
//! **Key ideas**:
//! - **Flat index, not a tree**: the namespace is a path-keyed map with
//!   prefix queries for child listings; no pointer-based tree is built.
//! - **Pure path resolution**: relative and absolute input resolves against
//!   the session cursor with no I/O and no failure mode.
//! - **Uniform dispatch**: every command, valid or not, produces exactly one
//!   result string and one timestamped log line; nothing is fatal after load.
//! - **Safety**: the host filesystem is never mutated; ownership and
//!   permissions are emulated on index entries.

mod config;
mod core;
mod shell;
mod vfs;

pub use config::Config;
pub use core::{Result, VfsBackend, utils};
pub use shell::{Dispatcher, LogSink, Response, Session};
pub use vfs::{
    ArchiveFS, ArchiveFormat, ArchiveMember, DirEntry, EntryKind, TreeFS, VfsEntry, VfsIndex,
    VfsMode, open_vfs, read_members,
};
