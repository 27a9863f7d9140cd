//! Archive opening: format detection, member extraction, backend selection.
//!
//! The archive is consumed exactly once at startup to build the index; it is
//! never re-read afterwards. Anything that goes wrong here is fatal.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use tar::EntryType;
use zip::ZipArchive;

use crate::core::{Result, VfsBackend};
use crate::vfs::{ArchiveFS, ArchiveMember, EntryKind, TreeFS};

/// Supported archive container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveFormat {
    /// Detects the format from the file extension.
    pub fn detect(path: &Path) -> Result<ArchiveFormat> {
        let name = path.to_string_lossy().to_lowercase();
        if name.ends_with(".zip") {
            Ok(ArchiveFormat::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Ok(ArchiveFormat::TarGz)
        } else if name.ends_with(".tar") {
            Ok(ArchiveFormat::Tar)
        } else {
            bail!("unsupported archive format: {}", path.display())
        }
    }
}

/// Which VFS backing to build from the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VfsMode {
    /// Read-mostly [`ArchiveFS`].
    #[default]
    Archive,
    /// Mutable [`TreeFS`].
    Tree,
}

/// Opens the archive and builds the selected VFS backing.
pub fn open_vfs(path: &Path, mode: VfsMode) -> Result<Box<dyn VfsBackend>> {
    let members = read_members(path)?;
    tracing::info!(count = members.len(), ?mode, "loaded VFS archive");
    Ok(match mode {
        VfsMode::Archive => Box::new(ArchiveFS::from_members(members)),
        VfsMode::Tree => Box::new(TreeFS::from_members(members)),
    })
}

/// Reads the ordered member list of an archive.
pub fn read_members(path: &Path) -> Result<Vec<ArchiveMember>> {
    let format = ArchiveFormat::detect(path)?;
    let file =
        File::open(path).with_context(|| format!("cannot open archive {}", path.display()))?;
    match format {
        ArchiveFormat::Zip => read_zip_members(file),
        ArchiveFormat::Tar => read_tar_members(file),
        ArchiveFormat::TarGz => read_tar_members(GzDecoder::new(file)),
    }
}

/// Reads zip members. Zip carries no owner; modes come from the unix
/// permission field when present.
fn read_zip_members(file: File) -> Result<Vec<ArchiveMember>> {
    let mut archive = ZipArchive::new(file).context("cannot read zip archive")?;

    let mut members = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        let kind = if entry.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let mode = entry
            .unix_mode()
            .map(|m| m & 0o777)
            .unwrap_or(default_mode(kind));
        members.push(ArchiveMember {
            path: entry.name().to_string(),
            kind,
            mode,
            owner: String::new(),
        });
    }
    Ok(members)
}

/// Reads tar members, taking the header username as owner. Entries that are
/// neither regular files nor directories (symlinks and the like) are skipped.
fn read_tar_members<R: Read>(reader: R) -> Result<Vec<ArchiveMember>> {
    let mut archive = tar::Archive::new(reader);

    let mut members = Vec::new();
    for entry in archive.entries().context("cannot read tar archive")? {
        let entry = entry?;
        let header = entry.header();
        let path = entry.path()?.to_string_lossy().into_owned();

        let kind = match header.entry_type() {
            EntryType::Directory => EntryKind::Directory,
            EntryType::Regular | EntryType::Continuous | EntryType::GNUSparse => EntryKind::File,
            other => {
                tracing::debug!(?other, path, "skipping unsupported tar entry");
                continue;
            }
        };
        let mode = header.mode().map(|m| m & 0o777).unwrap_or(default_mode(kind));
        let owner = header
            .username()
            .ok()
            .flatten()
            .unwrap_or_default()
            .to_string();

        members.push(ArchiveMember { path, kind, mode, owner });
    }
    Ok(members)
}

fn default_mode(kind: EntryKind) -> u32 {
    match kind {
        EntryKind::Directory => 0o755,
        EntryKind::File => 0o644,
    }
}
