//! Build-context packaging.
//!
//! The engine's build API takes a tar stream as its context. gobox needs
//! nothing but the Dockerfile in it, so the archive always holds exactly one
//! entry. It is built fully in memory and finalized (both trailing zero
//! blocks written) before anything is sent.

use std::io::Read;

use gobox_core::config::DEFINITION_FILE_NAME;

use crate::definition::RenderedDefinition;

/// Mode of the Dockerfile entry. Read/write for the owner, readable by all.
const ENTRY_MODE: u32 = 0o644;

/// A finalized, single-entry tar archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContextArchive(Vec<u8>);

/// One file read back out of a [`BuildContextArchive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub mode: u32,
    pub data: Vec<u8>,
}

/// Pack a rendered Dockerfile into a build context.
///
/// The entry's mtime is fixed at zero, so packing the same definition twice
/// yields identical bytes.
pub fn pack(definition: &RenderedDefinition) -> Result<BuildContextArchive, ArchiveError> {
    let data = definition.as_bytes();

    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_size(data.len() as u64);
    header.set_mode(ENTRY_MODE);
    header.set_mtime(0);

    let mut builder = tar::Builder::new(Vec::new());
    builder
        .append_data(&mut header, DEFINITION_FILE_NAME, data)
        .map_err(|e| ArchiveError::Append {
            name: DEFINITION_FILE_NAME,
            source: e,
        })?;

    // `into_inner` writes the end-of-archive marker.
    let bytes = builder
        .into_inner()
        .map_err(|e| ArchiveError::Finish { source: e })?;

    tracing::debug!(
        entry = DEFINITION_FILE_NAME,
        entry_bytes = data.len(),
        archive_bytes = bytes.len(),
        "build context packed"
    );

    Ok(BuildContextArchive(bytes))
}

impl BuildContextArchive {
    /// Wrap bytes of an existing archive, e.g. one captured from a build
    /// request, to read it back with [`entries`](Self::entries).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read every entry back out of the archive.
    pub fn entries(&self) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let mut archive = tar::Archive::new(self.0.as_slice());
        let entries = archive
            .entries()
            .map_err(|e| ArchiveError::Read { source: e })?;

        let mut out = Vec::new();
        for entry in entries {
            let mut entry = entry.map_err(|e| ArchiveError::Read { source: e })?;
            let name = entry
                .path()
                .map_err(|e| ArchiveError::Read { source: e })?
                .to_string_lossy()
                .into_owned();
            let mode = entry
                .header()
                .mode()
                .map_err(|e| ArchiveError::Read { source: e })?;

            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .map_err(|e| ArchiveError::Read { source: e })?;

            out.push(ArchiveEntry { name, mode, data });
        }

        Ok(out)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to append {name} to build context")]
    Append {
        name: &'static str,
        source: std::io::Error,
    },

    #[error("failed to finalize build context archive")]
    Finish { source: std::io::Error },

    #[error("failed to read build context archive")]
    Read { source: std::io::Error },
}
