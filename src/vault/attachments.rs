//! Copying user-selected files into the vault's private storage.
//!
//! Photo and Document items do not point at the user's original file;
//! the bytes are copied into `<vault>/attachments/` first and the item
//! stores the path of that copy.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::errors::{NoteVaultError, Result};

use super::format::restrict_permissions;

/// Used when the suggested name has no usable file-name component.
const FALLBACK_NAME: &str = "attachment";

/// Imports files into one attachments directory.
#[derive(Debug, Clone)]
pub struct AttachmentImporter {
    dir: PathBuf,
}

impl AttachmentImporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory imported copies are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `source` into the attachments directory as
    /// `{millis}_{suggested_name}` and return the copy's absolute path.
    ///
    /// On failure nothing is left behind in the attachments directory.
    pub fn import_file(&self, source: &Path, suggested_name: &str) -> Result<PathBuf> {
        let mut reader = open_source(source)?;

        fs::create_dir_all(&self.dir).map_err(|e| NoteVaultError::write(&self.dir, e))?;
        let dir = fs::canonicalize(&self.dir).map_err(|e| NoteVaultError::write(&self.dir, e))?;

        let name = sanitize_name(suggested_name);
        let (dest, mut writer) = create_unique(&dir, &name)?;

        let copied = io::copy(&mut reader, &mut writer)
            .and_then(|n| writer.sync_all().map(|()| n))
            .and_then(|n| restrict_permissions(&dest).map(|()| n));

        match copied {
            Ok(bytes) => {
                debug!(source = %source.display(), dest = %dest.display(), bytes, "attachment imported");
                Ok(dest)
            }
            Err(e) => {
                drop(writer);
                if let Err(cleanup) = fs::remove_file(&dest) {
                    warn!("could not remove partial copy {}: {cleanup}", dest.display());
                }
                Err(NoteVaultError::write(dest, e))
            }
        }
    }

    /// Delete an imported copy.
    ///
    /// Paths outside the attachments directory are left untouched and
    /// return `Ok(false)`, as does a copy that is already gone.
    pub fn discard(&self, path: &Path) -> Result<bool> {
        let Ok(dir) = fs::canonicalize(&self.dir) else {
            return Ok(false);
        };
        let Ok(target) = fs::canonicalize(path) else {
            return Ok(false);
        };
        if target.parent() != Some(dir.as_path()) {
            return Ok(false);
        }

        match fs::remove_file(&target) {
            Ok(()) => {
                debug!(path = %target.display(), "attachment discarded");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(NoteVaultError::write(target, e)),
        }
    }
}

fn open_source(source: &Path) -> Result<File> {
    let unreadable = |e| NoteVaultError::SourceUnreadable {
        path: source.to_path_buf(),
        source: e,
    };

    let file = File::open(source).map_err(unreadable)?;
    let meta = file.metadata().map_err(unreadable)?;
    if !meta.is_file() {
        return Err(unreadable(io::Error::new(
            ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    Ok(file)
}

/// Create `{millis}_{name}` in `dir`, moving to the next millisecond
/// if that name is already taken.
fn create_unique(dir: &Path, name: &str) -> Result<(PathBuf, File)> {
    let mut stamp = Utc::now().timestamp_millis();
    loop {
        let dest = dir.join(format!("{stamp}_{name}"));
        match OpenOptions::new().write(true).create_new(true).open(&dest) {
            Ok(file) => return Ok((dest, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => stamp += 1,
            Err(e) => return Err(NoteVaultError::write(dest, e)),
        }
    }
}

/// Keep only the final path component of a suggested name.
fn sanitize_name(suggested: &str) -> String {
    Path::new(suggested.trim())
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_name("photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_name("/tmp/scan.pdf"), "scan.pdf");
        assert_eq!(sanitize_name(""), FALLBACK_NAME);
        assert_eq!(sanitize_name(".."), FALLBACK_NAME);
    }

    #[test]
    fn create_unique_skips_taken_names() {
        let dir = TempDir::new().unwrap();
        let (first, _f1) = create_unique(dir.path(), "a.txt").unwrap();
        let (second, _f2) = create_unique(dir.path(), "a.txt").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn import_rejects_directories_as_source() {
        let dir = TempDir::new().unwrap();
        let importer = AttachmentImporter::new(dir.path().join("attachments"));

        let err = importer.import_file(dir.path(), "dir").unwrap_err();
        assert!(matches!(err, NoteVaultError::SourceUnreadable { .. }));
    }

    #[test]
    fn discard_ignores_files_outside_the_directory() {
        let dir = TempDir::new().unwrap();
        let importer = AttachmentImporter::new(dir.path().join("attachments"));
        fs::create_dir_all(importer.dir()).unwrap();

        let outside = dir.path().join("keep.txt");
        fs::write(&outside, b"keep").unwrap();

        assert!(!importer.discard(&outside).unwrap());
        assert!(outside.exists());
    }
}
