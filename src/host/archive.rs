use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::host::HostError;

/// Opens packed webapp bundles.
pub trait ArchiveReader {
    fn open(&self, path: &Path) -> Result<Box<dyn Archive>, HostError>;
}

/// An opened bundle.
pub trait Archive {
    /// Integrity check over every entry.
    fn test(&mut self) -> Result<(), HostError>;

    fn has_entry(&self, name: &str) -> bool;

    /// Copy the named entry's contents into `out`, returning the byte count.
    fn extract(&mut self, name: &str, out: &mut dyn Write) -> Result<u64, HostError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ZipReader;

impl ArchiveReader for ZipReader {
    fn open(&self, path: &Path) -> Result<Box<dyn Archive>, HostError> {
        let file = File::open(path).map_err(|err| HostError::io(path, err))?;
        let inner = ZipArchive::new(file).map_err(|source| HostError::Archive {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Box::new(ZipBundle {
            path: path.to_path_buf(),
            inner,
        }))
    }
}

pub struct ZipBundle {
    path: PathBuf,
    inner: ZipArchive<File>,
}

impl Archive for ZipBundle {
    fn test(&mut self) -> Result<(), HostError> {
        // Reading each entry to the end makes the zip crate verify its CRC.
        for index in 0..self.inner.len() {
            let mut entry = self
                .inner
                .by_index(index)
                .map_err(|source| HostError::Archive {
                    path: self.path.clone(),
                    source,
                })?;
            let name = entry.name().to_string();
            io::copy(&mut entry, &mut io::sink()).map_err(|err| {
                HostError::io(self.path.join(&name), err)
            })?;
        }
        Ok(())
    }

    fn has_entry(&self, name: &str) -> bool {
        self.inner.index_for_name(name).is_some()
    }

    fn extract(&mut self, name: &str, out: &mut dyn Write) -> Result<u64, HostError> {
        let mut entry = match self.inner.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Err(HostError::MissingEntry(name.to_string())),
            Err(source) => {
                return Err(HostError::Archive {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        io::copy(&mut entry, out).map_err(|err| HostError::io(self.path.join(name), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::write_bundle;

    #[test]
    fn opens_and_extracts_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.webapp");
        write_bundle(&path, &[("webapp.ini", "[Parameters]\nid=demo\n")]);

        let mut bundle = ZipReader.open(&path).unwrap();
        bundle.test().unwrap();
        assert!(bundle.has_entry("webapp.ini"));
        assert!(!bundle.has_entry("webapp.js"));

        let mut out = Vec::new();
        let n = bundle.extract("webapp.ini", &mut out).unwrap();
        assert_eq!(n as usize, out.len());
        assert_eq!(String::from_utf8(out).unwrap(), "[Parameters]\nid=demo\n");
    }

    #[test]
    fn missing_entry_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.webapp");
        write_bundle(&path, &[("webapp.ini", "")]);

        let mut bundle = ZipReader.open(&path).unwrap();
        let err = bundle.extract("webapp.js", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, HostError::MissingEntry(name) if name == "webapp.js"));
    }

    #[test]
    fn non_zip_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.webapp");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();

        assert!(matches!(
            ZipReader.open(&path),
            Err(HostError::Archive { .. })
        ));
    }
}
