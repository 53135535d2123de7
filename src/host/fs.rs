use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::host::HostError;

const WEBAPPS_DIR: &str = "webapps";

/// Well-known roots: the shared profile directory and the scratch directory
/// used while unpacking bundles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub profile_dir: PathBuf,
    pub temp_dir: PathBuf,
}

impl AppDirs {
    pub fn new(profile_dir: PathBuf, temp_dir: PathBuf) -> Self {
        Self {
            profile_dir,
            temp_dir,
        }
    }

    /// Create both roots if they do not exist yet.
    pub fn ensure(&self) -> Result<(), HostError> {
        for dir in [&self.profile_dir, &self.temp_dir] {
            fs::create_dir_all(dir).map_err(|err| HostError::io(dir, err))?;
        }
        Ok(())
    }

    pub fn webapps_dir(&self) -> PathBuf {
        self.profile_dir.join(WEBAPPS_DIR)
    }

    /// Folder of an installed webapp. `None` if `id` is not usable as a single
    /// path segment.
    pub fn installed_app(&self, id: &str) -> Option<PathBuf> {
        is_plain_segment(id).then(|| self.webapps_dir().join(id))
    }
}

/// True if `name` names exactly one entry inside its parent directory.
pub fn is_plain_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).components().count() == 1
}

/// Remove `dest` if present, then create it afresh (mode 0600 on unix) and
/// fill it through `fill`. Missing parent directories are created.
pub fn replace_file<F>(dest: &Path, fill: F) -> Result<u64, HostError>
where
    F: FnOnce(&mut dyn Write) -> Result<u64, HostError>,
{
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|err| HostError::io(parent, err))?;
    }

    if dest.exists() {
        fs::remove_file(dest).map_err(|err| HostError::io(dest, err))?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(dest).map_err(|err| HostError::io(dest, err))?;
    let written = fill(&mut file)?;
    file.flush().map_err(|err| HostError::io(dest, err))?;
    Ok(written)
}
