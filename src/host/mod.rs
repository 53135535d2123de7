//! Services the profile logic borrows from its embedding runtime.
//!
//! Everything here sits behind a small trait so the profile can be driven
//! by real files and zip bundles in production and by fakes in tests.

pub mod archive;
pub mod cmdline;
pub mod fs;
pub mod ini;
pub mod platform;
pub mod script;

#[cfg(test)]
pub mod testing;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use archive::{ArchiveReader, ZipReader};
use fs::AppDirs;
use ini::{FileIniParser, IniParser};
use platform::{HostPlatform, Platform};
use script::{ScriptLoader, SourceScriptLoader};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("archive entry not found: {0}")]
    MissingEntry(String),
}

impl HostError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// The collaborators a profile needs, injected once per launch.
pub struct Host {
    pub dirs: AppDirs,
    pub archives: Box<dyn ArchiveReader>,
    pub ini: Box<dyn IniParser>,
    pub scripts: Box<dyn ScriptLoader>,
    pub platform: Box<dyn Platform>,
}

impl Host {
    /// Production wiring: zip bundles, on-disk INI files, source scripts and
    /// the compile-time OS.
    pub fn new(dirs: AppDirs) -> Self {
        Self {
            dirs,
            archives: Box::new(ZipReader),
            ini: Box::new(FileIniParser),
            scripts: Box::new(SourceScriptLoader),
            platform: Box::new(HostPlatform),
        }
    }

    pub fn with_platform(mut self, platform: impl Platform + 'static) -> Self {
        self.platform = Box::new(platform);
        self
    }

    pub fn with_scripts(mut self, scripts: impl ScriptLoader + 'static) -> Self {
        self.scripts = Box::new(scripts);
        self
    }
}
