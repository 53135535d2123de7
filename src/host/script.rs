use std::fs;
use std::path::{Path, PathBuf};

use crate::host::HostError;

/// A loaded application script. The embedding shell decides what to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppScript {
    pub path: PathBuf,
    pub source: String,
}

pub trait ScriptLoader {
    fn load(&self, path: &Path) -> Result<AppScript, HostError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SourceScriptLoader;

impl ScriptLoader for SourceScriptLoader {
    fn load(&self, path: &Path) -> Result<AppScript, HostError> {
        let source = fs::read_to_string(path).map_err(|err| HostError::io(path, err))?;
        Ok(AppScript {
            path: path.to_path_buf(),
            source,
        })
    }
}
