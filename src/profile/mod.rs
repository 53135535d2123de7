//! The webapp profile: which bundle or folder backs this launch, and the
//! display settings read from its manifest and the command line.

pub mod icons;
pub mod installer;
pub mod locator;
pub mod manifest;
pub mod params;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::host::Host;
use crate::host::cmdline::CommandLine;
use crate::host::script::AppScript;
use icons::IconProvider;
use locator::Source;
use manifest::{FileType, MANIFEST_FILE, SCRIPT_FILE, read_manifest};
use params::{PARAMETERS, Parameters};

#[derive(Debug, Clone, Default)]
pub struct Profile {
    params: Parameters,
    file_types: Vec<FileType>,
    script: Option<AppScript>,
    app_dir: Option<PathBuf>,
}

/// Serializable view of a profile.
#[derive(Debug, Serialize)]
pub struct ProfileSummary<'a> {
    #[serde(flatten)]
    pub params: &'a Parameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_dir: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<&'a Path>,
    pub file_types: &'a [FileType],
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the profile for one launch: locate the source, install it if it
    /// is a bundle, read its manifest and script, then apply command-line
    /// overrides. Never fails; anything that cannot be loaded keeps its default.
    pub fn from_command_line(cmdline: &mut dyn CommandLine, host: &Host) -> Self {
        let mut profile = Self::new();

        match locator::resolve(cmdline, &host.dirs) {
            Some(Source::Bundle(bundle)) => {
                if let Some(app_dir) = profile.install(&bundle, host) {
                    profile.attach(&app_dir, host);
                }
            }
            Some(Source::Folder(folder)) => profile.init(&folder, host),
            None => {}
        }

        profile.read_command_line(cmdline);
        profile
    }

    /// Install a bundle into the shared profile. Failures are logged and
    /// swallowed; the manifest settings applied before the failure stay.
    pub fn install(&mut self, bundle: &Path, host: &Host) -> Option<PathBuf> {
        match installer::install(bundle, host, &mut self.params, &mut self.file_types) {
            Ok(app_dir) => app_dir,
            Err(err) => {
                tracing::warn!(bundle = %bundle.display(), "webapp install failed: {err}");
                None
            }
        }
    }

    /// Load an unpacked webapp folder: its manifest, then its script.
    pub fn init(&mut self, folder: &Path, host: &Host) {
        let manifest = folder.join(MANIFEST_FILE);
        if manifest.exists() {
            match host.ini.parse(&manifest) {
                Ok(ini) => read_manifest(&ini, &mut self.params, &mut self.file_types),
                Err(err) => tracing::warn!("cannot read webapp manifest: {err}"),
            }
        }

        self.attach(folder, host);
    }

    /// Adopt `folder` as the webapp folder and load its script, if any.
    pub fn attach(&mut self, folder: &Path, host: &Host) {
        let script = folder.join(SCRIPT_FILE);
        if script.exists() {
            match host.scripts.load(&script) {
                Ok(loaded) => self.script = Some(loaded),
                Err(err) => tracing::warn!("cannot load webapp script: {err}"),
            }
        }

        self.app_dir = Some(folder.to_path_buf());
    }

    /// Apply `--<name> <value>` for every settable parameter.
    pub fn read_command_line(&mut self, cmdline: &mut dyn CommandLine) {
        for spec in &PARAMETERS {
            if let Some(value) = cmdline.handle_flag_with_param(spec.name) {
                self.set_parameter(spec.name, &value);
            }
        }
    }

    pub fn set_parameter(&mut self, name: &str, value: &str) -> bool {
        self.params.set(name, value)
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn file_types(&self) -> &[FileType] {
        &self.file_types
    }

    pub fn script(&self) -> Option<&AppScript> {
        self.script.as_ref()
    }

    pub fn app_dir(&self) -> Option<&Path> {
        self.app_dir.as_deref()
    }

    /// Hook for the host directory service; the caller registers it once.
    pub fn icon_provider(&self) -> Option<IconProvider> {
        self.app_dir.clone().map(IconProvider::new)
    }

    pub fn summary(&self) -> ProfileSummary<'_> {
        ProfileSummary {
            params: &self.params,
            app_dir: self.app_dir(),
            script: self.script.as_ref().map(|script| script.path.as_path()),
            file_types: &self.file_types,
        }
    }
}
