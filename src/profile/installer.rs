use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::host::archive::Archive;
use crate::host::fs::{is_plain_segment, replace_file};
use crate::host::platform::icon_extension;
use crate::host::{Host, HostError};
use crate::profile::manifest::{FileType, MANIFEST_FILE, SCRIPT_FILE, read_manifest};
use crate::profile::params::Parameters;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("cannot open bundle: {0}")]
    Open(#[source] HostError),
    #[error("bundle failed integrity check: {0}")]
    Corrupt(#[source] HostError),
    #[error("cannot create temporary manifest in {path}: {source}")]
    TempFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("manifest id is not a valid folder name: {0:?}")]
    InvalidId(String),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Unpack the bundle at `bundle` into `<profile>/webapps/<id>`.
///
/// The bundle manifest is applied to `params`/`file_types` first; whatever it
/// set stays applied even if a later step fails. Returns the installed folder,
/// or `None` when the manifest declares no id (nothing is written then).
pub fn install(
    bundle: &Path,
    host: &Host,
    params: &mut Parameters,
    file_types: &mut Vec<FileType>,
) -> Result<Option<PathBuf>, InstallError> {
    let mut archive = host.archives.open(bundle).map_err(InstallError::Open)?;
    archive.test().map_err(InstallError::Corrupt)?;

    load_bundle_manifest(archive.as_mut(), host, params, file_types)?;

    if params.id.is_empty() {
        tracing::info!(bundle = %bundle.display(), "bundle manifest has no id, skipping install");
        return Ok(None);
    }
    if !is_plain_segment(&params.id) {
        return Err(InstallError::InvalidId(params.id.clone()));
    }

    let app_dir = host.dirs.webapps_dir().join(&params.id);
    copy_entry(archive.as_mut(), MANIFEST_FILE, &app_dir.join(MANIFEST_FILE))?;

    if archive.has_entry(SCRIPT_FILE) {
        copy_entry(archive.as_mut(), SCRIPT_FILE, &app_dir.join(SCRIPT_FILE))?;
    }

    if params.has_custom_icon() {
        install_icon(archive.as_mut(), host, &params.icon, &app_dir)?;
    }

    tracing::info!(id = %params.id, dir = %app_dir.display(), "installed webapp");
    Ok(Some(app_dir))
}

/// The INI parser only reads real files, so the manifest goes through a
/// uniquely named temp file that is removed afterwards.
fn load_bundle_manifest(
    archive: &mut dyn Archive,
    host: &Host,
    params: &mut Parameters,
    file_types: &mut Vec<FileType>,
) -> Result<(), InstallError> {
    let temp_dir = &host.dirs.temp_dir;
    let mut temp = tempfile::Builder::new()
        .prefix("webapp")
        .suffix(".ini")
        .tempfile_in(temp_dir)
        .map_err(|source| InstallError::TempFile {
            path: temp_dir.clone(),
            source,
        })?;

    archive.extract(MANIFEST_FILE, temp.as_file_mut())?;
    temp.as_file_mut()
        .flush()
        .map_err(|err| HostError::io(temp.path(), err))?;

    let ini = host.ini.parse(temp.path())?;
    read_manifest(&ini, params, file_types);

    let temp_path = temp.path().to_path_buf();
    temp.close().map_err(|err| HostError::io(temp_path, err))?;
    Ok(())
}

fn copy_entry(archive: &mut dyn Archive, name: &str, dest: &Path) -> Result<u64, HostError> {
    replace_file(dest, |out| archive.extract(name, out))
}

fn install_icon(
    archive: &mut dyn Archive,
    host: &Host,
    icon: &str,
    app_dir: &Path,
) -> Result<(), HostError> {
    let os = host.platform.os();
    let Some(ext) = icon_extension(&os) else {
        tracing::debug!(%os, "no icon format for platform");
        return Ok(());
    };

    let icon_name = format!("{icon}{ext}");
    if !archive.has_entry(&icon_name) || !is_plain_segment(&icon_name) {
        tracing::debug!(%icon_name, "bundle has no icon for this platform");
        return Ok(());
    }

    let dest = app_dir.join("icons").join("default").join(&icon_name);
    copy_entry(archive, &icon_name, &dest)?;
    Ok(())
}
