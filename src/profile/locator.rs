use std::path::PathBuf;

use crate::host::cmdline::CommandLine;
use crate::host::fs::AppDirs;

/// Outcome of a single lookup strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(PathBuf),
    NotFound,
}

impl Lookup {
    fn existing(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if path.exists() => Lookup::Found(path),
            _ => Lookup::NotFound,
        }
    }

    fn or_else(self, next: impl FnOnce() -> Lookup) -> Lookup {
        match self {
            Lookup::Found(path) => Lookup::Found(path),
            Lookup::NotFound => next(),
        }
    }
}

/// Where a profile comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A packed bundle that still has to be installed.
    Bundle(PathBuf),
    /// An unpacked webapp folder.
    Folder(PathBuf),
}

/// Find the profile source named on the command line: `webapp` as a path,
/// then `webapp` as an installed id, then a `file:` `url`.
pub fn resolve(cmdline: &mut dyn CommandLine, dirs: &AppDirs) -> Option<Source> {
    let webapp = cmdline.handle_flag_with_param("webapp");

    let lookup = match webapp.as_deref() {
        Some(webapp) => bundle_path(cmdline, webapp).or_else(|| installed_app(dirs, webapp)),
        None => Lookup::NotFound,
    };
    let lookup = lookup.or_else(|| launch_url(cmdline));

    let Lookup::Found(path) = lookup else {
        tracing::debug!("no webapp source on the command line");
        return None;
    };

    let source = if path.is_dir() {
        Source::Folder(path)
    } else {
        Source::Bundle(path)
    };
    tracing::info!(?source, "resolved webapp source");
    Some(source)
}

fn bundle_path(cmdline: &dyn CommandLine, webapp: &str) -> Lookup {
    Lookup::existing(cmdline.resolve_file(webapp))
}

fn installed_app(dirs: &AppDirs, id: &str) -> Lookup {
    Lookup::existing(dirs.installed_app(id))
}

fn launch_url(cmdline: &mut dyn CommandLine) -> Lookup {
    let Some(arg) = cmdline.handle_flag_with_param("url") else {
        return Lookup::NotFound;
    };

    let path = cmdline
        .resolve_uri(&arg)
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok());
    Lookup::existing(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::cli::LaunchArgs;

    fn dirs_in(root: &std::path::Path) -> AppDirs {
        AppDirs::new(root.join("profile"), root.join("tmp"))
    }

    #[test]
    fn nothing_given_resolves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = LaunchArgs::new(dir.path());
        assert_eq!(resolve(&mut args, &dirs_in(dir.path())), None);
    }

    #[test]
    fn webapp_path_to_bundle() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.webapp"), b"zip").unwrap();

        let mut args = LaunchArgs::new(dir.path()).with_flag("webapp", "notes.webapp");
        assert_eq!(
            resolve(&mut args, &dirs_in(dir.path())),
            Some(Source::Bundle(dir.path().join("notes.webapp")))
        );
        assert_eq!(args.remaining().count(), 0);
    }

    #[test]
    fn webapp_id_to_installed_folder() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = dirs_in(dir.path());
        let installed = dirs.webapps_dir().join("notes@example.org");
        fs::create_dir_all(&installed).unwrap();

        let mut args = LaunchArgs::new(dir.path()).with_flag("webapp", "notes@example.org");
        assert_eq!(resolve(&mut args, &dirs), Some(Source::Folder(installed)));
    }

    #[test]
    fn local_path_wins_over_installed_id() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = dirs_in(dir.path());
        fs::create_dir_all(dirs.webapps_dir().join("notes")).unwrap();
        fs::write(dir.path().join("notes"), b"zip").unwrap();

        let mut args = LaunchArgs::new(dir.path()).with_flag("webapp", "notes");
        assert_eq!(
            resolve(&mut args, &dirs),
            Some(Source::Bundle(dir.path().join("notes")))
        );
    }

    #[test]
    fn missing_webapp_falls_through_to_url() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("launched.webapp");
        fs::write(&bundle, b"zip").unwrap();
        let url = url::Url::from_file_path(&bundle).unwrap();

        let mut args = LaunchArgs::new(dir.path())
            .with_flag("webapp", "missingpath")
            .with_flag("url", url.as_str());
        assert_eq!(
            resolve(&mut args, &dirs_in(dir.path())),
            Some(Source::Bundle(bundle))
        );
    }

    #[test]
    fn non_file_url_is_not_a_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut args =
            LaunchArgs::new(dir.path()).with_flag("url", "https://example.org/notes.webapp");
        assert_eq!(resolve(&mut args, &dirs_in(dir.path())), None);
    }

    #[test]
    fn missing_everything_resolves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = LaunchArgs::new(dir.path())
            .with_flag("webapp", "missingpath")
            .with_flag("url", "also-missing.webapp");
        assert_eq!(resolve(&mut args, &dirs_in(dir.path())), None);
    }

    #[test]
    fn id_with_separators_is_not_looked_up() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = dirs_in(dir.path());
        fs::create_dir_all(dirs.webapps_dir()).unwrap();

        assert_eq!(installed_app(&dirs, ".."), Lookup::NotFound);
        assert_eq!(installed_app(&dirs, "../webapps"), Lookup::NotFound);
    }
}
