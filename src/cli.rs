use std::path::{Path, PathBuf};

use clap::Parser;
use url::Url;

use crate::host::cmdline::CommandLine;

/// Launch a web application profile.
#[derive(Debug, Default, Parser)]
#[command(name = "webrunner", version, about)]
pub struct Cli {
    /// Bundle path or installed webapp id.
    #[arg(long)]
    pub webapp: Option<String>,
    /// URL handed over by the OS launcher; only file URLs are used.
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub uri: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub sidebar: Option<String>,
    #[arg(long)]
    pub navigation: Option<String>,
    /// Alternate config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn into_launch_args(self, working_dir: PathBuf) -> LaunchArgs {
        let flags = [
            ("webapp", self.webapp),
            ("url", self.url),
            ("id", self.id),
            ("uri", self.uri),
            ("icon", self.icon),
            ("status", self.status),
            ("location", self.location),
            ("sidebar", self.sidebar),
            ("navigation", self.navigation),
        ];

        flags
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .fold(LaunchArgs::new(working_dir), |args, (name, value)| {
                args.with_flag(name, value)
            })
    }
}

/// Flags given on the command line, consumed as the profile reads them.
#[derive(Debug, Clone, Default)]
pub struct LaunchArgs {
    flags: Vec<(String, String)>,
    working_dir: PathBuf,
}

impl LaunchArgs {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            flags: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    pub fn with_flag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.flags.push((name.into(), value.into()));
        self
    }

    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|(name, _)| name.as_str())
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

impl CommandLine for LaunchArgs {
    fn handle_flag_with_param(&mut self, name: &str) -> Option<String> {
        let index = self
            .flags
            .iter()
            .position(|(flag, _)| flag.eq_ignore_ascii_case(name))?;
        Some(self.flags.remove(index).1)
    }

    fn resolve_file(&self, arg: &str) -> Option<PathBuf> {
        if arg.is_empty() {
            return None;
        }
        Some(self.absolute(Path::new(arg)))
    }

    fn resolve_uri(&self, arg: &str) -> Option<Url> {
        if let Ok(url) = Url::parse(arg) {
            // A bare drive letter parses as a one-letter scheme.
            if url.scheme().len() > 1 {
                return Some(url);
            }
        }
        Url::from_file_path(self.resolve_file(arg)?).ok()
    }
}
