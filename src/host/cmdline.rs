use std::path::PathBuf;

use url::Url;

/// Read access to the launch command line.
pub trait CommandLine {
    /// Consume the flag `name` and return its parameter, if it was given one.
    fn handle_flag_with_param(&mut self, name: &str) -> Option<String>;

    /// Resolve a path argument against the launch working directory.
    fn resolve_file(&self, arg: &str) -> Option<PathBuf>;

    /// Resolve an argument as a URI. Anything that is not an absolute URL is
    /// taken as a path and turned into a `file:` URL.
    fn resolve_uri(&self, arg: &str) -> Option<Url>;
}
