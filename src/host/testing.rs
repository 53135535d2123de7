use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::host::Host;
use crate::host::fs::AppDirs;
use crate::host::platform::Platform;

/// Platform stub reporting a fixed OS name.
#[derive(Debug, Clone)]
pub struct FixedPlatform(pub &'static str);

impl Platform for FixedPlatform {
    fn os(&self) -> String {
        self.0.to_string()
    }
}

/// Write a zip bundle holding `entries` (name, contents).
pub fn write_bundle(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (name, contents) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }

    zip.finish().unwrap().flush().unwrap();
}

/// Production host rooted at `root/profile` and `root/tmp`, reporting `os`.
pub fn host_in(root: &Path, os: &'static str) -> Host {
    let dirs = AppDirs::new(root.join("profile"), root.join("tmp"));
    std::fs::create_dir_all(&dirs.profile_dir).unwrap();
    std::fs::create_dir_all(&dirs.temp_dir).unwrap();
    Host::new(dirs).with_platform(FixedPlatform(os))
}
