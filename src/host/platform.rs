/// Source of the lower-cased OS name the runtime reports.
pub trait Platform {
    fn os(&self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn os(&self) -> String {
        match std::env::consts::OS {
            "windows" => "winnt".to_string(),
            "macos" => "darwin".to_string(),
            other => other.to_lowercase(),
        }
    }
}

/// Icon file extension for an OS name. Unknown platforms have no icon format.
pub fn icon_extension(os: &str) -> Option<&'static str> {
    match os {
        "winnt" => Some(".ico"),
        "linux" => Some(".xpm"),
        "darwin" => Some(".icns"),
        _ => None,
    }
}
