use serde::Serialize;

use crate::host::ini::IniFile;
use crate::profile::params::Parameters;

pub const MANIFEST_FILE: &str = "webapp.ini";
pub const SCRIPT_FILE: &str = "webapp.js";

const PARAMETERS_SECTION: &str = "Parameters";
const FILE_TYPES_SECTION: &str = "FileTypes";

/// A document type the webapp registers, from `name;extension;description;contentType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileType {
    pub name: String,
    pub extension: String,
    pub description: String,
    pub content_type: String,
}

impl FileType {
    /// `None` unless the value has exactly four `;`-separated fields.
    pub fn parse(value: &str) -> Option<Self> {
        let fields: Vec<&str> = value.split(';').collect();
        let [name, extension, description, content_type] = fields.as_slice() else {
            return None;
        };

        Some(Self {
            name: name.to_string(),
            extension: extension.to_string(),
            description: description.to_string(),
            content_type: content_type.to_string(),
        })
    }
}

/// Apply a parsed manifest: every `Parameters` key (lower-cased) goes
/// through [`Parameters::set`], every well-formed `FileTypes` entry is
/// appended to `file_types`.
pub fn read_manifest(ini: &IniFile, params: &mut Parameters, file_types: &mut Vec<FileType>) {
    for key in ini.keys(PARAMETERS_SECTION) {
        if let Some(value) = ini.get_string(PARAMETERS_SECTION, key) {
            params.set(&key.to_lowercase(), value);
        }
    }

    for key in ini.keys(FILE_TYPES_SECTION) {
        let Some(value) = ini.get_string(FILE_TYPES_SECTION, key) else {
            continue;
        };
        match FileType::parse(value) {
            Some(file_type) => file_types.push(file_type),
            None => tracing::debug!(key, value, "dropping malformed file type"),
        }
    }
}
