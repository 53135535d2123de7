use std::fs;
use std::path::Path;

use crate::host::HostError;

/// Parses manifest files from disk.
pub trait IniParser {
    fn parse(&self, path: &Path) -> Result<IniFile, HostError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FileIniParser;

impl IniParser for FileIniParser {
    fn parse(&self, path: &Path) -> Result<IniFile, HostError> {
        let bytes = fs::read(path).map_err(|err| HostError::io(path, err))?;
        Ok(IniFile::parse_text(&String::from_utf8_lossy(&bytes)))
    }
}

#[derive(Debug, Clone, Default)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

/// A parsed INI document. Sections and keys keep their file order.
#[derive(Debug, Clone, Default)]
pub struct IniFile {
    sections: Vec<Section>,
}

impl IniFile {
    pub fn parse_text(text: &str) -> Self {
        let mut ini = Self::default();
        let mut current: Option<usize> = None;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for raw in text.lines() {
            let line = raw.trim_start();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                // An unterminated header ends whatever section was open.
                current = rest
                    .find(']')
                    .map(|end| ini.section_index(rest[..end].trim()));
                continue;
            }

            let Some(index) = current else {
                continue;
            };
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            let entries = &mut ini.sections[index].entries;
            let value = value.trim().to_string();
            match entries.iter_mut().find(|(existing, _)| existing.as_str() == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key.to_string(), value)),
            }
        }

        ini
    }

    fn section_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.sections.iter().position(|s| s.name == name) {
            return index;
        }
        self.sections.push(Section {
            name: name.to_string(),
            entries: Vec::new(),
        });
        self.sections.len() - 1
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Keys of `section` in file order; empty if the section is absent.
    pub fn keys(&self, section: &str) -> impl Iterator<Item = &str> {
        self.section(section)
            .into_iter()
            .flat_map(|s| s.entries.iter().map(|(key, _)| key.as_str()))
    }

    pub fn get_string(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?
            .entries
            .iter()
            .find(|(existing, _)| existing.as_str() == key)
            .map(|(_, value)| value.as_str())
    }
}
