//! Directory-service hook that exposes a webapp's icon folder to the host.

use std::path::PathBuf;

use thiserror::Error;

/// Property under which the host looks up extra chrome directories.
pub const CHROME_DIR_LIST: &str = "AChromDL";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("property not available: {0}")]
    NotAvailable(String),
}

pub trait DirectoryProvider {
    fn get_file(&self, prop: &str) -> Result<PathBuf, ProviderError>;
    fn get_files(&self, prop: &str) -> Result<Vec<PathBuf>, ProviderError>;
}

/// Answers [`CHROME_DIR_LIST`] with the webapp folder, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconProvider {
    folder: PathBuf,
}

impl IconProvider {
    pub fn new(folder: PathBuf) -> Self {
        Self { folder }
    }
}

impl DirectoryProvider for IconProvider {
    fn get_file(&self, prop: &str) -> Result<PathBuf, ProviderError> {
        Err(ProviderError::NotAvailable(prop.to_string()))
    }

    fn get_files(&self, prop: &str) -> Result<Vec<PathBuf>, ProviderError> {
        if prop == CHROME_DIR_LIST {
            return Ok(vec![self.folder.clone()]);
        }
        Err(ProviderError::NotAvailable(prop.to_string()))
    }
}

/// Registry the host consults; providers are asked in registration order.
#[derive(Default)]
pub struct DirectoryService {
    providers: Vec<Box<dyn DirectoryProvider>>,
}

impl DirectoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_provider(&mut self, provider: Box<dyn DirectoryProvider>) {
        self.providers.push(provider);
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// First provider that knows `prop` wins.
    pub fn get_file(&self, prop: &str) -> Result<PathBuf, ProviderError> {
        self.providers
            .iter()
            .find_map(|provider| provider.get_file(prop).ok())
            .ok_or_else(|| ProviderError::NotAvailable(prop.to_string()))
    }

    /// Lists from every provider that knows `prop`, concatenated.
    pub fn get_files(&self, prop: &str) -> Result<Vec<PathBuf>, ProviderError> {
        let mut found = false;
        let mut files = Vec::new();
        for provider in &self.providers {
            if let Ok(list) = provider.get_files(prop) {
                found = true;
                files.extend(list);
            }
        }

        if found {
            Ok(files)
        } else {
            Err(ProviderError::NotAvailable(prop.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_answers_only_chrome_dir_list() {
        let provider = IconProvider::new(PathBuf::from("/p/webapps/notes"));

        assert_eq!(
            provider.get_files(CHROME_DIR_LIST).unwrap(),
            vec![PathBuf::from("/p/webapps/notes")]
        );
        assert_eq!(
            provider.get_files("ProfD"),
            Err(ProviderError::NotAvailable("ProfD".into()))
        );
        assert_eq!(
            provider.get_file(CHROME_DIR_LIST),
            Err(ProviderError::NotAvailable(CHROME_DIR_LIST.into()))
        );
    }

    #[test]
    fn service_aggregates_registered_providers() {
        let mut service = DirectoryService::new();
        assert!(service.get_files(CHROME_DIR_LIST).is_err());

        service.register_provider(Box::new(IconProvider::new(PathBuf::from("/a"))));
        service.register_provider(Box::new(IconProvider::new(PathBuf::from("/b"))));

        assert_eq!(service.provider_count(), 2);
        assert_eq!(
            service.get_files(CHROME_DIR_LIST).unwrap(),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
        assert!(service.get_files("UChrm").is_err());
        assert!(service.get_file(CHROME_DIR_LIST).is_err());
    }
}
