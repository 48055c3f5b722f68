//! File-backed resource in JSON format.

use super::{NodeReader, PropertyReader, PropertyResource, ResourceNode};
use crate::configuration::ConfigurationData;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A [`PropertyResource`] stored as a pretty-printed JSON document.
///
/// A missing or empty file reads as an empty mapping; the file is created on the
/// first export.
#[derive(Debug, Clone)]
pub struct JsonResource {
    path: PathBuf,
}

impl JsonResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_root(&self) -> Result<ResourceNode, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Resource file missing, starting empty");
                return Ok(ResourceNode::empty_mapping());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if text.trim().is_empty() {
            return Ok(ResourceNode::empty_mapping());
        }
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl PropertyResource for JsonResource {
    fn create_reader(&self) -> Result<Box<dyn PropertyReader>, ConfigError> {
        Ok(Box::new(NodeReader::new(self.read_root()?)))
    }

    fn export_properties(&self, data: &ConfigurationData) -> Result<(), ConfigError> {
        let root = data.export_tree();
        let mut text = serde_json::to_string_pretty(&root).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        text.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        info!(path = %self.path.display(), "Resource written");
        Ok(())
    }
}
