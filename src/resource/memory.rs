//! In-memory resource, for embedding and tests.

use super::{NodeReader, PropertyReader, PropertyResource, ResourceNode};
use crate::configuration::ConfigurationData;
use crate::error::ConfigError;
use parking_lot::RwLock;

/// A [`PropertyResource`] that keeps its document in memory.
#[derive(Debug, Default)]
pub struct MemoryResource {
    root: RwLock<ResourceNode>,
}

impl MemoryResource {
    pub fn new(root: impl Into<ResourceNode>) -> Self {
        Self {
            root: RwLock::new(root.into()),
        }
    }

    /// A copy of the current document.
    pub fn snapshot(&self) -> ResourceNode {
        self.root.read().clone()
    }

    /// Replaces the document, e.g. to simulate an edit before a reload.
    pub fn replace(&self, root: impl Into<ResourceNode>) {
        *self.root.write() = root.into();
    }
}

impl PropertyResource for MemoryResource {
    fn create_reader(&self) -> Result<Box<dyn PropertyReader>, ConfigError> {
        Ok(Box::new(NodeReader::new(self.snapshot())))
    }

    fn export_properties(&self, data: &ConfigurationData) -> Result<(), ConfigError> {
        *self.root.write() = data.export_tree();
        Ok(())
    }
}
