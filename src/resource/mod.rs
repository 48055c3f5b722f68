//! Resource backends: the untyped node model, read access and persistence.
//!
//! - [`ResourceNode`] - the semi-structured tree converters operate on
//! - [`PropertyReader`] - path-based read access to a loaded tree
//! - [`PropertyResource`] - a backing store that produces readers and persists exports
//! - [`JsonResource`] / [`MemoryResource`] - the bundled stores

pub mod json;
pub mod memory;
pub mod node;
pub mod reader;

pub use json::JsonResource;
pub use memory::MemoryResource;
pub use node::{ResourceNode, Scalar};
pub use reader::{NodeReader, PropertyReader};

use crate::configuration::ConfigurationData;
use crate::error::ConfigError;

/// A backing store for configuration values.
pub trait PropertyResource: Send + Sync {
    /// Reads the current contents of the store.
    fn create_reader(&self) -> Result<Box<dyn PropertyReader>, ConfigError>;

    /// Replaces the contents of the store with the current values of `data`.
    fn export_properties(&self, data: &ConfigurationData) -> Result<(), ConfigError>;
}
