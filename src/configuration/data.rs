//! # Configuration Data
//!
//! [`ConfigurationData`] is the set of registered properties together with their
//! current values. Values are resolved from a reader, read and replaced through the
//! typed [`Property`] handles, and exported back as one document.
//!
//! # Architecture Note
//! Properties of different value types share one registration-ordered list behind a
//! type-erased trait. The typed [`Property<T>`] handle is the only way to read or
//! write a value, so a value is always handed out as the `T` it was stored as.

use super::erased::{ErasedProperty, StoredValue};
use crate::convert::ConfigValue;
use crate::error::ConfigError;
use crate::properties::Property;
use crate::resource::{PropertyReader, ResourceNode};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Registered properties and their current values.
pub struct ConfigurationData {
    properties: Vec<Box<dyn ErasedProperty>>,
    values: HashMap<String, StoredValue>,
    all_valid: bool,
}

impl ConfigurationData {
    pub fn builder() -> super::ConfigurationDataBuilder {
        super::ConfigurationDataBuilder::new()
    }

    /// Creates the data with every property at its default value.
    pub(crate) fn new(properties: Vec<Box<dyn ErasedProperty>>) -> Self {
        let values = properties
            .iter()
            .map(|property| (property.path().to_owned(), property.default_value()))
            .collect();
        Self {
            properties,
            values,
            all_valid: true,
        }
    }

    /// The paths of all registered properties, in registration order.
    pub fn property_paths(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|property| property.path())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Resolves every property from `reader`, replacing all current values.
    ///
    /// # Errors
    /// Definition errors of any property's value type. Values are left untouched
    /// when an error is returned.
    pub fn initialize_values(&mut self, reader: &dyn PropertyReader) -> Result<(), ConfigError> {
        let mut values = HashMap::with_capacity(self.properties.len());
        let mut all_valid = true;
        for property in &self.properties {
            let (value, is_valid) = property.determine_value(reader)?;
            if !is_valid {
                debug!(path = property.path(), "Property needs rewrite");
            }
            all_valid &= is_valid;
            values.insert(property.path().to_owned(), value);
        }

        self.values = values;
        self.all_valid = all_valid;
        Ok(())
    }

    /// The current value of `property`.
    ///
    /// # Errors
    /// [`ConfigError::UnknownProperty`] if no property of type `T` is registered
    /// under the property's path.
    pub fn value<T: ConfigValue>(&self, property: &Property<T>) -> Result<T, ConfigError> {
        let path = property.require_path()?;
        self.values
            .get(path)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
            .ok_or_else(|| ConfigError::UnknownProperty(path.to_owned()))
    }

    /// Replaces the current value of `property`.
    ///
    /// # Errors
    /// [`ConfigError::UnknownProperty`] for unregistered properties and
    /// [`ConfigError::InvalidValue`] when [`Property::is_valid_value`] rejects `value`.
    pub fn set_value<T: ConfigValue>(
        &mut self,
        property: &Property<T>,
        value: T,
    ) -> Result<(), ConfigError> {
        let path = property.require_path()?;
        let slot = self
            .values
            .get_mut(path)
            .filter(|current| current.is::<T>())
            .ok_or_else(|| ConfigError::UnknownProperty(path.to_owned()))?;

        if !property.is_valid_value(&value) {
            warn!(path, value = ?value, "Rejected invalid value");
            return Err(ConfigError::InvalidValue(path.to_owned()));
        }
        *slot = Box::new(value);
        Ok(())
    }

    /// Whether every property was fully valid in the last resource it was
    /// initialized from.
    pub fn are_all_values_valid_in_resource(&self) -> bool {
        self.all_valid
    }

    /// Builds the document holding every current value, in registration order.
    ///
    /// Properties sharing a parent path end up in the same mapping, positioned where
    /// the parent was first seen.
    pub fn export_tree(&self) -> ResourceNode {
        let mut root = ResourceNode::empty_mapping();
        for property in &self.properties {
            if let Some(value) = self.values.get(property.path()) {
                root.insert_at(property.path(), property.export(value));
            }
        }
        root
    }
}

impl Default for ConfigurationData {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for ConfigurationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationData")
            .field("properties", &self.property_paths().collect::<Vec<_>>())
            .field("all_valid", &self.all_valid)
            .finish()
    }
}
