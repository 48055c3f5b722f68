//! Type erasure for registered properties, so properties of different value types
//! can live in one ordered list.

use crate::convert::ConfigValue;
use crate::error::ConfigError;
use crate::properties::Property;
use crate::resource::{PropertyReader, ResourceNode};
use std::any::Any;

pub(crate) type StoredValue = Box<dyn Any + Send + Sync>;

pub(crate) trait ErasedProperty: Send + Sync {
    fn path(&self) -> &str;

    fn default_value(&self) -> StoredValue;

    /// Resolves the property; returns the value and whether it was fully valid.
    fn determine_value(
        &self,
        reader: &dyn PropertyReader,
    ) -> Result<(StoredValue, bool), ConfigError>;

    fn export(&self, value: &StoredValue) -> ResourceNode;
}

pub(crate) struct Registered<T: ConfigValue> {
    property: Property<T>,
    path: String,
}

impl<T: ConfigValue> Registered<T> {
    pub(crate) fn new(property: &Property<T>) -> Result<Self, ConfigError> {
        let path = property.require_path()?.to_owned();
        Ok(Self {
            property: property.clone(),
            path,
        })
    }
}

impl<T: ConfigValue> ErasedProperty for Registered<T> {
    fn path(&self) -> &str {
        &self.path
    }

    fn default_value(&self) -> StoredValue {
        Box::new(self.property.default_value().clone())
    }

    fn determine_value(
        &self,
        reader: &dyn PropertyReader,
    ) -> Result<(StoredValue, bool), ConfigError> {
        let resolved = self.property.determine_value(reader)?;
        let is_valid = resolved.is_valid();
        Ok((Box::new(resolved.into_value()), is_valid))
    }

    fn export(&self, value: &StoredValue) -> ResourceNode {
        value
            .downcast_ref::<T>()
            .map(|value| self.property.to_export_value(value))
            .unwrap_or_default()
    }
}
