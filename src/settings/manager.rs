//! # Settings Manager
//!
//! The facade applications interact with after startup: it owns the resource, the
//! configuration data and the migration service, and keeps the three in sync.
//!
//! # Architecture Note
//! Building the manager loads the resource immediately, so every definition error
//! (bad bean descriptor, clashing paths) surfaces at startup rather than on first
//! access. A load that finds missing or unusable values rewrites the resource with
//! the values that were actually used.

use crate::configuration::{ConfigurationData, SettingsHolder};
use crate::convert::ConfigValue;
use crate::error::ConfigError;
use crate::migration::{MigrationService, PlainMigrationService};
use crate::properties::Property;
use crate::resource::PropertyResource;
use tracing::{info, warn};

/// Looks up and modifies properties backed by a [`PropertyResource`].
///
/// ```rust
/// use settings_mapper::properties::Property;
/// use settings_mapper::resource::MemoryResource;
/// use settings_mapper::settings::SettingsManager;
/// use settings_mapper::configuration::ConfigurationData;
/// use serde_json::json;
///
/// let size = Property::new("title.size", 12u32);
/// let data = ConfigurationData::builder().with_property(&size).build().unwrap();
/// let resource = MemoryResource::new(json!({ "title": { "size": 20 } }));
///
/// let mut settings = SettingsManager::builder(resource)
///     .configuration_data(data)
///     .build()
///     .unwrap();
/// assert_eq!(settings.property(&size).unwrap(), 20);
///
/// settings.set_property(&size, 24).unwrap();
/// settings.save().unwrap();
/// ```
pub struct SettingsManager {
    resource: Box<dyn PropertyResource>,
    data: ConfigurationData,
    migration: Box<dyn MigrationService>,
}

impl SettingsManager {
    pub fn builder<R: PropertyResource + 'static>(resource: R) -> SettingsManagerBuilder {
        SettingsManagerBuilder {
            resource: Box::new(resource),
            data: None,
            migration: None,
        }
    }

    /// The current value of `property`.
    pub fn property<T: ConfigValue>(&self, property: &Property<T>) -> Result<T, ConfigError> {
        self.data.value(property)
    }

    /// Replaces the value of `property` in memory. Call [`SettingsManager::save`]
    /// to persist it.
    pub fn set_property<T: ConfigValue>(
        &mut self,
        property: &Property<T>,
        value: T,
    ) -> Result<(), ConfigError> {
        self.data.set_value(property, value)
    }

    /// Re-reads the resource, discarding unsaved changes.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        self.load()?;
        info!(properties = self.data.len(), "Settings reloaded");
        Ok(())
    }

    /// Writes every current value to the resource.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.resource.export_properties(&self.data)
    }

    pub fn configuration_data(&self) -> &ConfigurationData {
        &self.data
    }

    fn load(&mut self) -> Result<(), ConfigError> {
        let reader = self.resource.create_reader()?;
        self.data.initialize_values(reader.as_ref())?;
        if self
            .migration
            .check_and_migrate(reader.as_ref(), &mut self.data)?
        {
            warn!("Resource has missing or invalid values, rewriting it");
            self.save()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for SettingsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsManager")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

/// Builder for [`SettingsManager`].
pub struct SettingsManagerBuilder {
    resource: Box<dyn PropertyResource>,
    data: Option<ConfigurationData>,
    migration: Option<Box<dyn MigrationService>>,
}

impl SettingsManagerBuilder {
    pub fn configuration_data(mut self, data: ConfigurationData) -> Self {
        self.data = Some(data);
        self
    }

    /// Builds the configuration data from a single settings holder.
    pub fn holder<H: SettingsHolder>(mut self) -> Result<Self, ConfigError> {
        self.data = Some(ConfigurationData::builder().with_holder::<H>().build()?);
        Ok(self)
    }

    /// Defaults to [`PlainMigrationService`].
    pub fn migration_service<M: MigrationService + 'static>(mut self, migration: M) -> Self {
        self.migration = Some(Box::new(migration));
        self
    }

    /// Creates the manager and loads the resource.
    pub fn build(self) -> Result<SettingsManager, ConfigError> {
        let data = self.data.unwrap_or_else(|| {
            warn!("Settings manager built without configuration data");
            ConfigurationData::default()
        });
        let mut manager = SettingsManager {
            resource: self.resource,
            data,
            migration: self
                .migration
                .unwrap_or_else(|| Box::new(PlainMigrationService::new())),
        };
        manager.load()?;
        info!(properties = manager.data.len(), "Settings loaded");
        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{MemoryResource, ResourceNode};
    use serde_json::json;
    use std::sync::Arc;

    /// Shares one in-memory document between the manager and the test.
    #[derive(Clone, Default)]
    struct SharedResource(Arc<MemoryResource>);

    impl PropertyResource for SharedResource {
        fn create_reader(
            &self,
        ) -> Result<Box<dyn crate::resource::PropertyReader>, ConfigError> {
            self.0.create_reader()
        }

        fn export_properties(&self, data: &ConfigurationData) -> Result<(), ConfigError> {
            self.0.export_properties(data)
        }
    }

    fn manager(resource: &SharedResource, size: &Property<u32>) -> SettingsManager {
        let data = ConfigurationData::builder().with_property(size).build().unwrap();
        SettingsManager::builder(resource.clone())
            .configuration_data(data)
            .build()
            .unwrap()
    }

    #[test]
    fn test_load_rewrites_incomplete_resource() {
        let resource = SharedResource::default();
        resource.0.replace(json!({ "size": "huge", "stale": 1 }));
        let size = Property::new("size", 12u32);

        let settings = manager(&resource, &size);
        assert_eq!(settings.property(&size).unwrap(), 12);
        assert_eq!(resource.0.snapshot(), ResourceNode::from(json!({ "size": 12 })));
    }

    #[test]
    fn test_valid_resource_is_left_alone() {
        let resource = SharedResource::default();
        resource.0.replace(json!({ "size": 20, "stale": 1 }));
        let size = Property::new("size", 12u32);

        let settings = manager(&resource, &size);
        assert_eq!(settings.property(&size).unwrap(), 20);
        assert_eq!(
            resource.0.snapshot(),
            ResourceNode::from(json!({ "size": 20, "stale": 1 }))
        );
    }

    #[test]
    fn test_set_save_and_reload() {
        let resource = SharedResource::default();
        resource.0.replace(json!({ "size": 20 }));
        let size = Property::new("size", 12u32);
        let mut settings = manager(&resource, &size);

        settings.set_property(&size, 30).unwrap();
        settings.reload().unwrap();
        assert_eq!(settings.property(&size).unwrap(), 20);

        settings.set_property(&size, 30).unwrap();
        settings.save().unwrap();
        resource.0.replace(json!({ "size": 40 }));
        settings.reload().unwrap();
        assert_eq!(settings.property(&size).unwrap(), 40);
    }

    #[test]
    fn test_migration_service_decides_on_save() {
        struct NeverSave;

        impl MigrationService for NeverSave {
            fn check_and_migrate(
                &self,
                _reader: &dyn crate::resource::PropertyReader,
                _data: &mut ConfigurationData,
            ) -> Result<bool, ConfigError> {
                Ok(false)
            }
        }

        let resource = SharedResource::default();
        let size = Property::new("size", 12u32);
        let data = ConfigurationData::builder().with_property(&size).build().unwrap();
        let settings = SettingsManager::builder(resource.clone())
            .configuration_data(data)
            .migration_service(NeverSave)
            .build()
            .unwrap();
        assert_eq!(settings.property(&size).unwrap(), 12);
        assert_eq!(resource.0.snapshot(), ResourceNode::Absent);
    }
}
