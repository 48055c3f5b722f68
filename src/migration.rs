//! # Migration
//!
//! After the configuration data has been initialized from a resource, a
//! [`MigrationService`] decides whether the resource must be written back, and may
//! adjust values first (e.g. carry a value over from a renamed path).

use crate::configuration::ConfigurationData;
use crate::convert::ConfigValue;
use crate::error::ConfigError;
use crate::properties::Property;
use crate::resource::PropertyReader;
use tracing::{debug, info};

/// Checks a freshly loaded resource and migrates its values.
pub trait MigrationService: Send + Sync {
    /// Returns `true` when the resource must be saved.
    fn check_and_migrate(
        &self,
        reader: &dyn PropertyReader,
        data: &mut ConfigurationData,
    ) -> Result<bool, ConfigError>;
}

type Migration = Box<
    dyn Fn(&dyn PropertyReader, &mut ConfigurationData) -> Result<bool, ConfigError> + Send + Sync,
>;

/// Runs the registered migrations, then requests a save whenever a migration
/// changed something or some property was not fully valid in the resource.
#[derive(Default)]
pub struct PlainMigrationService {
    migrations: Vec<Migration>,
}

impl PlainMigrationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a migration step. It returns `true` when it modified the data.
    ///
    /// ```rust
    /// use settings_mapper::migration::{move_property, PlainMigrationService};
    /// use settings_mapper::properties::Property;
    ///
    /// let old = Property::new("title.caption", String::new());
    /// let new = Property::new("title.text", "Test".to_owned());
    /// let service = PlainMigrationService::new()
    ///     .with_migration(move |reader, data| move_property(&old, &new, reader, data));
    /// ```
    pub fn with_migration<F>(mut self, migration: F) -> Self
    where
        F: Fn(&dyn PropertyReader, &mut ConfigurationData) -> Result<bool, ConfigError>
            + Send
            + Sync
            + 'static,
    {
        self.migrations.push(Box::new(migration));
        self
    }
}

impl MigrationService for PlainMigrationService {
    fn check_and_migrate(
        &self,
        reader: &dyn PropertyReader,
        data: &mut ConfigurationData,
    ) -> Result<bool, ConfigError> {
        let mut migrated = false;
        for migration in &self.migrations {
            migrated |= migration(reader, data)?;
        }
        log_obsolete_paths(reader, data);

        if migrated {
            info!("Migrations applied");
            return Ok(true);
        }
        Ok(!data.are_all_values_valid_in_resource())
    }
}

/// Carries the value stored under `old`'s path over to `new`.
///
/// Returns `true` when `old`'s path exists in the resource, i.e. the resource needs
/// to be rewritten without it. The value is only moved when `new`'s path is not in
/// the resource yet and the old entry resolved to a value that is valid for `new`.
pub fn move_property<T: ConfigValue>(
    old: &Property<T>,
    new: &Property<T>,
    reader: &dyn PropertyReader,
    data: &mut ConfigurationData,
) -> Result<bool, ConfigError> {
    let old_path = old.require_path()?;
    if !reader.contains(old_path) {
        return Ok(false);
    }
    if !reader.contains(new.require_path()?) {
        let resolved = old.determine_value(reader)?;
        if resolved.is_valid() && new.is_valid_value(resolved.value()) {
            data.set_value(new, resolved.into_value())?;
            debug!(from = old_path, to = new.require_path()?, "Property moved");
        } else {
            debug!(from = old_path, "Old entry not convertible, nothing moved");
        }
    }
    Ok(true)
}

/// Logs resource entries that no registered property covers. They are dropped on
/// the next save.
fn log_obsolete_paths(reader: &dyn PropertyReader, data: &ConfigurationData) {
    let registered: Vec<&str> = data.property_paths().collect();
    for leaf in reader.leaf_paths() {
        let covered = registered.iter().any(|path| {
            path.is_empty()
                || leaf == *path
                || leaf
                    .strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('.'))
        });
        if !covered {
            debug!(path = %leaf, "Obsolete entry in resource");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::NodeReader;
    use serde_json::json;

    fn load(
        service: &PlainMigrationService,
        data: &mut ConfigurationData,
        document: serde_json::Value,
    ) -> bool {
        let reader = NodeReader::from(document);
        data.initialize_values(&reader).unwrap();
        service.check_and_migrate(&reader, data).unwrap()
    }

    #[test]
    fn test_plain_service_saves_only_when_invalid() {
        let size = Property::new("size", 12u32);
        let mut data = ConfigurationData::builder().with_property(&size).build().unwrap();
        let service = PlainMigrationService::new();

        assert!(!load(&service, &mut data, json!({ "size": 14, "obsolete": true })));
        assert!(load(&service, &mut data, json!({ "size": "big" })));
        assert!(load(&service, &mut data, json!({})));
    }

    #[test]
    fn test_move_property_carries_old_value() {
        let old = Property::new("title.caption", String::new());
        let new = Property::new("title.text", "Test".to_owned());
        let mut data = ConfigurationData::builder().with_property(&new).build().unwrap();
        let service = {
            let (old, new) = (old.clone(), new.clone());
            PlainMigrationService::new()
                .with_migration(move |reader, data| move_property(&old, &new, reader, data))
        };

        assert!(load(&service, &mut data, json!({ "title": { "caption": "Moved" } })));
        assert_eq!(data.value(&new).unwrap(), "Moved");

        assert!(load(
            &service,
            &mut data,
            json!({ "title": { "caption": "Old", "text": "Kept" } })
        ));
        assert_eq!(data.value(&new).unwrap(), "Kept");

        assert!(!load(&service, &mut data, json!({ "title": { "text": "Kept" } })));
    }

    #[test]
    fn test_move_property_skips_unconvertible_old_value() {
        let old = Property::new("old.size", 0u32);
        let new = Property::new("new.size", 50u32);
        let mut data = ConfigurationData::builder().with_property(&new).build().unwrap();
        let service = {
            let (old, new) = (old.clone(), new.clone());
            PlainMigrationService::new()
                .with_migration(move |reader, data| move_property(&old, &new, reader, data))
        };

        assert!(load(&service, &mut data, json!({ "old": { "size": "huge" } })));
        assert_eq!(data.value(&new).unwrap(), 50);

        assert!(load(&service, &mut data, json!({ "old": { "size": 30 } })));
        assert_eq!(data.value(&new).unwrap(), 30);
    }
}
