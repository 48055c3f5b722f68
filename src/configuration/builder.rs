//! Registration of properties into [`ConfigurationData`].

use super::data::ConfigurationData;
use super::erased::{ErasedProperty, Registered};
use crate::convert::ConfigValue;
use crate::error::ConfigError;
use crate::properties::Property;
use std::collections::HashSet;
use tracing::debug;

/// A type that declares a group of properties.
///
/// ```rust
/// use settings_mapper::configuration::{ConfigurationData, ConfigurationDataBuilder, SettingsHolder};
/// use settings_mapper::properties::{IntegerProperty, StringProperty};
/// use std::sync::LazyLock;
///
/// static TITLE_TEXT: LazyLock<StringProperty> =
///     LazyLock::new(|| StringProperty::new("title.text", "Test".to_owned()));
/// static TITLE_SIZE: LazyLock<IntegerProperty> =
///     LazyLock::new(|| IntegerProperty::unbound(12));
///
/// struct TitleConfig;
///
/// impl SettingsHolder for TitleConfig {
///     fn register_properties(builder: &mut ConfigurationDataBuilder) {
///         builder.add(&TITLE_TEXT).add_at("title.size", &TITLE_SIZE);
///     }
/// }
///
/// let data = ConfigurationData::builder().with_holder::<TitleConfig>().build().unwrap();
/// assert_eq!(data.value(&TITLE_SIZE).unwrap(), 12);
/// ```
pub trait SettingsHolder {
    /// Adds this holder's properties to `builder`, in the order they should be
    /// written.
    fn register_properties(builder: &mut ConfigurationDataBuilder);
}

/// Collects properties and validates their paths.
///
/// Registration errors are kept and reported by [`ConfigurationDataBuilder::build`],
/// so holders can register without handling errors themselves.
#[derive(Default)]
pub struct ConfigurationDataBuilder {
    properties: Vec<Box<dyn ErasedProperty>>,
    error: Option<ConfigError>,
}

impl ConfigurationDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property that already has a path.
    pub fn add<T: ConfigValue>(&mut self, property: &Property<T>) -> &mut Self {
        if self.error.is_none() {
            match Registered::new(property) {
                Ok(registered) => self.properties.push(Box::new(registered)),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Binds `path` to `property` and registers it.
    pub fn add_at<T: ConfigValue>(&mut self, path: &str, property: &Property<T>) -> &mut Self {
        if let Err(e) = property.bind_path(path) {
            self.error.get_or_insert(e);
            return self;
        }
        self.add(property)
    }

    pub fn with_property<T: ConfigValue>(mut self, property: &Property<T>) -> Self {
        self.add(property);
        self
    }

    pub fn with_holder<H: SettingsHolder>(mut self) -> Self {
        H::register_properties(&mut self);
        self
    }

    /// Validates the registered paths and creates the data, with every property at
    /// its default value.
    ///
    /// # Errors
    /// The first registration error, [`ConfigError::DuplicatePath`], or
    /// [`ConfigError::PathConflict`] when one path is nested under another.
    pub fn build(self) -> Result<ConfigurationData, ConfigError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let mut paths = HashSet::with_capacity(self.properties.len());
        for property in &self.properties {
            if !paths.insert(property.path()) {
                return Err(ConfigError::DuplicatePath(property.path().to_owned()));
            }
        }
        for property in &self.properties {
            if let Some(parent) = find_parent(property.path(), &paths) {
                return Err(ConfigError::PathConflict {
                    parent: parent.to_owned(),
                    child: property.path().to_owned(),
                });
            }
        }

        debug!(properties = self.properties.len(), "Configuration data built");
        Ok(ConfigurationData::new(self.properties))
    }
}

/// Finds a registered path that `path` is nested under. The empty path is the
/// parent of every other path.
fn find_parent<'a>(path: &str, paths: &HashSet<&'a str>) -> Option<&'a str> {
    if path.is_empty() {
        return None;
    }
    if let Some(root) = paths.get("") {
        return Some(*root);
    }
    path.match_indices('.')
        .filter_map(|(index, _)| paths.get(&path[..index]).copied())
        .next()
}
