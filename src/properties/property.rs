//! # Property
//!
//! A [`Property<T>`] is a typed, path-addressed declaration with a default value.
//! Resolving it against a resource always yields a value: the stored one when it
//! converts, otherwise the default.
//!
//! # Architecture Note
//! `Property` is a cheap handle over shared, immutable state. Settings holders keep
//! one in a `static`, the [`ConfigurationData`](crate::configuration::ConfigurationData)
//! keeps a clone, and both refer to the same declaration. The path may be bound late,
//! exactly once, by whoever registers the property.

use crate::convert::{ConfigValue, ConvertErrorRecorder, PropertyValue};
use crate::error::ConfigError;
use crate::resource::{PropertyReader, ResourceNode};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

struct PropertyInner<T> {
    path: OnceLock<String>,
    default: T,
}

/// A typed configuration value at a dot-separated path.
///
/// ```rust
/// use settings_mapper::properties::Property;
/// use settings_mapper::resource::ResourceNode;
/// use serde_json::json;
///
/// let size = Property::new("title.size", 12u32);
/// let root = ResourceNode::from(json!({ "title": { "size": 20 } }));
///
/// let resolved = size.resolve(&root).unwrap();
/// assert_eq!(*resolved.value(), 20);
/// assert!(resolved.is_valid());
/// ```
pub struct Property<T: ConfigValue> {
    inner: Arc<PropertyInner<T>>,
}

impl<T: ConfigValue> Property<T> {
    pub fn new(path: impl Into<String>, default: T) -> Self {
        let property = Self::unbound(default);
        let _ = property.inner.path.set(path.into());
        property
    }

    /// A property whose path is assigned later with [`Property::bind_path`].
    pub fn unbound(default: T) -> Self {
        Self {
            inner: Arc::new(PropertyInner {
                path: OnceLock::new(),
                default,
            }),
        }
    }

    /// Assigns the path of an unbound property.
    ///
    /// Binding the path a property already has is a no-op.
    ///
    /// # Errors
    /// [`ConfigError::PathReassigned`] if the property is bound to another path.
    pub fn bind_path(&self, path: &str) -> Result<(), ConfigError> {
        let current = self.inner.path.get_or_init(|| path.to_owned());
        if current == path {
            Ok(())
        } else {
            Err(ConfigError::PathReassigned {
                current: current.clone(),
                requested: path.to_owned(),
            })
        }
    }

    /// The bound path, if any.
    pub fn path(&self) -> Option<&str> {
        self.inner.path.get().map(String::as_str)
    }

    pub(crate) fn require_path(&self) -> Result<&str, ConfigError> {
        self.path()
            .ok_or_else(|| ConfigError::MissingPath(format!("{:?}", self.inner.default)))
    }

    pub fn default_value(&self) -> &T {
        &self.inner.default
    }

    /// Resolves the property against a whole document.
    ///
    /// # Errors
    /// Only definition errors: the property has no path, or a bean type in `T` is
    /// declared incorrectly. Unusable data yields the default with `is_valid == false`.
    pub fn resolve(&self, root: &ResourceNode) -> Result<PropertyValue<T>, ConfigError> {
        let path = self.require_path()?;
        let mut errors = ConvertErrorRecorder::new();

        let resolved = match T::from_node(root.at_path(path), &mut errors)? {
            Some(value) if self.is_valid_value(&value) => {
                PropertyValue::new(value, errors.is_fully_valid())
            }
            _ => PropertyValue::requiring_rewrite(self.inner.default.clone()),
        };
        debug!(path, valid = resolved.is_valid(), "Property resolved");
        Ok(resolved)
    }

    /// Resolves the property from a loaded resource.
    pub fn determine_value(
        &self,
        reader: &dyn PropertyReader,
    ) -> Result<PropertyValue<T>, ConfigError> {
        self.resolve(reader.root())
    }

    /// Whether `value` may be assigned to this property.
    pub fn is_valid_value(&self, value: &T) -> bool {
        value.is_valid()
    }

    /// The node written to the resource for `value`.
    pub fn to_export_value(&self, value: &T) -> ResourceNode {
        value.to_node()
    }

    /// Whether both handles refer to the same declaration.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: ConfigValue> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ConfigValue> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("path", &self.path())
            .field("default", &self.inner.default)
            .finish()
    }
}

impl<T: ConfigValue> fmt::Display for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property '{}'", self.path().unwrap_or_default())
    }
}
