//! # Errors
//!
//! This module defines the error type shared by every layer of the crate.
//!
//! Malformed or missing *data* is never an error here: the converters absorb it and
//! report it through [`PropertyValue::is_valid`](crate::convert::PropertyValue::is_valid).
//! A [`ConfigError`] means either the configuration was *declared* incorrectly
//! (a definition error, which should stop the application at startup) or the
//! backing resource could not be read or written.

use std::path::PathBuf;

/// Errors raised by property declarations, bean descriptors and resources.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A bean type cannot be mapped, e.g. its descriptor has no constructor.
    #[error("Invalid bean definition for '{bean}': {reason}")]
    BeanDefinition { bean: &'static str, reason: String },

    /// A property was registered before a path was assigned to it.
    #[error("Property has no path assigned (default value: {0})")]
    MissingPath(String),

    /// A property path may only be assigned once.
    #[error("Property path already assigned to '{current}', cannot reassign to '{requested}'")]
    PathReassigned { current: String, requested: String },

    /// Two registered properties share the same path.
    #[error("Duplicate property path: {0}")]
    DuplicatePath(String),

    /// One property path is the parent of another, e.g. `title` and `title.text`.
    #[error("Property path '{parent}' conflicts with nested path '{child}'")]
    PathConflict { parent: String, child: String },

    /// The property is not part of the configuration data.
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// A value was rejected by [`Property::is_valid_value`](crate::properties::Property::is_valid_value).
    #[error("Invalid value for property '{0}'")]
    InvalidValue(String),

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed resource '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Returns `true` for errors caused by how the configuration was declared
    /// rather than by the resource it was loaded from.
    pub fn is_definition_error(&self) -> bool {
        !matches!(self, ConfigError::Io { .. } | ConfigError::Parse { .. })
    }

    pub(crate) fn bean_definition<B>(reason: impl Into<String>) -> Self {
        ConfigError::BeanDefinition {
            bean: short_type_name::<B>(),
            reason: reason.into(),
        }
    }
}

/// Extracts just the type name (e.g. "Group" instead of "my_app::settings::Group").
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
