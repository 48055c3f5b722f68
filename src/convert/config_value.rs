//! # ConfigValue Trait
//!
//! The `ConfigValue` trait is the converter contract: every type that can be the value
//! of a [`Property`](crate::properties::Property), an element of a list, a map value or
//! a bean field implements it. It turns a [`ResourceNode`] into a typed value and a
//! typed value back into a node.
//!
//! # Architecture Note
//! Resolution dispatches statically on `T`, so the "converter registered for T" is
//! simply `T`'s implementation. Nested types (`Vec<Group>`, `IndexMap<String, Vec<u32>>`)
//! compose their element converters without any runtime registry.
//!
//! # Two Kinds of Failure
//! - `Ok(None)`: the data does not fit `Self` (wrong node kind, out-of-range number,
//!   missing required field). Callers recover by substituting a default.
//! - `Err(ConfigError)`: `Self` itself is declared incorrectly (see
//!   [`ConfigError::is_definition_error`]). Never recovered from.

use super::recorder::ConvertErrorRecorder;
use crate::error::ConfigError;
use crate::resource::ResourceNode;
use std::fmt::Debug;

/// How a collection treats an element that cannot be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPolicy {
    /// Drop the element and mark the recorder; the rest of the collection survives.
    Lenient,
    /// The whole collection yields no value.
    Strict,
}

/// Conversion between a typed value and the resource node model.
pub trait ConfigValue: Clone + Debug + Send + Sync + 'static {
    /// Policy applied when this type is the element of a `Vec` or the value of a map.
    const ELEMENT_POLICY: ElementPolicy = ElementPolicy::Strict;

    /// Converts `node` into `Self`.
    ///
    /// Sub-values that had to be replaced by defaults are reported through `errors`;
    /// the caller still receives a value in that case.
    fn from_node(
        node: &ResourceNode,
        errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError>;

    /// Converts `node` when it appears as a collection element.
    ///
    /// Defaults to [`ConfigValue::from_node`]; string elements override it to accept
    /// any scalar.
    fn from_element(
        node: &ResourceNode,
        errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError> {
        Self::from_node(node, errors)
    }

    /// The node written to the resource for this value.
    fn to_node(&self) -> ResourceNode;

    /// Whether the value may be assigned to a property and exported.
    fn is_valid(&self) -> bool {
        true
    }
}
