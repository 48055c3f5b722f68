//! Converters between [`ResourceNode`](crate::resource::ResourceNode)s and typed values.
//!
//! # Main Components
//!
//! - [`ConfigValue`] - the converter contract, implemented per target type
//! - [`ConvertErrorRecorder`] - tracks partial validity through one resolution
//! - [`PropertyValue`] - the `(value, is_valid)` outcome of resolving a property
//! - [`ConfigEnum`] - name-based enum conversion, see [`impl_config_enum!`](crate::impl_config_enum)
//!
//! Beans (structured records) implement [`ConfigValue`] through the
//! [`beanmapper`](crate::beanmapper) module.

mod collection;
pub mod config_value;
pub mod enums;
pub mod recorder;
mod scalar;
pub mod value;

pub use config_value::{ConfigValue, ElementPolicy};
pub use enums::{enum_from_node, ConfigEnum};
pub use recorder::ConvertErrorRecorder;
pub use value::PropertyValue;
