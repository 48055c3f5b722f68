//! Typed property declarations.
//!
//! Every property is a [`Property<T>`]; the aliases below name the common shapes.
//! Declare properties as statics so they can be shared by the code that reads them
//! and the [`SettingsHolder`](crate::configuration::SettingsHolder) that registers
//! them:
//!
//! ```rust
//! use settings_mapper::properties::{IntegerProperty, StringProperty};
//! use std::sync::LazyLock;
//!
//! pub static TITLE_TEXT: LazyLock<StringProperty> =
//!     LazyLock::new(|| StringProperty::new("title.text", "Test".to_owned()));
//! pub static TITLE_SIZE: LazyLock<IntegerProperty> =
//!     LazyLock::new(|| IntegerProperty::new("title.size", 12));
//! ```

mod property;

pub use property::Property;

use indexmap::IndexMap;

pub type BooleanProperty = Property<bool>;
pub type IntegerProperty = Property<i32>;
pub type LongProperty = Property<i64>;
pub type DoubleProperty = Property<f64>;
pub type StringProperty = Property<String>;
pub type StringListProperty = Property<Vec<String>>;
pub type ListProperty<T> = Property<Vec<T>>;
pub type MapProperty<T> = Property<IndexMap<String, T>>;
/// A property whose value is an [`impl_config_enum!`](crate::impl_config_enum) enum.
pub type EnumProperty<E> = Property<E>;
/// A property whose value is a [`Bean`](crate::beanmapper::Bean).
pub type BeanProperty<B> = Property<B>;
/// A property that is valid when absent; `None` is omitted on export.
pub type OptionalProperty<T> = Property<Option<T>>;
