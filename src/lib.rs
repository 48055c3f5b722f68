#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Settings Mapper
//!
//! > **Typed configuration properties over semi-structured documents.**
//!
//! An application declares its settings as typed [`Property`](properties::Property)
//! values with a path and a default. This crate loads them from a resource (a tree of
//! mappings, sequences and scalars), converts each node into its declared type, and
//! writes the values back when the resource is missing something.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Every property always has a value
//! Resolution never fails because of *data*. A missing node, a string where a number
//! was expected, or a bean without a required field all fall back to the property's
//! default. What the caller learns instead is a verdict: was the resource fully valid,
//! or does it need to be rewritten?
//!
//! ### Declarations fail loudly
//! A bean without a constructor or two properties fighting over one path are bugs in
//! the program, not in the file. They surface as [`ConfigError`]s at startup.
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: one converter per type
//! The [`ConfigValue`](convert::ConfigValue) trait is implemented by every type a
//! property can hold. `Vec<T>`, `IndexMap<String, T>` and `Option<T>` compose the
//! implementation of `T`, so `Property<IndexMap<String, Vec<Group>>>` needs no extra
//! code beyond the `Group` bean.
//!
//! ### Beans
//! Structured records are described declaratively with [`impl_bean!`]: field paths,
//! types and optional defaults. See the [`beanmapper`] module.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Partial validity
//! A [`ConvertErrorRecorder`](convert::ConvertErrorRecorder) is threaded through one
//! resolution. Every default applied deep inside the value (a dropped list element,
//! a defaulted bean field) marks it, and the property's
//! [`PropertyValue`](convert::PropertyValue) reports `is_valid == false` while still
//! carrying everything that could be used.
//!
//! ### 2. Observability
//! We use `tracing` with structured fields (`path`, `valid`, `bean`, `field`).
//! See [`settings::setup_tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Document ([`resource`])
//! - **Role**: The untyped node tree, read access by path, and the JSON and in-memory stores.
//! - **Key items**: [`ResourceNode`](resource::ResourceNode), [`PropertyResource`](resource::PropertyResource).
//!
//! ### 2. The Converters ([`convert`], [`beanmapper`])
//! - **Role**: Turn nodes into typed values and back, tracking partial validity.
//! - **Key items**: [`ConfigValue`](convert::ConfigValue), [`Bean`](beanmapper::Bean).
//!
//! ### 3. The Declarations ([`properties`], [`configuration`])
//! - **Role**: Typed properties, their registration, and their current values.
//! - **Key items**: [`Property`](properties::Property), [`ConfigurationData`](configuration::ConfigurationData).
//!
//! ### 4. The Facade ([`settings`], [`migration`])
//! - **Role**: Load, migrate, modify and save.
//! - **Key items**: [`SettingsManager`](settings::SettingsManager).
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Loads (and creates) settings.json in the current directory
//! RUST_LOG=info cargo run -- settings.json
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod beanmapper;
pub mod configuration;
pub mod convert;
pub mod error;
pub mod migration;
pub mod properties;
pub mod resource;
pub mod settings;

pub use error::ConfigError;

#[doc(hidden)]
pub use ::paste as __paste;
