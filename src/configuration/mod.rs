//! The registered properties of an application and their current values.
//!
//! - [`SettingsHolder`] - declares a group of properties
//! - [`ConfigurationDataBuilder`] - collects properties and rejects clashing paths
//! - [`ConfigurationData`] - resolves, stores and exports the values

mod builder;
mod data;
mod erased;

pub use builder::{ConfigurationDataBuilder, SettingsHolder};
pub use data::ConfigurationData;
