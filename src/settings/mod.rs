//! Application-facing entry points: the [`SettingsManager`] facade and logging setup.

mod manager;
pub mod tracing;

pub use manager::{SettingsManager, SettingsManagerBuilder};
pub use self::tracing::setup_tracing;
