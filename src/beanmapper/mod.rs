//! # Bean Mapper
//!
//! Maps mapping nodes onto structured records ("beans") and back.
//!
//! # Main Components
//!
//! - [`Bean`] - a record type with a declared field layout
//! - [`BeanDescriptor`] - the layout: constructor plus ordered [`FieldDescriptor`]s
//! - [`map_bean`] / [`export_bean`] - resolution and export driven by a descriptor
//! - [`impl_bean!`](crate::impl_bean) - generates all of the above for a plain struct
//!
//! # Architecture Note
//! Descriptors are built once per type and memoized process-wide (see
//! [`descriptor_for`]). A descriptor that fails to build is a definition error: it is
//! propagated to the caller on every use and never replaced by a default.

pub mod descriptor;
pub mod macros;
pub mod mapper;

pub use descriptor::{BeanDescriptor, BeanDescriptorBuilder, FieldDescriptor, FieldOutcome};
pub use mapper::{descriptor_for, export_bean, is_valid_bean, map_bean, Bean};
