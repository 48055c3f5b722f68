//! # Bean Mapping
//!
//! Resolves structured records from mapping nodes and exports them back.
//!
//! For every declared field (in order) the mapper looks up the field's sub-node,
//! resolves it through the field's own
//! [`ConfigValue`](crate::convert::ConfigValue), and then:
//! - uses the value when it resolved
//! - applies the field's default and marks the shared recorder when it did not
//! - gives up on the whole bean when a required field did not
//!
//! Because the recorder is shared, one defaulted leaf deep inside nested beans
//! surfaces as `is_valid == false` on the top-level property without discarding the
//! rest of the record.

use super::descriptor::{BeanDescriptor, FieldOutcome};
use crate::convert::ConvertErrorRecorder;
use crate::error::{short_type_name, ConfigError};
use crate::resource::ResourceNode;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, error};

/// A structured record resolved field by field.
///
/// Implement it with [`impl_bean!`](crate::impl_bean), or by hand together with
/// [`impl_bean_value!`](crate::impl_bean_value).
pub trait Bean: Sized + Send + Sync + 'static {
    /// Describes the bean's fields. Called once per type and cached.
    fn describe() -> Result<BeanDescriptor<Self>, ConfigError>;
}

type DescriptorCache = RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

static DESCRIPTORS: LazyLock<DescriptorCache> = LazyLock::new(Default::default);

/// Returns the memoized descriptor of `B`, building it on first use.
///
/// Concurrent first uses may each build a descriptor; the first one stored wins and
/// the others are dropped. Failed builds are not cached.
pub fn descriptor_for<B: Bean>() -> Result<Arc<BeanDescriptor<B>>, ConfigError> {
    let key = TypeId::of::<B>();
    let cached = DESCRIPTORS.read().get(&key).cloned();
    let entry = match cached {
        Some(entry) => entry,
        None => {
            let built: Arc<dyn Any + Send + Sync> = Arc::new(B::describe()?);
            debug!(bean = short_type_name::<B>(), "Bean descriptor built");
            DESCRIPTORS.write().entry(key).or_insert(built).clone()
        }
    };
    entry
        .downcast::<BeanDescriptor<B>>()
        .map_err(|_| ConfigError::bean_definition::<B>("descriptor cache holds a foreign type"))
}

/// Resolves a bean of type `B` from `node`.
///
/// Returns `Ok(None)` when `node` is not a mapping or a required field cannot be
/// resolved.
pub fn map_bean<B: Bean>(
    node: &ResourceNode,
    errors: &mut ConvertErrorRecorder,
) -> Result<Option<B>, ConfigError> {
    let descriptor = descriptor_for::<B>()?;
    if node.as_mapping().is_none() {
        return Ok(None);
    }

    let bean_type = short_type_name::<B>();
    let mut bean = descriptor.instantiate();
    for field in descriptor.fields() {
        let child = node.at_path(field.path());
        match field.resolve(&mut bean, child, errors)? {
            FieldOutcome::Resolved => {}
            FieldOutcome::Defaulted => {
                debug!(bean = bean_type, field = field.path(), "Field defaulted");
            }
            FieldOutcome::Missing => {
                debug!(bean = bean_type, field = field.path(), "Required field missing");
                return Ok(None);
            }
        }
    }
    Ok(Some(bean))
}

/// Exports `bean` as a mapping keyed by field path, in declared order.
pub fn export_bean<B: Bean>(bean: &B) -> ResourceNode {
    match descriptor_for::<B>() {
        Ok(descriptor) => {
            let mut node = ResourceNode::empty_mapping();
            for field in descriptor.fields() {
                node.insert_at(field.path(), field.export(bean));
            }
            node
        }
        Err(e) => {
            // unreachable for beans that were resolved first: resolution fails on the same error
            error!(bean = short_type_name::<B>(), error = %e, "Cannot export bean");
            ResourceNode::Absent
        }
    }
}

/// Checks every field of `bean` with
/// [`ConfigValue::is_valid`](crate::convert::ConfigValue::is_valid).
pub fn is_valid_bean<B: Bean>(bean: &B) -> bool {
    descriptor_for::<B>()
        .map(|descriptor| descriptor.fields().iter().all(|field| field.is_valid(bean)))
        .unwrap_or(false)
}

/// Implements [`ConfigValue`](crate::convert::ConfigValue) for a type that
/// implements [`Bean`].
///
/// [`impl_bean!`](crate::impl_bean) calls this itself; use it directly only with a
/// hand-written [`Bean`] implementation.
#[macro_export]
macro_rules! impl_bean_value {
    ($name:ty) => {
        impl $crate::convert::ConfigValue for $name {
            fn from_node(
                node: &$crate::resource::ResourceNode,
                errors: &mut $crate::convert::ConvertErrorRecorder,
            ) -> ::std::result::Result<::std::option::Option<Self>, $crate::ConfigError> {
                $crate::beanmapper::map_bean::<Self>(node, errors)
            }

            fn to_node(&self) -> $crate::resource::ResourceNode {
                $crate::beanmapper::export_bean(self)
            }

            fn is_valid(&self) -> bool {
                $crate::beanmapper::is_valid_bean(self)
            }
        }
    };
}
