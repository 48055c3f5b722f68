//! Container converters: `Vec<T>`, `IndexMap<String, T>` and `Option<T>`.
//!
//! An element that fails to convert is handled by the element type's
//! [`ElementPolicy`]: scalar elements are dropped (and the recorder marked), while
//! beans and nested containers fail the whole collection.

use super::config_value::{ConfigValue, ElementPolicy};
use super::recorder::ConvertErrorRecorder;
use crate::error::ConfigError;
use crate::resource::ResourceNode;
use indexmap::IndexMap;

/// Applies `T`'s element policy to a failed element. Returns `false` when the
/// whole collection must be abandoned.
fn tolerate_element<T: ConfigValue>(errors: &mut ConvertErrorRecorder) -> bool {
    match T::ELEMENT_POLICY {
        ElementPolicy::Lenient => {
            errors.mark_error();
            true
        }
        ElementPolicy::Strict => false,
    }
}

impl<T: ConfigValue> ConfigValue for Vec<T> {
    fn from_node(
        node: &ResourceNode,
        errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError> {
        let Some(items) = node.as_sequence() else {
            return Ok(None);
        };

        let mut values = Vec::with_capacity(items.len());
        for item in items {
            match T::from_element(item, errors)? {
                Some(value) => values.push(value),
                None => {
                    if !tolerate_element::<T>(errors) {
                        return Ok(None);
                    }
                }
            }
        }
        Ok(Some(values))
    }

    fn to_node(&self) -> ResourceNode {
        ResourceNode::Sequence(self.iter().map(ConfigValue::to_node).collect())
    }

    fn is_valid(&self) -> bool {
        self.iter().all(ConfigValue::is_valid)
    }
}

impl<T: ConfigValue> ConfigValue for IndexMap<String, T> {
    fn from_node(
        node: &ResourceNode,
        errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError> {
        let Some(entries) = node.as_mapping() else {
            return Ok(None);
        };

        let mut values = IndexMap::with_capacity(entries.len());
        for (key, entry) in entries {
            match T::from_node(entry, errors)? {
                Some(value) => {
                    values.insert(key.clone(), value);
                }
                None => {
                    if !tolerate_element::<T>(errors) {
                        return Ok(None);
                    }
                }
            }
        }
        Ok(Some(values))
    }

    fn to_node(&self) -> ResourceNode {
        ResourceNode::Mapping(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_node()))
                .collect(),
        )
    }

    fn is_valid(&self) -> bool {
        self.values().all(ConfigValue::is_valid)
    }
}

/// An absent node is a valid `None`; a present node that cannot be converted also
/// becomes `None` but marks the recorder.
impl<T: ConfigValue> ConfigValue for Option<T> {
    fn from_node(
        node: &ResourceNode,
        errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError> {
        if node.is_absent() {
            return Ok(Some(None));
        }
        let value = T::from_node(node, errors)?;
        if value.is_none() {
            errors.mark_error();
        }
        Ok(Some(value))
    }

    fn from_element(
        node: &ResourceNode,
        errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError> {
        if node.is_absent() {
            return Ok(Some(None));
        }
        let value = T::from_element(node, errors)?;
        if value.is_none() {
            errors.mark_error();
        }
        Ok(Some(value))
    }

    fn to_node(&self) -> ResourceNode {
        self.as_ref()
            .map(ConfigValue::to_node)
            .unwrap_or(ResourceNode::Absent)
    }

    fn is_valid(&self) -> bool {
        self.as_ref().map_or(true, ConfigValue::is_valid)
    }
}
