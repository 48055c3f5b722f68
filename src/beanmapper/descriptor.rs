//! # Bean Descriptors
//!
//! A [`BeanDescriptor`] lists the named fields of a structured record, in declared
//! order, together with everything needed to resolve and export each one:
//!
//! - the field's path inside the bean's mapping (its name, or an override that may
//!   be dotted to reach into nested mappings)
//! - a getter and setter, captured as plain function pointers
//! - an optional default used when the field cannot be resolved
//!
//! Descriptors are declarative: they are written once per type, either by hand with
//! [`BeanDescriptor::builder`] or by [`impl_bean!`](crate::impl_bean), and never
//! discovered by inspecting values at runtime.

use crate::convert::{ConfigValue, ConvertErrorRecorder};
use crate::error::ConfigError;
use crate::resource::ResourceNode;
use std::collections::HashSet;
use std::fmt;

type ResolveFn<B> = Box<
    dyn Fn(&mut B, &ResourceNode, &mut ConvertErrorRecorder) -> Result<FieldOutcome, ConfigError>
        + Send
        + Sync,
>;
type ExportFn<B> = Box<dyn Fn(&B) -> ResourceNode + Send + Sync>;
type ValidateFn<B> = Box<dyn Fn(&B) -> bool + Send + Sync>;

/// What happened to one field while resolving a bean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The field was read from the resource.
    Resolved,
    /// The resource value was unusable; the field's default was applied.
    Defaulted,
    /// The resource value was unusable and the field has no default.
    Missing,
}

/// One named field of a bean.
pub struct FieldDescriptor<B> {
    path: String,
    type_name: &'static str,
    has_default: bool,
    resolve: ResolveFn<B>,
    export: ExportFn<B>,
    validate: ValidateFn<B>,
}

impl<B> FieldDescriptor<B> {
    /// The field's path relative to the bean's own mapping.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The declared type of the field.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn has_default(&self) -> bool {
        self.has_default
    }

    /// Resolves `node` into the field of `bean`.
    pub fn resolve(
        &self,
        bean: &mut B,
        node: &ResourceNode,
        errors: &mut ConvertErrorRecorder,
    ) -> Result<FieldOutcome, ConfigError> {
        (self.resolve)(bean, node, errors)
    }

    pub fn export(&self, bean: &B) -> ResourceNode {
        (self.export)(bean)
    }

    pub fn is_valid(&self, bean: &B) -> bool {
        (self.validate)(bean)
    }
}

impl<B> fmt::Debug for FieldDescriptor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("path", &self.path)
            .field("type_name", &self.type_name)
            .field("has_default", &self.has_default)
            .finish()
    }
}

/// The field layout and constructor of a bean type `B`.
pub struct BeanDescriptor<B> {
    constructor: fn() -> B,
    fields: Vec<FieldDescriptor<B>>,
}

impl<B: 'static> BeanDescriptor<B> {
    pub fn builder() -> BeanDescriptorBuilder<B> {
        BeanDescriptorBuilder {
            constructor: None,
            fields: Vec::new(),
        }
    }

    /// Creates an empty instance to populate.
    pub fn instantiate(&self) -> B {
        (self.constructor)()
    }

    pub fn fields(&self) -> &[FieldDescriptor<B>] {
        &self.fields
    }
}

impl<B> fmt::Debug for BeanDescriptor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDescriptor")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Builder for [`BeanDescriptor`].
///
/// ```rust
/// use settings_mapper::beanmapper::BeanDescriptor;
///
/// #[derive(Debug, Clone, Default)]
/// struct Title {
///     text: String,
///     size: u32,
/// }
///
/// let descriptor = BeanDescriptor::<Title>::builder()
///     .constructor(Title::default)
///     .field("text", |t| &t.text, |t, v| t.text = v)
///     .field_or("size", |t| &t.size, |t, v| t.size = v, 12)
///     .build()
///     .unwrap();
/// assert_eq!(descriptor.fields().len(), 2);
/// ```
pub struct BeanDescriptorBuilder<B> {
    constructor: Option<fn() -> B>,
    fields: Vec<FieldDescriptor<B>>,
}

impl<B: 'static> BeanDescriptorBuilder<B> {
    /// The argument-less constructor used to create instances before their fields
    /// are populated. Required.
    pub fn constructor(mut self, constructor: fn() -> B) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// A required field: if it cannot be resolved, the whole bean cannot be.
    pub fn field<V: ConfigValue>(
        self,
        path: &str,
        get: fn(&B) -> &V,
        set: fn(&mut B, V),
    ) -> Self {
        self.add_field(path, get, set, None)
    }

    /// A field that falls back to `default` (and marks the bean as not fully valid)
    /// when it cannot be resolved.
    pub fn field_or<V: ConfigValue>(
        self,
        path: &str,
        get: fn(&B) -> &V,
        set: fn(&mut B, V),
        default: V,
    ) -> Self {
        self.add_field(path, get, set, Some(default))
    }

    pub fn add_field<V: ConfigValue>(
        mut self,
        path: &str,
        get: fn(&B) -> &V,
        set: fn(&mut B, V),
        default: Option<V>,
    ) -> Self {
        let has_default = default.is_some();
        let resolve = move |bean: &mut B,
                            node: &ResourceNode,
                            errors: &mut ConvertErrorRecorder|
              -> Result<FieldOutcome, ConfigError> {
            if let Some(value) = V::from_node(node, errors)? {
                set(bean, value);
                return Ok(FieldOutcome::Resolved);
            }
            match &default {
                Some(default) => {
                    errors.mark_error();
                    set(bean, default.clone());
                    Ok(FieldOutcome::Defaulted)
                }
                None => Ok(FieldOutcome::Missing),
            }
        };

        self.fields.push(FieldDescriptor {
            path: path.to_owned(),
            type_name: std::any::type_name::<V>(),
            has_default,
            resolve: Box::new(resolve),
            export: Box::new(move |bean: &B| get(bean).to_node()),
            validate: Box::new(move |bean: &B| get(bean).is_valid()),
        });
        self
    }

    /// Validates the layout.
    ///
    /// # Errors
    /// [`ConfigError::BeanDefinition`] if no constructor was registered, a field
    /// path is empty or malformed, or two field paths collide.
    pub fn build(self) -> Result<BeanDescriptor<B>, ConfigError> {
        let constructor = self.constructor.ok_or_else(|| {
            ConfigError::bean_definition::<B>("no argument-less constructor registered")
        })?;

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.path.split('.').any(str::is_empty) {
                return Err(ConfigError::bean_definition::<B>(format!(
                    "invalid field path '{}'",
                    field.path
                )));
            }
            if !seen.insert(field.path.as_str()) {
                return Err(ConfigError::bean_definition::<B>(format!(
                    "duplicate field path '{}'",
                    field.path
                )));
            }
        }
        for field in &self.fields {
            let nested_prefix = format!("{}.", field.path);
            if let Some(child) = seen.iter().find(|other| other.starts_with(&nested_prefix)) {
                return Err(ConfigError::bean_definition::<B>(format!(
                    "field path '{}' conflicts with '{}'",
                    field.path, child
                )));
            }
        }

        Ok(BeanDescriptor {
            constructor,
            fields: self.fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Title {
        text: String,
        size: u32,
    }

    fn builder() -> BeanDescriptorBuilder<Title> {
        BeanDescriptor::<Title>::builder().constructor(Title::default)
    }

    #[test]
    fn test_missing_constructor_is_definition_error() {
        let err = BeanDescriptor::<Title>::builder()
            .field("text", |t| &t.text, |t, v| t.text = v)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::BeanDefinition { bean: "Title", .. }));
    }

    #[test]
    fn test_duplicate_and_malformed_paths_are_rejected() {
        let duplicate = builder()
            .field("text", |t| &t.text, |t, v| t.text = v)
            .field("text", |t| &t.size, |t, v| t.size = v)
            .build();
        assert!(duplicate.is_err());

        let malformed = builder().field("a..b", |t| &t.text, |t, v| t.text = v).build();
        assert!(malformed.is_err());

        let conflict = builder()
            .field("title", |t| &t.text, |t, v| t.text = v)
            .field("title.size", |t| &t.size, |t, v| t.size = v)
            .build();
        assert!(conflict.is_err());
    }

    #[test]
    fn test_field_resolution_outcomes() {
        let descriptor = builder()
            .field("text", |t| &t.text, |t, v| t.text = v)
            .field_or("size", |t| &t.size, |t, v| t.size = v, 12)
            .build()
            .unwrap();
        let [text, size] = descriptor.fields() else {
            panic!("expected two fields");
        };
        assert!(!text.has_default());
        assert_eq!(size.type_name(), "u32");

        let mut bean = descriptor.instantiate();
        let mut errors = ConvertErrorRecorder::new();
        let outcome = text.resolve(&mut bean, &"hi".into(), &mut errors).unwrap();
        assert_eq!(outcome, FieldOutcome::Resolved);
        assert!(errors.is_fully_valid());

        let outcome = size.resolve(&mut bean, &"big".into(), &mut errors).unwrap();
        assert_eq!(outcome, FieldOutcome::Defaulted);
        assert!(!errors.is_fully_valid());
        assert_eq!(bean, Title { text: "hi".into(), size: 12 });

        let outcome = text.resolve(&mut bean, &ResourceNode::Absent, &mut errors).unwrap();
        assert_eq!(outcome, FieldOutcome::Missing);
        assert_eq!(size.export(&bean), ResourceNode::from(12i64));
    }
}
