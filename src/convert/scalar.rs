//! Leaf converters: booleans, numbers and strings.
//!
//! A scalar converts only from a [`Scalar`] of a compatible kind. Failing is not an
//! error at this level; the enclosing property, collection or bean decides what a
//! missing leaf means.
//!
//! Numeric rules:
//! - integers accept integer scalars in range, and float scalars that are finite,
//!   integral and in range (`12.0` reads as `12`)
//! - integers above `i64::MAX` (only possible for `u64`) are not valid values, since
//!   the resource cannot store them exactly
//! - floats accept float scalars and widen integer scalars; `f32` must stay finite
//!   and a nonzero value must not underflow to zero

use super::config_value::{ConfigValue, ElementPolicy};
use super::recorder::ConvertErrorRecorder;
use crate::error::ConfigError;
use crate::resource::{ResourceNode, Scalar};

impl ConfigValue for bool {
    const ELEMENT_POLICY: ElementPolicy = ElementPolicy::Lenient;

    fn from_node(
        node: &ResourceNode,
        _errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError> {
        Ok(match node.as_scalar() {
            Some(Scalar::Bool(value)) => Some(*value),
            _ => None,
        })
    }

    fn to_node(&self) -> ResourceNode {
        (*self).into()
    }
}

impl ConfigValue for String {
    const ELEMENT_POLICY: ElementPolicy = ElementPolicy::Lenient;

    fn from_node(
        node: &ResourceNode,
        _errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError> {
        Ok(match node.as_scalar() {
            Some(Scalar::String(value)) => Some(value.clone()),
            _ => None,
        })
    }

    /// String lists take every scalar in its string form.
    fn from_element(
        node: &ResourceNode,
        _errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError> {
        Ok(node.as_scalar().map(Scalar::to_string))
    }

    fn to_node(&self) -> ResourceNode {
        self.as_str().into()
    }
}

fn integer_from_scalar<T: TryFrom<i64>>(scalar: &Scalar) -> Option<T> {
    let integer = match *scalar {
        Scalar::Integer(value) => value,
        Scalar::Float(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value >= i64::MIN as f64
                && value < i64::MAX as f64 =>
        {
            value as i64
        }
        _ => return None,
    };
    T::try_from(integer).ok()
}

macro_rules! impl_integer_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ConfigValue for $ty {
                const ELEMENT_POLICY: ElementPolicy = ElementPolicy::Lenient;

                fn from_node(
                    node: &ResourceNode,
                    _errors: &mut ConvertErrorRecorder,
                ) -> Result<Option<Self>, ConfigError> {
                    Ok(node.as_scalar().and_then(integer_from_scalar))
                }

                fn to_node(&self) -> ResourceNode {
                    // out-of-range values are rejected by is_valid before they get here
                    i64::try_from(*self)
                        .map(ResourceNode::from)
                        .unwrap_or_else(|_| ResourceNode::from(*self as f64))
                }

                fn is_valid(&self) -> bool {
                    i64::try_from(*self).is_ok()
                }
            }
        )*
    };
}

impl_integer_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl ConfigValue for f64 {
    const ELEMENT_POLICY: ElementPolicy = ElementPolicy::Lenient;

    fn from_node(
        node: &ResourceNode,
        _errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError> {
        Ok(match node.as_scalar() {
            Some(Scalar::Float(value)) => Some(*value),
            Some(Scalar::Integer(value)) => Some(*value as f64),
            _ => None,
        })
    }

    fn to_node(&self) -> ResourceNode {
        (*self).into()
    }

    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl ConfigValue for f32 {
    const ELEMENT_POLICY: ElementPolicy = ElementPolicy::Lenient;

    fn from_node(
        node: &ResourceNode,
        errors: &mut ConvertErrorRecorder,
    ) -> Result<Option<Self>, ConfigError> {
        let wide = f64::from_node(node, errors)?;
        Ok(wide.and_then(|wide| {
            let narrow = wide as f32;
            let underflow = narrow == 0.0 && wide != 0.0;
            (narrow.is_finite() && !underflow).then_some(narrow)
        }))
    }

    fn to_node(&self) -> ResourceNode {
        f64::from(*self).into()
    }

    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert<T: ConfigValue>(node: ResourceNode) -> Option<T> {
        let mut errors = ConvertErrorRecorder::new();
        let value = T::from_node(&node, &mut errors).unwrap();
        assert!(errors.is_fully_valid(), "scalars never mark the recorder");
        value
    }

    #[test]
    fn test_bool_only_from_bool() {
        assert_eq!(convert::<bool>(true.into()), Some(true));
        assert_eq!(convert::<bool>("true".into()), None);
        assert_eq!(convert::<bool>(1i64.into()), None);
        assert_eq!(convert::<bool>(ResourceNode::Absent), None);
    }

    #[test]
    fn test_integer_range_and_float_rules() {
        assert_eq!(convert::<i32>(12i64.into()), Some(12));
        assert_eq!(convert::<i32>(12.0f64.into()), Some(12));
        assert_eq!(convert::<i32>(12.5f64.into()), None);
        assert_eq!(convert::<u8>(300i64.into()), None);
        assert_eq!(convert::<u8>((-1i64).into()), None);
        assert_eq!(convert::<i64>("12".into()), None);
        assert_eq!(convert::<u64>(ResourceNode::Sequence(vec![])), None);
    }

    #[test]
    fn test_float_widening_and_narrowing() {
        assert_eq!(convert::<f64>(3i64.into()), Some(3.0));
        assert_eq!(convert::<f64>(0.25f64.into()), Some(0.25));
        assert_eq!(convert::<f32>(0.5f64.into()), Some(0.5));
        assert_eq!(convert::<f32>(1e300f64.into()), None);
        assert_eq!(convert::<f32>(1e-50f64.into()), None);
        assert_eq!(convert::<f32>((-1e-50f64).into()), None);
        assert_eq!(convert::<f32>(0.0f64.into()), Some(0.0));
        assert_eq!(convert::<f32>(0i64.into()), Some(0.0));
        assert_eq!(convert::<f64>(false.into()), None);
        assert!(!f64::NAN.is_valid());
        assert!(!f32::INFINITY.is_valid());
    }

    #[test]
    fn test_string_is_strict_alone_but_coerces_as_element() {
        let mut errors = ConvertErrorRecorder::new();
        assert_eq!(convert::<String>("text".into()), Some("text".to_owned()));
        assert_eq!(convert::<String>(false.into()), None);

        let element = String::from_element(&false.into(), &mut errors).unwrap();
        assert_eq!(element.as_deref(), Some("false"));
        let element = String::from_element(&1i64.into(), &mut errors).unwrap();
        assert_eq!(element.as_deref(), Some("1"));
        let element = String::from_element(&ResourceNode::empty_mapping(), &mut errors).unwrap();
        assert_eq!(element, None);
        assert!(errors.is_fully_valid());
    }

    #[test]
    fn test_u64_beyond_i64_is_not_a_valid_value() {
        assert!(!u64::MAX.is_valid());
        assert!(!(i64::MAX as u64 + 1).is_valid());
        assert!((i64::MAX as u64).is_valid());
        assert_eq!(7u64.to_node(), ResourceNode::from(7i64));
        assert!(i8::MIN.is_valid());
        assert!(!vec![1u64, u64::MAX].is_valid());
    }
}
