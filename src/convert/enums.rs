//! Enum-by-name conversion.
//!
//! Names are matched case-insensitively (`"orange"`, `"ORANGE"` and `"Orange"` all
//! select `Color::Orange`) and exported exactly as declared.

use crate::resource::{ResourceNode, Scalar};

/// A fieldless enum whose variants are addressed by name.
///
/// Implement it with [`impl_config_enum!`](crate::impl_config_enum), which also
/// implements [`ConfigValue`](super::ConfigValue).
pub trait ConfigEnum: Sized + Clone + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    fn name(&self) -> &'static str;
}

/// Looks up the variant named by a string scalar.
pub fn enum_from_node<E: ConfigEnum>(node: &ResourceNode) -> Option<E> {
    let Some(Scalar::String(text)) = node.as_scalar() else {
        return None;
    };
    E::VARIANTS
        .iter()
        .find(|variant| variant.name().eq_ignore_ascii_case(text.trim()))
        .cloned()
}

/// Implements [`ConfigEnum`] and [`ConfigValue`](crate::convert::ConfigValue) for a
/// fieldless enum. Every variant must be listed.
///
/// ```rust
/// use settings_mapper::impl_config_enum;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// pub enum Color { Red, Orange, Blue }
///
/// impl_config_enum!(Color { Red, Orange, Blue });
/// ```
#[macro_export]
macro_rules! impl_config_enum {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::convert::ConfigEnum for $name {
            const VARIANTS: &'static [Self] = &[$($name::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl $crate::convert::ConfigValue for $name {
            const ELEMENT_POLICY: $crate::convert::ElementPolicy =
                $crate::convert::ElementPolicy::Lenient;

            fn from_node(
                node: &$crate::resource::ResourceNode,
                _errors: &mut $crate::convert::ConvertErrorRecorder,
            ) -> ::std::result::Result<::std::option::Option<Self>, $crate::ConfigError> {
                ::std::result::Result::Ok($crate::convert::enum_from_node(node))
            }

            fn to_node(&self) -> $crate::resource::ResourceNode {
                $crate::resource::ResourceNode::from(
                    <Self as $crate::convert::ConfigEnum>::name(self),
                )
            }
        }
    };
}
