//! Declarative bean definitions.
//!
//! [`impl_bean!`](crate::impl_bean) writes the [`Bean`](super::Bean) descriptor and the
//! [`ConfigValue`](crate::convert::ConfigValue) implementation for a plain struct:
//!
//! ```rust
//! use indexmap::IndexMap;
//! use settings_mapper::impl_bean;
//!
//! #[derive(Debug, Clone, Default)]
//! pub struct Group {
//!     pub members: Vec<String>,
//!     pub permissions: Vec<String>,
//! }
//!
//! #[derive(Debug, Clone, Default)]
//! pub struct WorldGroupConfig {
//!     pub groups: IndexMap<String, Group>,
//!     pub motd: String,
//!     pub max_players: u32,
//! }
//!
//! impl_bean!(Group {
//!     members: Vec<String>,
//!     permissions: Vec<String> = Vec::new(),
//! });
//!
//! impl_bean!(WorldGroupConfig {
//!     groups: IndexMap<String, Group>,
//!     motd ("welcome.message"): String = "Hello".to_owned(),
//!     max_players ("limits.players"): u32 = 20,
//! });
//! ```
//!
//! Each entry is `field ("path")?: Type (= default)?`. The path defaults to the field
//! name; a field without `= default` is required. The struct must implement
//! `Default`, which serves as the argument-less constructor.

/// Implements [`Bean`](crate::beanmapper::Bean) and
/// [`ConfigValue`](crate::convert::ConfigValue) for a struct. See the
/// [module docs](crate::beanmapper::macros) for the syntax.
#[macro_export]
macro_rules! impl_bean {
    ($name:ident {
        $( $field:ident $( ( $path:literal ) )? : $ty:ty $( = $default:expr )? ),* $(,)?
    }) => {
        impl $crate::beanmapper::Bean for $name {
            fn describe() -> ::std::result::Result<
                $crate::beanmapper::BeanDescriptor<Self>,
                $crate::ConfigError,
            > {
                $crate::__paste::paste! {{
                    $(
                        fn [<get_ $field>](bean: &$name) -> &$ty {
                            &bean.$field
                        }
                        fn [<set_ $field>](bean: &mut $name, value: $ty) {
                            bean.$field = value;
                        }
                    )*

                    $crate::beanmapper::BeanDescriptor::<$name>::builder()
                        .constructor(<$name as ::std::default::Default>::default)
                        $(
                            .add_field(
                                $crate::__bean_field_path!($field $(, $path)?),
                                [<get_ $field>],
                                [<set_ $field>],
                                $crate::__bean_field_default!($ty $(, $default)?),
                            )
                        )*
                        .build()
                }}
            }
        }

        $crate::impl_bean_value!($name);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bean_field_path {
    ($field:ident) => {
        ::std::stringify!($field)
    };
    ($field:ident, $path:literal) => {
        $path
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bean_field_default {
    ($ty:ty) => {
        ::std::option::Option::None::<$ty>
    };
    ($ty:ty, $default:expr) => {
        ::std::option::Option::Some::<$ty>($default)
    };
}

#[cfg(test)]
mod tests {
    use crate::beanmapper::{descriptor_for, Bean};
    use crate::convert::{ConfigValue, ConvertErrorRecorder};
    use crate::resource::ResourceNode;
    use serde_json::json;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Window {
        title: String,
        width: u32,
        resizable: bool,
    }

    crate::impl_bean!(Window {
        title: String,
        width ("size.width"): u32 = 640,
        resizable: bool = true,
    });

    #[derive(Debug, Clone, Default)]
    struct Clash {
        a: String,
        b: String,
    }

    crate::impl_bean!(Clash {
        a ("x"): String,
        b ("x.y"): String,
    });

    #[test]
    fn test_generated_descriptor_layout() {
        let descriptor = descriptor_for::<Window>().unwrap();
        let paths: Vec<_> = descriptor.fields().iter().map(|f| f.path()).collect();
        assert_eq!(paths, vec!["title", "size.width", "resizable"]);
        assert!(!descriptor.fields()[0].has_default());
        assert!(descriptor.fields()[1].has_default());
    }

    #[test]
    fn test_generated_bean_resolves_and_defaults() {
        let mut errors = ConvertErrorRecorder::new();
        let node: ResourceNode = json!({ "title": "Main", "size": { "width": 800 } }).into();
        let window = Window::from_node(&node, &mut errors).unwrap();
        assert_eq!(
            window,
            Some(Window { title: "Main".into(), width: 800, resizable: true })
        );
        assert!(!errors.is_fully_valid());
    }

    #[test]
    fn test_generated_bean_exports_nested_paths() {
        let window = Window { title: "Main".into(), width: 800, resizable: false };
        assert_eq!(
            window.to_node(),
            ResourceNode::from(json!({ "title": "Main", "size": { "width": 800 }, "resizable": false }))
        );
    }

    #[test]
    fn test_conflicting_paths_fail_definition() {
        let err = Clash::describe().unwrap_err();
        assert!(err.is_definition_error());
        let clash = Clash { a: String::new(), b: String::new() };
        assert!(!clash.is_valid());
    }
}
