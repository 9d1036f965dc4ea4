//! Declarative registration of plain structs.

/// Implements [`Fixture`](crate::Fixture) for a struct with named fields.
///
/// The generated descriptor has one constructor whose parameters are the
/// listed fields in order. A field written `name: Type = default` is an
/// optional parameter: it takes `default` whenever the active policy omits
/// it.
///
/// # Example
///
/// ```
/// use fixture_factory::{Config, fixture};
///
/// #[derive(Debug, PartialEq)]
/// struct Account {
///     id: u64,
///     owner: String,
///     active: bool,
/// }
///
/// fixture!(Account {
///     id: u64,
///     owner: String,
///     active: bool = true,
/// });
///
/// let account: Account = fixture_factory::create_with(&Config::deterministic()).expect("account");
/// assert_eq!(
///     account,
///     Account { id: 1, owner: String::new(), active: true }
/// );
/// ```
#[macro_export]
macro_rules! fixture {
    ($name:ident { $($field:ident : $ty:ty $(= $default:expr)?),* $(,)? }) => {
        impl $crate::Fixture for $name {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::composite::<Self>(stringify!($name))
                    .constructor($crate::Constructor::new(
                        vec![$($crate::fixture!(@parameter $field : $ty $(= $default)?)),*],
                        |arguments: &mut $crate::Arguments| {
                            Ok($name {
                                $($field: $crate::fixture!(@take arguments, $field : $ty $(= $default)?)),*
                            })
                        },
                    ))
                    .build()
            }
        }
    };
    (@parameter $field:ident : $ty:ty) => {
        $crate::Parameter::value::<$ty>(stringify!($field))
    };
    (@parameter $field:ident : $ty:ty = $default:expr) => {
        $crate::Parameter::value::<$ty>(stringify!($field)).optional()
    };
    (@take $arguments:ident, $field:ident : $ty:ty) => {
        $arguments.take::<$ty>(stringify!($field))?
    };
    (@take $arguments:ident, $field:ident : $ty:ty = $default:expr) => {
        $arguments.take_or_else::<$ty>(stringify!($field), || $default)?
    };
}
