//! The [`Fixture`] trait and its implementations for std and chrono types.
//!
//! Implementing [`Fixture`] is how a type registers itself with the
//! resolver: the returned [`TypeDescriptor`] says whether the type is a
//! scalar, an array, a container, a special library type, a sum type, an
//! enumeration, a singleton, or a composite with constructors.

use std::any::type_name;
use std::collections::{HashMap, LinkedList};
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::descriptor::{
    ContainerDef, Def, Instance, InterfaceDef, Nullability, Scalar, ScalarKind,
    SpecialKind, TypeDescriptor,
};
use crate::error::FixtureError;
use crate::special::Locale;

/// A type the resolver knows how to build.
///
/// # Example
///
/// ```
/// use fixture_factory::{Arguments, Config, Constructor, Fixture, Parameter, TypeDescriptor};
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Fixture for Point {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::composite::<Self>("Point")
///             .constructor(Constructor::new(
///                 vec![Parameter::value::<i32>("x"), Parameter::value::<i32>("y")],
///                 |arguments: &mut Arguments| {
///                     Ok(Self {
///                         x: arguments.take("x")?,
///                         y: arguments.take("y")?,
///                     })
///                 },
///             ))
///             .build()
///     }
/// }
///
/// let point: Point = fixture_factory::create_with(&Config::deterministic()).expect("point");
/// assert_eq!(point, Point { x: 1, y: 1 });
/// ```
pub trait Fixture: Sized + 'static {
    /// Describes this type to the resolver.
    fn descriptor() -> TypeDescriptor;
}

macro_rules! scalar_fixtures {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;
        }

        impl Fixture for $ty {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::new::<Self>(ScalarKind::$kind.name(), Def::Scalar(ScalarKind::$kind))
            }
        }

        impl Fixture for Box<[$ty]> {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::new::<Self>(
                    ScalarKind::$kind.array_name(),
                    Def::Array(ScalarKind::$kind),
                )
            }
        }
    )*};
}

scalar_fixtures! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => String,
}

impl<T: Fixture> Fixture for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor().nullable(Nullability::of::<T>())
    }
}

impl<T: Fixture> Fixture for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(
            "Vec",
            Def::Container(ContainerDef::ArrayList {
                assemble: assemble_vec::<T>,
            }),
        )
        .with_arguments(vec![T::descriptor()])
    }
}

impl<T: Fixture> Fixture for LinkedList<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(
            "LinkedList",
            Def::Container(ContainerDef::LinkedList {
                assemble: assemble_linked_list::<T>,
            }),
        )
        .with_arguments(vec![T::descriptor()])
    }
}

impl<K, V, S> Fixture for HashMap<K, V, S>
where
    K: Fixture + Eq + Hash,
    V: Fixture,
    S: BuildHasher + Default + 'static,
{
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Self>(
            "HashMap",
            Def::Container(ContainerDef::HashMap {
                assemble: assemble_hash_map::<K, V, S>,
            }),
        )
        .with_arguments(vec![K::descriptor(), V::descriptor()])
    }
}

impl<T: Fixture> Fixture for Arc<[T]> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::interface::<Self>(
            "List",
            InterfaceDef::List {
                assemble: assemble_shared_list::<T>,
            },
        )
        .with_arguments(vec![T::descriptor()])
    }
}

impl<K, V, S> Fixture for Arc<HashMap<K, V, S>>
where
    K: Fixture + Eq + Hash,
    V: Fixture,
    S: BuildHasher + Default + 'static,
{
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::interface::<Self>(
            "Map",
            InterfaceDef::Map {
                assemble: assemble_shared_map::<K, V, S>,
            },
        )
        .with_arguments(vec![K::descriptor(), V::descriptor()])
    }
}

impl<T: Fixture> Fixture for Box<dyn Iterator<Item = T>> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::interface::<Self>(
            "Sequence",
            InterfaceDef::Sequence {
                assemble: assemble_sequence::<T>,
            },
        )
        .with_arguments(vec![T::descriptor()])
    }
}

impl Fixture for SystemTime {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Self>("SystemTime", Def::Special(SpecialKind::Timestamp))
    }
}

impl Fixture for DateTime<Utc> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Self>("DateTime<Utc>", Def::Special(SpecialKind::Calendar))
    }
}

impl Fixture for Locale {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::new::<Self>("Locale", Def::Special(SpecialKind::Locale))
    }
}

fn downcast<T: 'static>(value: Instance) -> Result<T, FixtureError> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| FixtureError::ElementTypeMismatch {
            expected: type_name::<T>(),
        })
}

fn downcast_elements<T: 'static>(items: Vec<Instance>) -> Result<Vec<T>, FixtureError> {
    items.into_iter().map(downcast::<T>).collect()
}

fn downcast_entries<K, V, S>(entries: Vec<(Instance, Instance)>) -> Result<HashMap<K, V, S>, FixtureError>
where
    K: Eq + Hash + 'static,
    V: 'static,
    S: BuildHasher + Default,
{
    entries
        .into_iter()
        .map(|(key, value)| Ok((downcast::<K>(key)?, downcast::<V>(value)?)))
        .collect()
}

fn assemble_vec<T: 'static>(items: Vec<Instance>) -> Result<Instance, FixtureError> {
    Ok(Box::new(downcast_elements::<T>(items)?))
}

fn assemble_linked_list<T: 'static>(items: Vec<Instance>) -> Result<Instance, FixtureError> {
    let list: LinkedList<T> = downcast_elements::<T>(items)?.into_iter().collect();
    Ok(Box::new(list))
}

fn assemble_hash_map<K, V, S>(entries: Vec<(Instance, Instance)>) -> Result<Instance, FixtureError>
where
    K: Eq + Hash + 'static,
    V: 'static,
    S: BuildHasher + Default + 'static,
{
    Ok(Box::new(downcast_entries::<K, V, S>(entries)?))
}

fn assemble_shared_list<T: 'static>(items: Vec<Instance>) -> Result<Instance, FixtureError> {
    let list: Arc<[T]> = Arc::from(downcast_elements::<T>(items)?);
    Ok(Box::new(list))
}

fn assemble_shared_map<K, V, S>(entries: Vec<(Instance, Instance)>) -> Result<Instance, FixtureError>
where
    K: Eq + Hash + 'static,
    V: 'static,
    S: BuildHasher + Default + 'static,
{
    Ok(Box::new(Arc::new(downcast_entries::<K, V, S>(entries)?)))
}

fn assemble_sequence<T: 'static>(items: Vec<Instance>) -> Result<Instance, FixtureError> {
    let sequence: Box<dyn Iterator<Item = T>> =
        Box::new(downcast_elements::<T>(items)?.into_iter());
    Ok(Box::new(sequence))
}
