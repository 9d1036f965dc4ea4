//! Maps a descriptor onto the kind of value the resolver must produce.

use std::fmt;

use crate::descriptor::{
    ContainerDef, Def, InterfaceDef, ScalarKind, SingletonDef, SpecialKind, TypeDescriptor,
};

/// How a type's values are obtained.
#[derive(Debug, Clone, Copy)]
pub enum Classification<'a> {
    /// A type with one shared value.
    Singleton(&'a SingletonDef),
    /// A closed hierarchy of variants.
    SumType,
    /// A field-less enumeration.
    Enum,
    /// A primitive scalar with a registered generator.
    PrimitiveScalar(ScalarKind),
    /// A boxed array of a primitive scalar.
    PrimitiveArray(ScalarKind),
    /// A concrete container with its element (or key and value) types.
    Container(&'a ContainerDef, &'a [TypeDescriptor]),
    /// A well-known library type.
    SpecialType(SpecialKind),
    /// An abstract container interface with its type arguments.
    Interface(&'a InterfaceDef, &'a [TypeDescriptor]),
    /// A reference to a formal type parameter.
    GenericParameterReference(&'static str),
    /// A type built through one of its constructors.
    Composite,
}

/// Classifies `ty`.
///
/// Nullability plays no part; callers strip it first.
#[must_use]
pub fn classify(ty: &TypeDescriptor) -> Classification<'_> {
    match ty.def() {
        Def::Singleton(singleton) => Classification::Singleton(singleton),
        Def::Sum(_) => Classification::SumType,
        Def::Enum(_) => Classification::Enum,
        Def::Scalar(kind) => Classification::PrimitiveScalar(*kind),
        Def::Array(kind) => Classification::PrimitiveArray(*kind),
        Def::Container(container) => Classification::Container(container, ty.arguments()),
        Def::Special(kind) => Classification::SpecialType(*kind),
        Def::Interface(interface) => Classification::Interface(interface, ty.arguments()),
        Def::Variable(name) => Classification::GenericParameterReference(*name),
        Def::Composite(_) => Classification::Composite,
    }
}

impl fmt::Display for Classification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton(_) => f.write_str("singleton"),
            Self::SumType => f.write_str("sum type"),
            Self::Enum => f.write_str("enum"),
            Self::PrimitiveScalar(kind) => write!(f, "scalar {kind}"),
            Self::PrimitiveArray(kind) => write!(f, "array {}", kind.array_name()),
            Self::Container(container, _) => match container {
                ContainerDef::ArrayList { .. } => f.write_str("array list"),
                ContainerDef::LinkedList { .. } => f.write_str("linked list"),
                ContainerDef::HashMap { .. } => f.write_str("hash map"),
            },
            Self::SpecialType(kind) => write!(f, "special {kind}"),
            Self::Interface(..) => f.write_str("container interface"),
            Self::GenericParameterReference(name) => write!(f, "type variable {name}"),
            Self::Composite => f.write_str("composite"),
        }
    }
}
