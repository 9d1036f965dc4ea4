//! Type descriptors: the explicit registry that replaces runtime reflection.
//!
//! A [`TypeDescriptor`] pairs a shared [`Shape`] (erased identity plus a
//! [`Def`] describing how values of the type are obtained) with the
//! instantiated type arguments and an optional nullability marker. Shapes are
//! built by [`crate::Fixture`] implementations, either by hand through the
//! builders in this module or with the [`crate::fixture!`] macro.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use crate::construct::Arguments;
use crate::error::FixtureError;
use crate::fixture::Fixture;

/// A type-erased value produced by resolution.
pub type Instance = Box<dyn Any>;

/// Rebuilds a concrete sequential container from erased elements.
pub type AssembleElements = fn(Vec<Instance>) -> Result<Instance, FixtureError>;

/// Rebuilds a concrete key-value container from erased entries.
pub type AssembleEntries = fn(Vec<(Instance, Instance)>) -> Result<Instance, FixtureError>;

type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;

type Build = Arc<dyn Fn(&mut Arguments) -> Result<Instance, FixtureError> + Send + Sync>;

/// Recognised primitive scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `bool`.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// `char`.
    Char,
    /// `String`.
    String,
}

impl ScalarKind {
    /// Every scalar kind, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Bool,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::Char,
        Self::String,
    ];

    /// Returns the Rust spelling of the scalar type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "String",
        }
    }

    /// Returns the Rust spelling of the boxed array of this scalar.
    #[must_use]
    pub const fn array_name(self) -> &'static str {
        match self {
            Self::Bool => "Box<[bool]>",
            Self::I8 => "Box<[i8]>",
            Self::I16 => "Box<[i16]>",
            Self::I32 => "Box<[i32]>",
            Self::I64 => "Box<[i64]>",
            Self::U8 => "Box<[u8]>",
            Self::U16 => "Box<[u16]>",
            Self::U32 => "Box<[u32]>",
            Self::U64 => "Box<[u64]>",
            Self::F32 => "Box<[f32]>",
            Self::F64 => "Box<[f64]>",
            Self::Char => "Box<[char]>",
            Self::String => "Box<[String]>",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rust types that map onto a [`ScalarKind`].
///
/// Used to key typed generator overrides in [`crate::ConfigBuilder`].
pub trait Scalar: Sized + 'static {
    /// The kind this type resolves as.
    const KIND: ScalarKind;
}

/// Well-known library types with dedicated generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    /// An absolute point in time (`SystemTime`).
    Timestamp,
    /// A calendar-aware timestamp (`DateTime<Utc>`).
    Calendar,
    /// A locale identifier ([`crate::Locale`]).
    Locale,
}

impl fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp => f.write_str("timestamp"),
            Self::Calendar => f.write_str("calendar"),
            Self::Locale => f.write_str("locale"),
        }
    }
}

/// Concrete containers backed by a registered generator.
///
/// The element (or key and value) types are the descriptor's type arguments.
#[derive(Debug, Clone, Copy)]
pub enum ContainerDef {
    /// Growable array-backed list (`Vec<T>`).
    ArrayList {
        /// Rebuilds the list from generated elements.
        assemble: AssembleElements,
    },
    /// Doubly linked list (`LinkedList<T>`).
    LinkedList {
        /// Rebuilds the list from generated elements.
        assemble: AssembleElements,
    },
    /// Key-unique unordered map (`HashMap<K, V>`).
    HashMap {
        /// Rebuilds the map from generated entries.
        assemble: AssembleEntries,
    },
}

/// Abstract container interfaces with no constructors of their own.
#[derive(Debug, Clone, Copy)]
pub enum InterfaceDef {
    /// The list interface or one of its supertypes.
    List {
        /// Adapts the array-list generator's output.
        assemble: AssembleElements,
    },
    /// The key-value map interface.
    Map {
        /// Adapts the hash-map generator's output.
        assemble: AssembleEntries,
    },
    /// A lazily evaluated sequence.
    Sequence {
        /// Wraps the array-list generator's output in a lazy view.
        assemble: AssembleElements,
    },
    /// Any other interface; resolving it is an error.
    Unsupported,
}

/// A type with exactly one shared value and no constructor parameters.
#[derive(Clone)]
pub struct SingletonDef {
    make: Factory,
}

impl SingletonDef {
    fn new<T: 'static>(make: fn() -> T) -> Self {
        Self {
            make: Arc::new(move || Box::new(make()) as Instance),
        }
    }

    /// Produces the singleton value.
    #[must_use]
    pub fn instance(&self) -> Instance {
        (self.make)()
    }
}

impl fmt::Debug for SingletonDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonDef").finish_non_exhaustive()
    }
}

/// One variant of a closed sum type.
#[derive(Debug, Clone)]
pub struct Variant {
    name: &'static str,
    kind: VariantKind,
}

#[derive(Debug, Clone)]
enum VariantKind {
    Singleton(SingletonDef),
    Payload {
        type_parameters: &'static [&'static str],
        descriptor: fn() -> TypeDescriptor,
    },
}

impl Variant {
    /// A payload-free variant, such as a unit variant of an enum.
    #[must_use]
    pub fn singleton<T: 'static>(name: &'static str, make: fn() -> T) -> Self {
        Self {
            name,
            kind: VariantKind::Singleton(SingletonDef::new(make)),
        }
    }

    /// A payload-bearing variant described by its own descriptor.
    ///
    /// The descriptor is usually a composite whose constructors produce the
    /// sum type itself. It may also be a nested sum type, an enumeration or
    /// a singleton producing the sum type, which resolve recursively.
    #[must_use]
    pub const fn payload(name: &'static str, descriptor: fn() -> TypeDescriptor) -> Self {
        Self::generic(name, &[], descriptor)
    }

    /// A payload-bearing variant that carries type parameters of its own.
    ///
    /// Such variants are never picked by the default sum-type resolver.
    #[must_use]
    pub const fn generic(
        name: &'static str,
        type_parameters: &'static [&'static str],
        descriptor: fn() -> TypeDescriptor,
    ) -> Self {
        Self {
            name,
            kind: VariantKind::Payload {
                type_parameters,
                descriptor,
            },
        }
    }

    /// Returns the variant name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` for payload-free variants.
    #[must_use]
    pub const fn is_singleton(&self) -> bool {
        matches!(self.kind, VariantKind::Singleton(_))
    }

    /// Returns the variant's own type parameters.
    #[must_use]
    pub const fn type_parameters(&self) -> &'static [&'static str] {
        match self.kind {
            VariantKind::Singleton(_) => &[],
            VariantKind::Payload {
                type_parameters, ..
            } => type_parameters,
        }
    }

    /// Produces the shared value of a singleton variant.
    #[must_use]
    pub fn singleton_instance(&self) -> Option<Instance> {
        match &self.kind {
            VariantKind::Singleton(singleton) => Some(singleton.instance()),
            VariantKind::Payload { .. } => None,
        }
    }

    /// Returns the composite descriptor of a payload variant.
    #[must_use]
    pub fn descriptor(&self) -> Option<TypeDescriptor> {
        match &self.kind {
            VariantKind::Singleton(_) => None,
            VariantKind::Payload { descriptor, .. } => Some(descriptor()),
        }
    }
}

/// A closed hierarchy of variants.
#[derive(Debug, Clone, Default)]
pub struct SumDef {
    variants: Vec<Variant>,
}

impl SumDef {
    /// Returns the variants in declaration order.
    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }
}

/// One declared member of an enumeration.
#[derive(Clone)]
pub struct Member {
    name: String,
    make: Factory,
}

impl Member {
    /// Returns the member name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Produces the member value.
    #[must_use]
    pub fn instance(&self) -> Instance {
        (self.make)()
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A field-less enumeration with its members in declaration order.
#[derive(Debug, Clone, Default)]
pub struct EnumDef {
    members: Vec<Member>,
}

impl EnumDef {
    /// Returns the members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

/// How a constructor parameter obtains its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// An ordinary value parameter.
    Value,
    /// A dependency on a fully built instance of the enclosing type.
    Receiver,
}

#[derive(Clone)]
enum Declared {
    Lazy(fn() -> TypeDescriptor),
    Fixed(TypeDescriptor),
}

/// A named constructor parameter.
#[derive(Clone)]
pub struct Parameter {
    name: &'static str,
    declared: Declared,
    optional: bool,
    kind: ParameterKind,
}

impl Parameter {
    /// A value parameter whose declared type is `T`.
    #[must_use]
    pub fn value<T: Fixture>(name: &'static str) -> Self {
        Self {
            name,
            declared: Declared::Lazy(T::descriptor),
            optional: false,
            kind: ParameterKind::Value,
        }
    }

    /// A value parameter typed by one of the owner's formal type parameters.
    #[must_use]
    pub fn type_variable(name: &'static str, variable: &'static str) -> Self {
        Self::with_type(name, TypeDescriptor::variable(variable))
    }

    /// A value parameter with an explicitly built declared type.
    #[must_use]
    pub fn with_type(name: &'static str, declared: TypeDescriptor) -> Self {
        Self {
            name,
            declared: Declared::Fixed(declared),
            optional: false,
            kind: ParameterKind::Value,
        }
    }

    /// The enclosing-instance dependency of a nested type.
    ///
    /// `T` is the enclosing type; its type arguments are re-derived from the
    /// trailing arguments of the nested type's descriptor.
    #[must_use]
    pub fn receiver<T: Fixture>(name: &'static str) -> Self {
        Self {
            name,
            declared: Declared::Lazy(T::descriptor),
            optional: false,
            kind: ParameterKind::Receiver,
        }
    }

    /// Marks the parameter as having a declared default value.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the parameter has a declared default.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns the parameter kind.
    #[must_use]
    pub const fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// Returns the declared type of the parameter.
    #[must_use]
    pub fn declared_type(&self) -> TypeDescriptor {
        match &self.declared {
            Declared::Lazy(describe) => describe(),
            Declared::Fixed(descriptor) => descriptor.clone(),
        }
    }

    /// Returns the formal type parameter this parameter instantiates, if any.
    #[must_use]
    pub fn type_variable_name(&self) -> Option<&'static str> {
        match &self.declared {
            Declared::Fixed(descriptor) => descriptor.variable_name(),
            Declared::Lazy(_) => None,
        }
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("optional", &self.optional)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// An invocable constructor with an ordered parameter list.
#[derive(Clone)]
pub struct Constructor {
    parameters: Vec<Parameter>,
    build: Build,
}

impl Constructor {
    /// Creates a constructor that builds `T` from named arguments.
    ///
    /// Required parameters are read with [`Arguments::take`]; optional ones
    /// with [`Arguments::take_or_else`] so an omitted argument falls back to
    /// the declared default.
    #[must_use]
    pub fn new<T, F>(parameters: Vec<Parameter>, build: F) -> Self
    where
        T: 'static,
        F: Fn(&mut Arguments) -> Result<T, FixtureError> + Send + Sync + 'static,
    {
        Self {
            parameters,
            build: Arc::new(move |arguments: &mut Arguments| {
                build(arguments).map(|value| Box::new(value) as Instance)
            }),
        }
    }

    /// A parameterless constructor backed by `T::default()`.
    #[must_use]
    pub fn from_default<T: Default + 'static>() -> Self {
        Self::new(Vec::new(), |_: &mut Arguments| Ok(T::default()))
    }

    /// Returns the parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns `true` if every parameter has a declared default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.parameters.iter().all(Parameter::is_optional)
    }

    pub(crate) fn invoke(&self, arguments: &mut Arguments) -> Result<Instance, FixtureError> {
        (self.build)(arguments)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// A plain composite type built through one of its constructors.
#[derive(Debug, Clone, Default)]
pub struct CompositeDef {
    type_parameters: Vec<&'static str>,
    constructors: Vec<Constructor>,
}

impl CompositeDef {
    /// Returns the type's own formal type-parameter names.
    #[must_use]
    pub fn type_parameters(&self) -> &[&'static str] {
        &self.type_parameters
    }

    /// Returns the constructors in declaration order.
    #[must_use]
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }
}

/// The semantic definition of a shape.
#[derive(Debug, Clone)]
pub enum Def {
    /// A primitive scalar.
    Scalar(ScalarKind),
    /// A boxed array of a primitive scalar.
    Array(ScalarKind),
    /// A concrete container.
    Container(ContainerDef),
    /// An abstract container interface.
    Interface(InterfaceDef),
    /// A well-known library type.
    Special(SpecialKind),
    /// A type with a single shared value.
    Singleton(SingletonDef),
    /// A closed sum type.
    Sum(SumDef),
    /// A field-less enumeration.
    Enum(EnumDef),
    /// A composite built through constructors.
    Composite(CompositeDef),
    /// A reference to a formal type parameter.
    Variable(&'static str),
}

/// Erased identity and definition of a type, shared by its descriptors.
#[derive(Debug)]
pub struct Shape {
    type_id: Option<TypeId>,
    name: &'static str,
    def: Def,
}

impl Shape {
    /// Returns the `TypeId` of the described Rust type, if it has one.
    #[must_use]
    pub const fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    /// Returns the display name of the type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the definition of the type.
    #[must_use]
    pub const fn def(&self) -> &Def {
        &self.def
    }
}

/// Wraps and unwraps values of a nullable (`Option<T>`) position.
#[derive(Debug, Clone, Copy)]
pub struct Nullability {
    none: fn() -> Instance,
    some: fn(Instance) -> Result<Instance, FixtureError>,
}

impl Nullability {
    /// Nullability of `Option<T>`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            none: none_of::<T>,
            some: some_of::<T>,
        }
    }

    /// Produces `None::<T>`.
    #[must_use]
    pub fn null(&self) -> Instance {
        (self.none)()
    }

    /// Wraps a resolved `T` into `Some(T)`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ElementTypeMismatch`] if `value` is not a `T`.
    pub fn wrap(&self, value: Instance) -> Result<Instance, FixtureError> {
        (self.some)(value)
    }
}

fn none_of<T: 'static>() -> Instance {
    Box::new(None::<T>)
}

fn some_of<T: 'static>(value: Instance) -> Result<Instance, FixtureError> {
    value
        .downcast::<T>()
        .map(|inner| Box::new(Some(*inner)) as Instance)
        .map_err(|_| FixtureError::ElementTypeMismatch {
            expected: type_name::<T>(),
        })
}

/// A handle to a target type: shape, type arguments and nullability.
#[derive(Clone)]
pub struct TypeDescriptor {
    shape: Arc<Shape>,
    arguments: Vec<TypeDescriptor>,
    nullability: Option<Nullability>,
}

impl TypeDescriptor {
    /// Creates a descriptor for the Rust type `T` with the given definition.
    #[must_use]
    pub fn new<T: 'static>(name: &'static str, def: Def) -> Self {
        Self::from_shape(Shape {
            type_id: Some(TypeId::of::<T>()),
            name,
            def,
        })
    }

    fn from_shape(shape: Shape) -> Self {
        Self {
            shape: Arc::new(shape),
            arguments: Vec::new(),
            nullability: None,
        }
    }

    /// Returns the descriptor of `T`.
    #[must_use]
    pub fn of<T: Fixture>() -> Self {
        T::descriptor()
    }

    /// A reference to the formal type parameter `name`.
    #[must_use]
    pub fn variable(name: &'static str) -> Self {
        Self::from_shape(Shape {
            type_id: None,
            name,
            def: Def::Variable(name),
        })
    }

    /// Starts describing a composite type.
    #[must_use]
    pub fn composite<T: 'static>(name: &'static str) -> CompositeBuilder {
        CompositeBuilder {
            type_id: TypeId::of::<T>(),
            name,
            def: CompositeDef::default(),
            arguments: Vec::new(),
        }
    }

    /// Starts describing a closed sum type.
    #[must_use]
    pub fn sum_type<T: 'static>(name: &'static str) -> SumTypeBuilder {
        SumTypeBuilder {
            type_id: TypeId::of::<T>(),
            name,
            def: SumDef::default(),
            arguments: Vec::new(),
        }
    }

    /// Describes a field-less enumeration by its members in declaration order.
    #[must_use]
    pub fn enumeration<T>(name: &'static str, members: &'static [T]) -> Self
    where
        T: Clone + fmt::Debug + Sync + 'static,
    {
        let declared = members
            .iter()
            .map(|member| Member {
                name: format!("{member:?}"),
                make: Arc::new(move || Box::new(member.clone()) as Instance),
            })
            .collect();
        Self::new::<T>(name, Def::Enum(EnumDef { members: declared }))
    }

    /// Describes a type with a single shared value.
    #[must_use]
    pub fn singleton<T: 'static>(name: &'static str, make: fn() -> T) -> Self {
        Self::new::<T>(name, Def::Singleton(SingletonDef::new(make)))
    }

    /// Describes an abstract container interface.
    #[must_use]
    pub fn interface<T: 'static>(name: &'static str, def: InterfaceDef) -> Self {
        Self::new::<T>(name, Def::Interface(def))
    }

    /// Replaces the instantiated type arguments.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<Self>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Marks the descriptor as nullable.
    #[must_use]
    pub fn nullable(mut self, nullability: Nullability) -> Self {
        self.nullability = Some(nullability);
        self
    }

    /// Returns the same descriptor without its nullability marker.
    #[must_use]
    pub fn non_null(&self) -> Self {
        Self {
            shape: Arc::clone(&self.shape),
            arguments: self.arguments.clone(),
            nullability: None,
        }
    }

    /// Returns the shared shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the definition of the type.
    #[must_use]
    pub fn def(&self) -> &Def {
        self.shape.def()
    }

    /// Returns the display name of the erased type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.shape.name()
    }

    /// Returns the instantiated type arguments.
    #[must_use]
    pub fn arguments(&self) -> &[Self] {
        &self.arguments
    }

    /// Returns `true` for nullable positions.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullability.is_some()
    }

    /// Returns the nullability marker, if any.
    #[must_use]
    pub const fn nullability(&self) -> Option<Nullability> {
        self.nullability
    }

    /// Returns the formal parameter name if this is a type variable.
    #[must_use]
    pub fn variable_name(&self) -> Option<&'static str> {
        match self.def() {
            Def::Variable(name) => Some(*name),
            _ => None,
        }
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.shape.type_id == other.shape.type_id
            && self.shape.name == other.shape.name
            && self.arguments == other.arguments
            && self.is_nullable() == other.is_nullable()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        if let Some((first, rest)) = self.arguments.split_first() {
            write!(f, "<{first}")?;
            for argument in rest {
                write!(f, ", {argument}")?;
            }
            f.write_str(">")?;
        }
        if self.is_nullable() {
            f.write_str("?")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({self})")
    }
}

/// Builder for composite descriptors.
#[derive(Debug)]
pub struct CompositeBuilder {
    type_id: TypeId,
    name: &'static str,
    def: CompositeDef,
    arguments: Vec<TypeDescriptor>,
}

impl CompositeBuilder {
    /// Declares the type's own formal type parameters, in order.
    #[must_use]
    pub fn type_parameters(mut self, names: &[&'static str]) -> Self {
        self.def.type_parameters = names.to_vec();
        self
    }

    /// Sets the instantiated type arguments.
    ///
    /// For a nested type the list is the nested type's own arguments followed
    /// by the arguments of its enclosing type.
    #[must_use]
    pub fn arguments(mut self, arguments: Vec<TypeDescriptor>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Appends a constructor; declaration order is selection order.
    #[must_use]
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.def.constructors.push(constructor);
        self
    }

    /// Finishes the descriptor.
    #[must_use]
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::from_shape(Shape {
            type_id: Some(self.type_id),
            name: self.name,
            def: Def::Composite(self.def),
        })
        .with_arguments(self.arguments)
    }
}

/// Builder for sum-type descriptors.
#[derive(Debug)]
pub struct SumTypeBuilder {
    type_id: TypeId,
    name: &'static str,
    def: SumDef,
    arguments: Vec<TypeDescriptor>,
}

impl SumTypeBuilder {
    /// Sets the instantiated type arguments.
    #[must_use]
    pub fn arguments(mut self, arguments: Vec<TypeDescriptor>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Appends a variant; declaration order is selection order.
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.def.variants.push(variant);
        self
    }

    /// Finishes the descriptor.
    #[must_use]
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::from_shape(Shape {
            type_id: Some(self.type_id),
            name: self.name,
            def: Def::Sum(self.def),
        })
        .with_arguments(self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Signal {
        Red,
        Green,
    }

    static SIGNALS: [Signal; 2] = [Signal::Red, Signal::Green];

    #[test]
    fn displays_type_arguments_and_nullability() {
        let descriptor = TypeDescriptor::composite::<()>("Pair")
            .arguments(vec![
                TypeDescriptor::of::<i32>(),
                TypeDescriptor::of::<Option<String>>(),
            ])
            .build();

        assert_eq!(descriptor.to_string(), "Pair<i32, String?>");
    }

    #[test]
    fn non_null_drops_only_the_marker() {
        let nullable = TypeDescriptor::of::<Option<Vec<u8>>>();
        let plain = nullable.non_null();

        assert!(nullable.is_nullable());
        assert!(!plain.is_nullable());
        assert_eq!(plain, TypeDescriptor::of::<Vec<u8>>());
    }

    #[test]
    fn nullability_wraps_and_nulls() {
        let nullability = Nullability::of::<i32>();
        let wrapped = nullability
            .wrap(Box::new(5_i32))
            .expect("an i32 wraps into Some");

        assert_eq!(wrapped.downcast_ref::<Option<i32>>(), Some(&Some(5)));
        assert_eq!(
            nullability.null().downcast_ref::<Option<i32>>(),
            Some(&None)
        );
    }

    #[test]
    fn nullability_rejects_foreign_values() {
        let result = Nullability::of::<i32>().wrap(Box::new("text"));

        assert!(matches!(
            result,
            Err(FixtureError::ElementTypeMismatch { .. })
        ));
    }

    #[test]
    fn enumeration_keeps_declaration_order() {
        let descriptor = TypeDescriptor::enumeration::<Signal>("Signal", &SIGNALS);
        let Def::Enum(def) = descriptor.def() else {
            panic!("expected an enumeration");
        };
        let names: Vec<_> = def.members().iter().map(Member::name).collect();

        assert_eq!(names, ["Red", "Green"]);
    }

    #[test]
    fn variants_report_their_eligibility_inputs() {
        let unit = Variant::singleton("Idle", || Signal::Red);
        let generic = Variant::generic("Ready", &["T"], TypeDescriptor::of::<i32>);

        assert!(unit.is_singleton());
        assert!(unit.type_parameters().is_empty());
        assert!(unit.descriptor().is_none());
        assert!(!generic.is_singleton());
        assert_eq!(generic.type_parameters(), ["T"]);
        assert!(generic.singleton_instance().is_none());
    }

    #[test]
    fn type_variable_parameters_expose_the_variable() {
        let parameter = Parameter::type_variable("k", "K");

        assert_eq!(parameter.type_variable_name(), Some("K"));
        assert_eq!(Parameter::value::<i32>("n").type_variable_name(), None);
    }

    #[test]
    fn default_constructor_requires_every_parameter_optional() {
        let all_optional = Constructor::new(
            vec![Parameter::value::<i32>("a").optional()],
            |arguments: &mut Arguments| arguments.take_or_else("a", || 1_i32),
        );
        let mixed = Constructor::new(
            vec![
                Parameter::value::<i32>("a").optional(),
                Parameter::value::<i32>("b"),
            ],
            |arguments: &mut Arguments| arguments.take::<i32>("b"),
        );

        assert!(all_optional.is_default());
        assert!(!mixed.is_default());
        assert!(Constructor::from_default::<String>().is_default());
    }
}
