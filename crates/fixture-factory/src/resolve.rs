//! The recursive value resolver and its generic binding environment.
//!
//! [`resolve`] classifies a descriptor and either calls the matching
//! generator from the configuration, defers to the sum-type and enum
//! strategies, or hands composites to [`crate::construct`]. Abstract
//! container interfaces are adapted from the concrete container generators.

use tracing::trace;

use crate::classify::{Classification, classify};
use crate::construct::construct;
use crate::descriptor::{ContainerDef, Instance, InterfaceDef, TypeDescriptor};
use crate::error::FixtureError;
use crate::generators::ParameterContext;

/// Concrete types bound to the formal type parameters of one composite.
///
/// Built once per composite instantiation and threaded through every
/// parameter resolved for it.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: Vec<(&'static str, TypeDescriptor)>,
}

impl Bindings {
    /// Binds `formals` to `arguments` by position.
    ///
    /// Arguments that are themselves type variables are looked up in
    /// `outer`, so bindings always refer to concrete types. Surplus
    /// arguments, such as those of an enclosing type, stay unbound.
    pub(crate) fn instantiate(
        formals: &[&'static str],
        arguments: &[TypeDescriptor],
        outer: &Self,
    ) -> Self {
        Self {
            entries: formals
                .iter()
                .zip(arguments)
                .map(|(formal, argument)| (*formal, outer.substitute(argument)))
                .collect(),
        }
    }

    /// Returns the type bound to the formal parameter `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.entries
            .iter()
            .find(|(formal, _)| *formal == name)
            .map(|(_, bound)| bound)
    }

    /// Returns `true` if no formal parameter is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every bound type variable inside `ty`.
    ///
    /// Unbound variables are left in place for the resolver to report.
    #[must_use]
    pub fn substitute(&self, ty: &TypeDescriptor) -> TypeDescriptor {
        if let Some(bound) = ty.variable_name().and_then(|name| self.get(name)) {
            return bound.clone();
        }
        if ty.arguments().is_empty() || self.is_empty() {
            return ty.clone();
        }
        let arguments = ty
            .arguments()
            .iter()
            .map(|argument| self.substitute(argument))
            .collect();
        ty.clone().with_arguments(arguments)
    }
}

/// Resolves a value for `ty` in `context`.
pub(crate) fn resolve(
    ty: &TypeDescriptor,
    context: &ParameterContext<'_>,
) -> Result<Instance, FixtureError> {
    if let Some(nullability) = ty.nullability() {
        let value = resolve(&ty.non_null(), context)?;
        return nullability.wrap(value);
    }

    let classification = classify(ty);
    trace!(ty = %ty, kind = %classification, "resolving value");
    let config = context.config();

    match classification {
        Classification::Singleton(singleton) => Ok(singleton.instance()),
        Classification::SumType => config.resolve_sum_type(ty),
        Classification::Enum => config.resolve_enum(ty),
        Classification::PrimitiveScalar(kind) => Ok(config.scalar_generator(kind)?(context)),
        Classification::PrimitiveArray(kind) => Ok(config.array_generator(kind)?(context)),
        Classification::SpecialType(kind) => Ok(config.special_generator(kind)?(context)),
        Classification::Container(container, arguments) => {
            resolve_container(ty, container, arguments, context)
        }
        Classification::Interface(interface, arguments) => {
            resolve_interface(ty, interface, arguments, context)
        }
        Classification::GenericParameterReference(variable) => {
            let bound = context.bindings().get(variable).ok_or_else(|| {
                FixtureError::UnboundTypeVariable {
                    variable: variable.to_owned(),
                }
            })?;
            resolve(bound, context)
        }
        Classification::Composite => construct(ty, config, context.bindings()),
    }
}

fn resolve_container(
    ty: &TypeDescriptor,
    container: &ContainerDef,
    arguments: &[TypeDescriptor],
    context: &ParameterContext<'_>,
) -> Result<Instance, FixtureError> {
    let config = context.config();
    match container {
        ContainerDef::ArrayList { assemble } => {
            let element = type_argument(ty, arguments, 0, context)?;
            assemble((config.array_list())(context, &element)?)
        }
        ContainerDef::LinkedList { assemble } => {
            let element = type_argument(ty, arguments, 0, context)?;
            assemble((config.linked_list())(context, &element)?)
        }
        ContainerDef::HashMap { assemble } => {
            let key = type_argument(ty, arguments, 0, context)?;
            let value = type_argument(ty, arguments, 1, context)?;
            assemble((config.hash_map())(context, &key, &value)?)
        }
    }
}

/// Adapts the concrete container generators to an abstract interface.
///
/// List-like interfaces and lazy sequences draw from the array-list
/// generator, map interfaces from the hash-map generator.
fn resolve_interface(
    ty: &TypeDescriptor,
    interface: &InterfaceDef,
    arguments: &[TypeDescriptor],
    context: &ParameterContext<'_>,
) -> Result<Instance, FixtureError> {
    let config = context.config();
    match interface {
        InterfaceDef::List { assemble } | InterfaceDef::Sequence { assemble } => {
            let element = type_argument(ty, arguments, 0, context)?;
            assemble((config.array_list())(context, &element)?)
        }
        InterfaceDef::Map { assemble } => {
            let key = type_argument(ty, arguments, 0, context)?;
            let value = type_argument(ty, arguments, 1, context)?;
            assemble((config.hash_map())(context, &key, &value)?)
        }
        InterfaceDef::Unsupported => Err(FixtureError::UnsupportedContainerInterface {
            interface: ty.to_string(),
        }),
    }
}

fn type_argument(
    ty: &TypeDescriptor,
    arguments: &[TypeDescriptor],
    position: usize,
    context: &ParameterContext<'_>,
) -> Result<TypeDescriptor, FixtureError> {
    arguments
        .get(position)
        .map(|argument| context.bindings().substitute(argument))
        .ok_or_else(|| FixtureError::MissingTypeArgument {
            type_name: ty.to_string(),
            position,
        })
}
