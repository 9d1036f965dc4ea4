//! The object constructor: picks a constructor and resolves its arguments.

use std::any::type_name;
use std::collections::HashMap;

use tracing::debug;

use crate::config::Config;
use crate::descriptor::{
    CompositeDef, Constructor, Def, Instance, Parameter, ParameterKind, TypeDescriptor,
};
use crate::error::FixtureError;
use crate::generators::ParameterContext;
use crate::resolve::{Bindings, resolve};

/// Resolved constructor arguments, keyed by parameter name.
///
/// Parameters skipped under [`crate::Policy::use_default_values`] are
/// absent; constructors read them with [`Arguments::take_or_else`] or
/// [`Arguments::take_or_default`] to fall back to their declared default.
#[derive(Debug)]
pub struct Arguments {
    type_name: String,
    values: HashMap<&'static str, Instance>,
}

impl Arguments {
    pub(crate) fn new(type_name: String) -> Self {
        Self {
            type_name,
            values: HashMap::new(),
        }
    }

    pub(crate) fn bind(&mut self, name: &'static str, value: Instance) {
        self.values.insert(name, value);
    }

    /// Returns `true` if a value was bound for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Removes and returns the value bound for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::MissingArgument`] if nothing was bound and
    /// [`FixtureError::ArgumentTypeMismatch`] if the value is not a `T`.
    pub fn take<T: 'static>(&mut self, name: &str) -> Result<T, FixtureError> {
        let value = self
            .values
            .remove(name)
            .ok_or_else(|| FixtureError::MissingArgument {
                type_name: self.type_name.clone(),
                parameter: name.to_owned(),
            })?;
        downcast(name, value)
    }

    /// Like [`Arguments::take`], but falls back to `default` when the
    /// parameter was omitted.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ArgumentTypeMismatch`] if a bound value is
    /// not a `T`.
    pub fn take_or_else<T: 'static>(
        &mut self,
        name: &str,
        default: impl FnOnce() -> T,
    ) -> Result<T, FixtureError> {
        match self.values.remove(name) {
            Some(value) => downcast(name, value),
            None => Ok(default()),
        }
    }

    /// Like [`Arguments::take_or_else`] with `T::default` as the fallback.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ArgumentTypeMismatch`] if a bound value is
    /// not a `T`.
    pub fn take_or_default<T: Default + 'static>(&mut self, name: &str) -> Result<T, FixtureError> {
        self.take_or_else(name, T::default)
    }
}

fn downcast<T: 'static>(name: &str, value: Instance) -> Result<T, FixtureError> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| FixtureError::ArgumentTypeMismatch {
            parameter: name.to_owned(),
            expected: type_name::<T>(),
        })
}

/// Builds a composite instance of `ty`.
///
/// With [`crate::Policy::use_default_constructor`] set, the first
/// constructor whose parameters are all optional is invoked with no
/// arguments. Otherwise the first declared constructor is used and each of
/// its parameters is omitted, nulled, or resolved according to the policy.
pub(crate) fn construct(
    ty: &TypeDescriptor,
    config: &Config,
    outer: &Bindings,
) -> Result<Instance, FixtureError> {
    let Def::Composite(composite) = ty.def() else {
        return Err(no_constructor(ty));
    };
    let policy = config.policy();
    let constructors = composite.constructors();

    if let Some(constructor) = policy
        .use_default_constructor
        .then(|| constructors.iter().find(|candidate| candidate.is_default()))
        .flatten()
    {
        debug!(ty = %ty, "invoking default constructor");
        return constructor.invoke(&mut Arguments::new(ty.to_string()));
    }

    let constructor = constructors.first().ok_or_else(|| no_constructor(ty))?;
    let bindings = Bindings::instantiate(composite.type_parameters(), ty.arguments(), outer);
    if !bindings.is_empty() {
        debug!(ty = %ty, ?bindings, "bound type parameters");
    }
    debug!(
        ty = %ty,
        parameters = constructor.parameters().len(),
        "invoking first declared constructor"
    );

    let mut arguments = bind_arguments(ty, composite, constructor, config, &bindings, outer)?;
    constructor.invoke(&mut arguments)
}

fn bind_arguments(
    ty: &TypeDescriptor,
    composite: &CompositeDef,
    constructor: &Constructor,
    config: &Config,
    bindings: &Bindings,
    outer: &Bindings,
) -> Result<Arguments, FixtureError> {
    let policy = config.policy();
    let mut arguments = Arguments::new(ty.to_string());

    for parameter in constructor.parameters() {
        if policy.use_default_values && parameter.is_optional() {
            continue;
        }
        let declared = parameter.declared_type();
        let value = match declared.nullability() {
            Some(nullability) if policy.set_null => nullability.null(),
            _ => {
                let context = ParameterContext::for_parameter(config, bindings, ty, parameter);
                resolve_parameter(composite, parameter, &declared, &context, outer)?
            }
        };
        arguments.bind(parameter.name(), value);
    }

    Ok(arguments)
}

fn resolve_parameter(
    composite: &CompositeDef,
    parameter: &Parameter,
    declared: &TypeDescriptor,
    context: &ParameterContext<'_>,
    outer: &Bindings,
) -> Result<Instance, FixtureError> {
    match parameter.kind() {
        ParameterKind::Value => match parameter.type_variable_name() {
            None => resolve(declared, context),
            Some(variable) => {
                // Variables the composite does not declare itself fall back to
                // the enclosing instantiation.
                let bound = composite
                    .type_parameters()
                    .contains(&variable)
                    .then(|| context.bindings().get(variable).cloned())
                    .flatten()
                    .unwrap_or_else(|| outer.substitute(declared));
                if bound.variable_name().is_some() {
                    return Err(unsupported(parameter, declared));
                }
                resolve(&bound, context)
            }
        },
        ParameterKind::Receiver => {
            let Some(owner) = context.owner() else {
                return Err(unsupported(parameter, declared));
            };
            let enclosing_arguments = owner
                .arguments()
                .get(composite.type_parameters().len()..)
                .unwrap_or_default()
                .iter()
                .map(|argument| outer.substitute(argument))
                .collect();
            let enclosing = declared.clone().with_arguments(enclosing_arguments);
            debug!(ty = %owner, enclosing = %enclosing, "resolving enclosing instance");
            resolve(&enclosing, context)
        }
    }
}

fn unsupported(parameter: &Parameter, declared: &TypeDescriptor) -> FixtureError {
    FixtureError::UnsupportedParameter {
        parameter: parameter.name().to_owned(),
        declared_type: declared.to_string(),
    }
}

fn no_constructor(ty: &TypeDescriptor) -> FixtureError {
    FixtureError::NoConstructor {
        type_name: ty.to_string(),
    }
}
