//! Default strategies for sum types and enumerations.
//!
//! Both are registered in [`Config`] and can be replaced through
//! [`crate::ConfigBuilder::sum_type_resolver`] and
//! [`crate::ConfigBuilder::enum_resolver`].

use rand::Rng;
use tracing::debug;

use crate::config::Config;
use crate::descriptor::{Def, Instance, Member, TypeDescriptor};
use crate::error::FixtureError;
use crate::generators::ParameterContext;
use crate::resolve::Bindings;

/// Picks a variant of a sum type.
///
/// With [`crate::Policy::prefer_singleton_variants`] set, the first
/// payload-free variant wins when one exists. Otherwise the first
/// payload-bearing variant without type parameters of its own is resolved
/// like any other type: a composite through its constructor, a nested sum
/// type, enumeration or singleton through its own strategy.
///
/// # Errors
///
/// Returns [`FixtureError::EmptySumType`] if the type declares no variants,
/// [`FixtureError::NoEligibleVariant`] if none qualifies, or any error
/// raised while building the chosen variant.
pub fn resolve_sum_type(ty: &TypeDescriptor, config: &Config) -> Result<Instance, FixtureError> {
    let Def::Sum(sum) = ty.def() else {
        return Err(FixtureError::TypeMismatch {
            expected: "sum type",
            descriptor: ty.to_string(),
        });
    };
    let variants = sum.variants();
    if variants.is_empty() {
        return Err(FixtureError::EmptySumType {
            type_name: ty.to_string(),
        });
    }

    let singleton = config
        .policy()
        .prefer_singleton_variants
        .then(|| {
            variants
                .iter()
                .find_map(|variant| variant.singleton_instance().map(|instance| (variant, instance)))
        })
        .flatten();
    if let Some((variant, instance)) = singleton {
        debug!(ty = %ty, variant = variant.name(), "picked singleton variant");
        return Ok(instance);
    }

    let (variant, descriptor) = variants
        .iter()
        .filter(|variant| variant.type_parameters().is_empty())
        .find_map(|variant| variant.descriptor().map(|descriptor| (variant, descriptor)))
        .ok_or_else(|| FixtureError::NoEligibleVariant {
            type_name: ty.to_string(),
        })?;
    debug!(ty = %ty, variant = variant.name(), "resolving payload variant");

    let bindings = Bindings::default();
    ParameterContext::root(config, &bindings).resolve(&descriptor)
}

/// Returns the first declared member of an enumeration.
///
/// The choice ignores the configuration's generators, so randomised
/// configurations still produce the first member.
///
/// # Errors
///
/// Returns [`FixtureError::EmptyEnum`] if the enumeration declares no
/// members.
pub fn resolve_enum(ty: &TypeDescriptor, _config: &Config) -> Result<Instance, FixtureError> {
    enum_members(ty)?
        .first()
        .map(Member::instance)
        .ok_or_else(|| FixtureError::EmptyEnum {
            type_name: ty.to_string(),
        })
}

/// Returns a uniformly chosen member of an enumeration.
///
/// Not the default; register it with
/// [`crate::ConfigBuilder::enum_resolver`] to opt in.
///
/// # Errors
///
/// Returns [`FixtureError::EmptyEnum`] if the enumeration declares no
/// members.
pub fn random_enum_member(ty: &TypeDescriptor, _config: &Config) -> Result<Instance, FixtureError> {
    let members = enum_members(ty)?;
    if members.is_empty() {
        return Err(FixtureError::EmptyEnum {
            type_name: ty.to_string(),
        });
    }
    let index = rand::rng().random_range(0..members.len());
    members
        .get(index)
        .map(Member::instance)
        .ok_or_else(|| FixtureError::EmptyEnum {
            type_name: ty.to_string(),
        })
}

fn enum_members(ty: &TypeDescriptor) -> Result<&[Member], FixtureError> {
    match ty.def() {
        Def::Enum(enumeration) => Ok(enumeration.members()),
        _ => Err(FixtureError::TypeMismatch {
            expected: "enumeration",
            descriptor: ty.to_string(),
        }),
    }
}
