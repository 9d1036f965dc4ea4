//! Type-driven construction of fully populated test fixtures.
//!
//! Ask for a value of any registered type and the crate builds one,
//! recursing through constructors, containers, sum types and enumerations
//! until every leaf is a primitive produced by a configurable generator. Tests
//! can then focus on behaviour instead of hand-written setup.
//!
//! # Overview
//!
//! - Types describe themselves through the [`Fixture`] trait, by hand with
//!   [`TypeDescriptor`] builders or with the [`fixture!`] macro
//! - A [`Config`] holds the policy flags and one replaceable generator per
//!   primitive, array, container and special kind
//! - [`Config::deterministic`] yields fixed placeholders for reproducible
//!   equality assertions; [`Config::randomized`] and [`Config::seeded`] yield
//!   pseudo-random values
//! - Failures surface as [`FixtureError`]; nothing half-built is returned
//!
//! # Example
//!
//! ```
//! use fixture_factory::{Config, fixture};
//!
//! #[derive(Debug, PartialEq)]
//! struct Order {
//!     id: u32,
//!     reference: String,
//!     lines: Vec<u16>,
//! }
//!
//! fixture!(Order {
//!     id: u32,
//!     reference: String,
//!     lines: Vec<u16>,
//! });
//!
//! let first: Order = fixture_factory::create_with(&Config::deterministic()).expect("order");
//! let second: Order = fixture_factory::create_with(&Config::deterministic()).expect("order");
//!
//! assert_eq!(first, Order { id: 1, reference: String::new(), lines: Vec::new() });
//! assert_eq!(first, second);
//! ```

mod classify;
mod config;
mod construct;
mod descriptor;
mod error;
mod fixture;
pub mod generators;
mod macros;
mod reference;
mod resolve;
mod special;
pub mod variants;

use std::any::type_name;

use tracing::trace;

pub use classify::{Classification, classify};
pub use config::{Config, ConfigBuilder, Policy, default_config, set_default_config};
pub use construct::Arguments;
pub use descriptor::{
    AssembleElements, AssembleEntries, CompositeBuilder, CompositeDef, Constructor, ContainerDef,
    Def, EnumDef, Instance, InterfaceDef, Member, Nullability, Parameter, ParameterKind, Scalar,
    ScalarKind, Shape, SingletonDef, SpecialKind, SumDef, SumTypeBuilder, TypeDescriptor, Variant,
};
pub use error::{FixtureError, PolicyError};
pub use fixture::Fixture;
pub use reference::TypeReference;
pub use resolve::Bindings;
pub use special::{
    Locale, PLACEHOLDER_TIMESTAMP_MILLIS, placeholder_calendar, placeholder_timestamp,
};

/// Creates a `T` with the process-wide default configuration.
///
/// # Errors
///
/// Returns the first [`FixtureError`] raised while resolving `T`.
pub fn create<T: Fixture>() -> Result<T, FixtureError> {
    create_with(&default_config())
}

/// Creates a `T` with an explicit configuration.
///
/// # Errors
///
/// Returns the first [`FixtureError`] raised while resolving `T`.
pub fn create_with<T: Fixture>(config: &Config) -> Result<T, FixtureError> {
    let descriptor = T::descriptor();
    instantiate_with(&descriptor, config)?
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| FixtureError::TypeMismatch {
            expected: type_name::<T>(),
            descriptor: descriptor.to_string(),
        })
}

/// Resolves `descriptor` with the process-wide default configuration.
///
/// # Errors
///
/// Returns the first [`FixtureError`] raised during resolution.
pub fn instantiate(descriptor: &TypeDescriptor) -> Result<Instance, FixtureError> {
    instantiate_with(descriptor, &default_config())
}

/// Resolves `descriptor` with an explicit configuration.
///
/// The result is type-erased; downcast it to the described Rust type.
///
/// # Errors
///
/// Returns the first [`FixtureError`] raised during resolution.
pub fn instantiate_with(
    descriptor: &TypeDescriptor,
    config: &Config,
) -> Result<Instance, FixtureError> {
    trace!(ty = %descriptor, policy = ?config.policy(), "creating fixture");
    let bindings = Bindings::default();
    generators::ParameterContext::root(config, &bindings).resolve(descriptor)
}
