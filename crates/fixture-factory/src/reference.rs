//! Typed handles around descriptors that may have been adjusted at runtime.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::config::{Config, default_config};
use crate::descriptor::TypeDescriptor;
use crate::error::FixtureError;
use crate::fixture::Fixture;

/// A descriptor that is known to produce values of `T`.
///
/// Useful when the descriptor is tweaked after it is obtained, for example
/// to pin a generic instantiation or mark the target nullable, while still
/// getting a typed value back.
///
/// # Example
///
/// ```
/// use fixture_factory::{Config, TypeReference};
///
/// let reference = TypeReference::<Vec<u8>>::new();
/// let bytes = reference.create_with(&Config::deterministic()).expect("bytes");
/// assert!(bytes.is_empty());
/// ```
pub struct TypeReference<T> {
    descriptor: TypeDescriptor,
    marker: PhantomData<fn() -> T>,
}

impl<T: Fixture> TypeReference<T> {
    /// A reference to `T`'s own descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::from_descriptor(T::descriptor())
    }
}

impl<T: Fixture> Default for TypeReference<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> TypeReference<T> {
    /// Wraps a descriptor that is expected to produce values of `T`.
    ///
    /// The expectation is checked when a value is created.
    #[must_use]
    pub const fn from_descriptor(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            marker: PhantomData,
        }
    }

    /// Returns the wrapped descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Creates a value with the process-wide default configuration.
    ///
    /// # Errors
    ///
    /// Returns any [`FixtureError`] raised during resolution, or
    /// [`FixtureError::TypeMismatch`] if the descriptor produced something
    /// other than a `T`.
    pub fn create(&self) -> Result<T, FixtureError> {
        self.create_with(&default_config())
    }

    /// Creates a value with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns any [`FixtureError`] raised during resolution, or
    /// [`FixtureError::TypeMismatch`] if the descriptor produced something
    /// other than a `T`.
    pub fn create_with(&self, config: &Config) -> Result<T, FixtureError> {
        crate::instantiate_with(&self.descriptor, config)?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| FixtureError::TypeMismatch {
                expected: type_name::<T>(),
                descriptor: self.descriptor.to_string(),
            })
    }
}

impl<T> Clone for TypeReference<T> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypeReference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeReference")
            .field(&self.descriptor)
            .finish()
    }
}
