//! Generator signatures, the parameter context, and stock generators.
//!
//! Every kind of value the resolver can produce directly has a replaceable
//! generator in [`crate::Config`]. Generators receive a [`ParameterContext`]
//! describing where the value will be bound; container generators also
//! receive the declared element (or key and value) types and decide whether
//! to populate the container.

use std::sync::{Arc, Mutex, PoisonError};

use rand::distr::Alphanumeric;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Builder;

use crate::config::Config;
use crate::descriptor::{Instance, Parameter, TypeDescriptor};
use crate::error::FixtureError;
use crate::resolve::{Bindings, resolve};

/// Placeholder for `char` values, also the source of the byte placeholders.
pub const PLACEHOLDER_CHAR: char = ',';

/// Placeholder for `u8` values: the byte of [`PLACEHOLDER_CHAR`].
pub const PLACEHOLDER_U8: u8 = b',';

/// Placeholder for `i8` values: the byte of [`PLACEHOLDER_CHAR`].
pub const PLACEHOLDER_I8: i8 = 44;

pub(crate) type ErasedGenerator = Arc<dyn Fn(&ParameterContext<'_>) -> Instance + Send + Sync>;

/// Produces the elements of a sequential container.
pub type ListGenerator = Arc<
    dyn Fn(&ParameterContext<'_>, &TypeDescriptor) -> Result<Vec<Instance>, FixtureError>
        + Send
        + Sync,
>;

/// Produces the entries of a key-value container.
pub type MapGenerator = Arc<
    dyn Fn(
            &ParameterContext<'_>,
            &TypeDescriptor,
            &TypeDescriptor,
        ) -> Result<Vec<(Instance, Instance)>, FixtureError>
        + Send
        + Sync,
>;

/// Picks a value for a sum type or an enumeration.
pub type TypeResolver =
    Arc<dyn Fn(&TypeDescriptor, &Config) -> Result<Instance, FixtureError> + Send + Sync>;

pub(crate) fn erase<T, F>(generator: F) -> ErasedGenerator
where
    T: 'static,
    F: Fn(&ParameterContext<'_>) -> T + Send + Sync + 'static,
{
    Arc::new(move |context: &ParameterContext<'_>| Box::new(generator(context)) as Instance)
}

/// Where a generated value is going to be bound.
#[derive(Debug, Clone, Copy)]
pub struct ParameterContext<'a> {
    config: &'a Config,
    bindings: &'a Bindings,
    owner: Option<&'a TypeDescriptor>,
    parameter: Option<&'a Parameter>,
}

impl<'a> ParameterContext<'a> {
    pub(crate) const fn root(config: &'a Config, bindings: &'a Bindings) -> Self {
        Self {
            config,
            bindings,
            owner: None,
            parameter: None,
        }
    }

    pub(crate) const fn for_parameter(
        config: &'a Config,
        bindings: &'a Bindings,
        owner: &'a TypeDescriptor,
        parameter: &'a Parameter,
    ) -> Self {
        Self {
            config,
            bindings,
            owner: Some(owner),
            parameter: Some(parameter),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &'a Config {
        self.config
    }

    /// Returns the type-parameter bindings of the type being built.
    #[must_use]
    pub const fn bindings(&self) -> &'a Bindings {
        self.bindings
    }

    /// Returns the type whose constructor receives the value.
    ///
    /// `None` when the value is requested directly rather than as a
    /// constructor argument.
    #[must_use]
    pub const fn owner(&self) -> Option<&'a TypeDescriptor> {
        self.owner
    }

    /// Returns the parameter receiving the value.
    #[must_use]
    pub const fn parameter(&self) -> Option<&'a Parameter> {
        self.parameter
    }

    /// Returns the name of the parameter receiving the value.
    #[must_use]
    pub fn parameter_name(&self) -> Option<&'static str> {
        self.parameter.map(Parameter::name)
    }

    /// Resolves a value of another type with the same configuration.
    ///
    /// Container generators use this to populate elements.
    ///
    /// # Errors
    ///
    /// Propagates any [`FixtureError`] raised while resolving `ty`.
    pub fn resolve(&self, ty: &TypeDescriptor) -> Result<Instance, FixtureError> {
        resolve(ty, self)
    }
}

/// The pseudo-random source behind randomised generators.
#[derive(Debug, Clone)]
pub enum RandomSource {
    /// The thread-local generator.
    Thread,
    /// A reproducible stream shared by every generator of a configuration.
    Seeded(Arc<Mutex<ChaCha8Rng>>),
}

impl RandomSource {
    /// A reproducible source seeded with `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))))
    }

    /// Runs `sample` against the underlying generator.
    pub fn with_rng<R>(&self, sample: impl FnOnce(&mut dyn RngCore) -> R) -> R {
        match self {
            Self::Thread => sample(&mut rand::rng()),
            Self::Seeded(shared) => {
                let mut rng = shared.lock().unwrap_or_else(PoisonError::into_inner);
                sample(&mut *rng)
            }
        }
    }
}

/// A generator that draws one value per call from `source`.
pub fn random<T: 'static>(
    source: &RandomSource,
    sample: fn(&mut dyn RngCore) -> T,
) -> impl Fn(&ParameterContext<'_>) -> T + Send + Sync + 'static {
    let shared = source.clone();
    move |_: &ParameterContext<'_>| shared.with_rng(sample)
}

/// A generator of `size`-element arrays drawn from `source`.
pub fn random_array<T: 'static>(
    source: &RandomSource,
    size: usize,
    sample: fn(&mut dyn RngCore) -> T,
) -> impl Fn(&ParameterContext<'_>) -> Box<[T]> + Send + Sync + 'static {
    let shared = source.clone();
    move |_: &ParameterContext<'_>| {
        shared.with_rng(|rng| (0..size).map(|_| sample(rng)).collect())
    }
}

/// A generator of `size`-element arrays whose elements come from `element`.
///
/// `element` receives the index of the element being produced.
pub fn array_from_fn<T, F>(
    size: usize,
    element: F,
) -> impl Fn(&ParameterContext<'_>) -> Box<[T]> + Send + Sync + 'static
where
    T: 'static,
    F: Fn(usize) -> T + Send + Sync + 'static,
{
    move |_: &ParameterContext<'_>| (0..size).map(&element).collect()
}

/// A list generator that resolves `len` elements of the declared type.
pub fn filled_list(
    len: usize,
) -> impl Fn(&ParameterContext<'_>, &TypeDescriptor) -> Result<Vec<Instance>, FixtureError>
+ Send
+ Sync
+ 'static {
    move |context: &ParameterContext<'_>, element: &TypeDescriptor| {
        (0..len).map(|_| context.resolve(element)).collect()
    }
}

/// A map generator that resolves `len` entries of the declared types.
///
/// Keys produced by a deterministic configuration are all equal, so the
/// resulting map then holds a single entry.
pub fn filled_map(
    len: usize,
) -> impl Fn(
    &ParameterContext<'_>,
    &TypeDescriptor,
    &TypeDescriptor,
) -> Result<Vec<(Instance, Instance)>, FixtureError>
+ Send
+ Sync
+ 'static {
    move |context: &ParameterContext<'_>, key: &TypeDescriptor, value: &TypeDescriptor| {
        (0..len)
            .map(|_| Ok((context.resolve(key)?, context.resolve(value)?)))
            .collect()
    }
}

pub(crate) fn random_string(rng: &mut dyn RngCore) -> String {
    Builder::from_random_bytes(rng.random()).into_uuid().to_string()
}

pub(crate) fn random_char(rng: &mut dyn RngCore) -> char {
    char::from(rng.sample(Alphanumeric))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(source: &RandomSource) -> Vec<u64> {
        (0..4).map(|_| source.with_rng(|rng| rng.next_u64())).collect()
    }

    #[test]
    fn seeded_sources_are_reproducible() {
        assert_eq!(draw(&RandomSource::seeded(7)), draw(&RandomSource::seeded(7)));
        assert_ne!(draw(&RandomSource::seeded(7)), draw(&RandomSource::seeded(8)));
    }

    #[test]
    fn random_strings_look_like_uuids() {
        let value = RandomSource::seeded(1).with_rng(random_string);

        assert_eq!(value.len(), 36);
        assert!(uuid::Uuid::parse_str(&value).is_ok());
    }

    #[test]
    fn random_chars_are_alphanumeric() {
        let source = RandomSource::seeded(3);

        for _ in 0..32 {
            assert!(source.with_rng(random_char).is_ascii_alphanumeric());
        }
    }

    #[test]
    fn array_from_fn_uses_element_indices() {
        let config = Config::deterministic();
        let bindings = Bindings::default();
        let context = ParameterContext::root(&config, &bindings);
        let generator = array_from_fn(3, |index| index * 10);

        assert_eq!(&*generator(&context), &[0, 10, 20]);
    }

    #[test]
    fn random_array_honours_size() {
        let config = Config::deterministic();
        let bindings = Bindings::default();
        let context = ParameterContext::root(&config, &bindings);
        let generator = random_array(&RandomSource::seeded(5), 4, |rng| rng.random::<u16>());

        assert_eq!(generator(&context).len(), 4);
    }
}
