//! Configuration: policy flags plus one replaceable generator per kind.
//!
//! A [`Config`] is immutable once built. [`Config::derive`] starts a
//! [`ConfigBuilder`] that shares every generator it does not override with
//! its parent, so deriving is cheap and never mutates the parent.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::descriptor::{Instance, Scalar, ScalarKind, SpecialKind, TypeDescriptor};
use crate::error::{FixtureError, PolicyError};
use crate::generators::{
    ErasedGenerator, ListGenerator, MapGenerator, PLACEHOLDER_CHAR, PLACEHOLDER_I8,
    PLACEHOLDER_U8, ParameterContext, RandomSource, TypeResolver, erase, random, random_array,
    random_char, random_string,
};
use crate::special::{Locale, placeholder_calendar, placeholder_timestamp};
use crate::variants::{resolve_enum, resolve_sum_type};

/// The four policy flags steering constructor and variant selection.
///
/// Missing keys in JSON take their defaults.
///
/// # Example
///
/// ```
/// use fixture_factory::Policy;
///
/// let policy = Policy::from_json(r#"{"setNull": true}"#).expect("valid policy");
/// assert!(policy.set_null);
/// assert!(policy.use_default_constructor);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Policy {
    /// Prefer a constructor whose parameters all have declared defaults.
    pub use_default_constructor: bool,
    /// Omit optional parameters instead of generating values for them.
    pub use_default_values: bool,
    /// Bind `None` to nullable parameters instead of generating a value.
    pub set_null: bool,
    /// Prefer a payload-free variant when resolving a sum type.
    ///
    /// Also read from the `useSubObjectsForSealeds` key.
    #[serde(alias = "useSubObjectsForSealeds")]
    pub prefer_singleton_variants: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            use_default_constructor: true,
            use_default_values: true,
            set_null: false,
            prefer_singleton_variants: true,
        }
    }
}

impl Policy {
    /// Parses a policy from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Parse`] if the JSON is malformed or names an
    /// unknown flag.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        serde_json::from_str(json).map_err(|e| PolicyError::Parse {
            message: e.to_string(),
        })
    }

    /// Loads a policy from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let contents = fs::read_to_string(path).map_err(|e| PolicyError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }
}

/// An immutable bundle of policy flags and per-kind generators.
#[derive(Clone)]
pub struct Config {
    policy: Policy,
    scalars: HashMap<ScalarKind, ErasedGenerator>,
    arrays: HashMap<ScalarKind, ErasedGenerator>,
    specials: HashMap<SpecialKind, ErasedGenerator>,
    array_list: ListGenerator,
    linked_list: ListGenerator,
    hash_map: MapGenerator,
    sum_type_resolver: TypeResolver,
    enum_resolver: TypeResolver,
}

impl Config {
    /// Fixed placeholders for every kind, for reproducible assertions.
    ///
    /// Numbers are `1`, booleans `false`, strings empty, characters `','`,
    /// arrays and containers empty, timestamps one millisecond after the
    /// epoch and locales [`Locale::US`].
    #[must_use]
    pub fn deterministic() -> Self {
        let mut scalars = HashMap::new();
        scalars.insert(ScalarKind::Bool, erase(|_| false));
        scalars.insert(ScalarKind::I8, erase(|_| PLACEHOLDER_I8));
        scalars.insert(ScalarKind::I16, erase(|_| 1_i16));
        scalars.insert(ScalarKind::I32, erase(|_| 1_i32));
        scalars.insert(ScalarKind::I64, erase(|_| 1_i64));
        scalars.insert(ScalarKind::U8, erase(|_| PLACEHOLDER_U8));
        scalars.insert(ScalarKind::U16, erase(|_| 1_u16));
        scalars.insert(ScalarKind::U32, erase(|_| 1_u32));
        scalars.insert(ScalarKind::U64, erase(|_| 1_u64));
        scalars.insert(ScalarKind::F32, erase(|_| 1.0_f32));
        scalars.insert(ScalarKind::F64, erase(|_| 1.0_f64));
        scalars.insert(ScalarKind::Char, erase(|_| PLACEHOLDER_CHAR));
        scalars.insert(ScalarKind::String, erase(|_| String::new()));

        let mut arrays = HashMap::new();
        arrays.insert(ScalarKind::Bool, empty_array::<bool>());
        arrays.insert(ScalarKind::I8, empty_array::<i8>());
        arrays.insert(ScalarKind::I16, empty_array::<i16>());
        arrays.insert(ScalarKind::I32, empty_array::<i32>());
        arrays.insert(ScalarKind::I64, empty_array::<i64>());
        arrays.insert(ScalarKind::U8, empty_array::<u8>());
        arrays.insert(ScalarKind::U16, empty_array::<u16>());
        arrays.insert(ScalarKind::U32, empty_array::<u32>());
        arrays.insert(ScalarKind::U64, empty_array::<u64>());
        arrays.insert(ScalarKind::F32, empty_array::<f32>());
        arrays.insert(ScalarKind::F64, empty_array::<f64>());
        arrays.insert(ScalarKind::Char, empty_array::<char>());
        arrays.insert(ScalarKind::String, empty_array::<String>());

        let mut specials = HashMap::new();
        specials.insert(SpecialKind::Timestamp, erase(|_| placeholder_timestamp()));
        specials.insert(SpecialKind::Calendar, erase(|_| placeholder_calendar()));
        specials.insert(SpecialKind::Locale, erase(|_| Locale::US));

        Self {
            policy: Policy::default(),
            scalars,
            arrays,
            specials,
            array_list: Arc::new(no_elements),
            linked_list: Arc::new(no_elements),
            hash_map: Arc::new(no_entries),
            sum_type_resolver: Arc::new(resolve_sum_type),
            enum_resolver: Arc::new(resolve_enum),
        }
    }

    /// Pseudo-random scalars and arrays drawn from the thread-local generator.
    ///
    /// Strings are random UUIDs, character arrays hold the characters of one,
    /// other arrays hold one element and timestamps are the current time. Containers stay empty and enumerations still resolve to
    /// their first member.
    #[must_use]
    pub fn randomized() -> Self {
        Self::random_from(&RandomSource::Thread)
    }

    /// Like [`Config::randomized`], but reproducible from `seed`.
    ///
    /// Every generator of the configuration draws from one shared stream.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::random_from(&RandomSource::seeded(seed))
    }

    fn random_from(source: &RandomSource) -> Self {
        let mut scalars = HashMap::new();
        scalars.insert(ScalarKind::Bool, erase(random(source, |rng| rng.random::<bool>())));
        scalars.insert(ScalarKind::I8, erase(random(source, |rng| rng.random::<i8>())));
        scalars.insert(ScalarKind::I16, erase(random(source, |rng| rng.random::<i16>())));
        scalars.insert(ScalarKind::I32, erase(random(source, |rng| rng.random::<i32>())));
        scalars.insert(ScalarKind::I64, erase(random(source, |rng| rng.random::<i64>())));
        scalars.insert(ScalarKind::U8, erase(random(source, |rng| rng.random::<u8>())));
        scalars.insert(ScalarKind::U16, erase(random(source, |rng| rng.random::<u16>())));
        scalars.insert(ScalarKind::U32, erase(random(source, |rng| rng.random::<u32>())));
        scalars.insert(ScalarKind::U64, erase(random(source, |rng| rng.random::<u64>())));
        scalars.insert(ScalarKind::F32, erase(random(source, |rng| rng.random::<f32>())));
        scalars.insert(ScalarKind::F64, erase(random(source, |rng| rng.random::<f64>())));
        scalars.insert(ScalarKind::Char, erase(random(source, random_char)));
        scalars.insert(ScalarKind::String, erase(random(source, random_string)));

        let mut arrays = HashMap::new();
        arrays.insert(ScalarKind::Bool, erase(random_array(source, 1, |rng| rng.random::<bool>())));
        arrays.insert(ScalarKind::I8, erase(random_array(source, 1, |rng| rng.random::<i8>())));
        arrays.insert(ScalarKind::I16, erase(random_array(source, 1, |rng| rng.random::<i16>())));
        arrays.insert(ScalarKind::I32, erase(random_array(source, 1, |rng| rng.random::<i32>())));
        arrays.insert(ScalarKind::I64, erase(random_array(source, 1, |rng| rng.random::<i64>())));
        arrays.insert(ScalarKind::U8, erase(random_array(source, 1, |rng| rng.random::<u8>())));
        arrays.insert(ScalarKind::U16, erase(random_array(source, 1, |rng| rng.random::<u16>())));
        arrays.insert(ScalarKind::U32, erase(random_array(source, 1, |rng| rng.random::<u32>())));
        arrays.insert(ScalarKind::U64, erase(random_array(source, 1, |rng| rng.random::<u64>())));
        arrays.insert(ScalarKind::F32, erase(random_array(source, 1, |rng| rng.random::<f32>())));
        arrays.insert(ScalarKind::F64, erase(random_array(source, 1, |rng| rng.random::<f64>())));
        arrays.insert(ScalarKind::Char, erase(random(source, random_chars)));
        arrays.insert(ScalarKind::String, erase(random_array(source, 1, random_string)));

        let mut specials = HashMap::new();
        specials.insert(SpecialKind::Timestamp, erase(|_| SystemTime::now()));
        specials.insert(SpecialKind::Calendar, erase(|_| Utc::now()));
        specials.insert(SpecialKind::Locale, erase(|_| Locale::US));

        Self {
            scalars,
            arrays,
            specials,
            ..Self::deterministic()
        }
    }

    /// Starts a derived configuration sharing every generator with `self`.
    #[must_use]
    pub fn derive(&self) -> ConfigBuilder {
        ConfigBuilder {
            config: self.clone(),
        }
    }

    /// Returns the policy flags.
    #[must_use]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    pub(crate) fn scalar_generator(
        &self,
        kind: ScalarKind,
    ) -> Result<&ErasedGenerator, FixtureError> {
        self.scalars
            .get(&kind)
            .ok_or_else(|| missing_generator(format!("scalar '{kind}'")))
    }

    pub(crate) fn array_generator(
        &self,
        kind: ScalarKind,
    ) -> Result<&ErasedGenerator, FixtureError> {
        self.arrays
            .get(&kind)
            .ok_or_else(|| missing_generator(format!("array '{}'", kind.array_name())))
    }

    pub(crate) fn special_generator(
        &self,
        kind: SpecialKind,
    ) -> Result<&ErasedGenerator, FixtureError> {
        self.specials
            .get(&kind)
            .ok_or_else(|| missing_generator(format!("special type '{kind}'")))
    }

    pub(crate) const fn array_list(&self) -> &ListGenerator {
        &self.array_list
    }

    pub(crate) const fn linked_list(&self) -> &ListGenerator {
        &self.linked_list
    }

    pub(crate) const fn hash_map(&self) -> &MapGenerator {
        &self.hash_map
    }

    pub(crate) fn resolve_sum_type(&self, ty: &TypeDescriptor) -> Result<Instance, FixtureError> {
        (self.sum_type_resolver)(ty, self)
    }

    pub(crate) fn resolve_enum(&self, ty: &TypeDescriptor) -> Result<Instance, FixtureError> {
        (self.enum_resolver)(ty, self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::deterministic()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("policy", &self.policy)
            .field("scalars", &self.scalars.len())
            .field("arrays", &self.arrays.len())
            .field("specials", &self.specials.len())
            .finish_non_exhaustive()
    }
}

fn empty_array<T: 'static>() -> ErasedGenerator {
    erase(|_| Box::<[T]>::default())
}

fn no_elements(
    _: &ParameterContext<'_>,
    _: &TypeDescriptor,
) -> Result<Vec<Instance>, FixtureError> {
    Ok(Vec::new())
}

fn no_entries(
    _: &ParameterContext<'_>,
    _: &TypeDescriptor,
    _: &TypeDescriptor,
) -> Result<Vec<(Instance, Instance)>, FixtureError> {
    Ok(Vec::new())
}

/// The characters of a random UUID string.
fn random_chars(rng: &mut dyn RngCore) -> Box<[char]> {
    random_string(rng).chars().collect()
}

fn missing_generator(kind: String) -> FixtureError {
    FixtureError::MissingGenerator { kind }
}

/// Derives a new [`Config`] with selected generators or flags replaced.
///
/// # Example
///
/// ```
/// use fixture_factory::{Config, generators};
///
/// let config = Config::deterministic()
///     .derive()
///     .scalar(|_| 42_i32)
///     .array_list(generators::filled_list(2))
///     .build();
///
/// let numbers: Vec<i32> = fixture_factory::create_with(&config).expect("numbers");
/// assert_eq!(numbers, [42, 42]);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Replaces every policy flag.
    #[must_use]
    pub const fn policy(mut self, policy: Policy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Sets [`Policy::use_default_constructor`].
    #[must_use]
    pub const fn use_default_constructor(mut self, enabled: bool) -> Self {
        self.config.policy.use_default_constructor = enabled;
        self
    }

    /// Sets [`Policy::use_default_values`].
    #[must_use]
    pub const fn use_default_values(mut self, enabled: bool) -> Self {
        self.config.policy.use_default_values = enabled;
        self
    }

    /// Sets [`Policy::set_null`].
    #[must_use]
    pub const fn set_null(mut self, enabled: bool) -> Self {
        self.config.policy.set_null = enabled;
        self
    }

    /// Sets [`Policy::prefer_singleton_variants`].
    #[must_use]
    pub const fn prefer_singleton_variants(mut self, enabled: bool) -> Self {
        self.config.policy.prefer_singleton_variants = enabled;
        self
    }

    /// Replaces the generator of the scalar type `S`.
    #[must_use]
    pub fn scalar<S: Scalar>(
        mut self,
        generator: impl Fn(&ParameterContext<'_>) -> S + Send + Sync + 'static,
    ) -> Self {
        self.config.scalars.insert(S::KIND, erase(generator));
        self
    }

    /// Replaces the generator of `Box<[S]>`.
    #[must_use]
    pub fn array<S: Scalar>(
        mut self,
        generator: impl Fn(&ParameterContext<'_>) -> Box<[S]> + Send + Sync + 'static,
    ) -> Self {
        self.config.arrays.insert(S::KIND, erase(generator));
        self
    }

    /// Replaces the element generator for `Vec`, list interfaces and
    /// sequences.
    #[must_use]
    pub fn array_list(
        mut self,
        generator: impl Fn(&ParameterContext<'_>, &TypeDescriptor) -> Result<Vec<Instance>, FixtureError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.config.array_list = Arc::new(generator);
        self
    }

    /// Replaces the element generator for `LinkedList`.
    #[must_use]
    pub fn linked_list(
        mut self,
        generator: impl Fn(&ParameterContext<'_>, &TypeDescriptor) -> Result<Vec<Instance>, FixtureError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.config.linked_list = Arc::new(generator);
        self
    }

    /// Replaces the entry generator for `HashMap` and map interfaces.
    #[must_use]
    pub fn hash_map(
        mut self,
        generator: impl Fn(
            &ParameterContext<'_>,
            &TypeDescriptor,
            &TypeDescriptor,
        ) -> Result<Vec<(Instance, Instance)>, FixtureError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.config.hash_map = Arc::new(generator);
        self
    }

    /// Replaces the `SystemTime` generator.
    #[must_use]
    pub fn timestamp(
        mut self,
        generator: impl Fn(&ParameterContext<'_>) -> SystemTime + Send + Sync + 'static,
    ) -> Self {
        self.config
            .specials
            .insert(SpecialKind::Timestamp, erase(generator));
        self
    }

    /// Replaces the `DateTime<Utc>` generator.
    #[must_use]
    pub fn calendar(
        mut self,
        generator: impl Fn(&ParameterContext<'_>) -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        self.config
            .specials
            .insert(SpecialKind::Calendar, erase(generator));
        self
    }

    /// Replaces the [`Locale`] generator.
    #[must_use]
    pub fn locale(
        mut self,
        generator: impl Fn(&ParameterContext<'_>) -> Locale + Send + Sync + 'static,
    ) -> Self {
        self.config
            .specials
            .insert(SpecialKind::Locale, erase(generator));
        self
    }

    /// Replaces the strategy that picks a sum-type variant.
    #[must_use]
    pub fn sum_type_resolver(
        mut self,
        resolver: impl Fn(&TypeDescriptor, &Config) -> Result<Instance, FixtureError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.config.sum_type_resolver = Arc::new(resolver);
        self
    }

    /// Replaces the strategy that picks an enumeration member.
    #[must_use]
    pub fn enum_resolver(
        mut self,
        resolver: impl Fn(&TypeDescriptor, &Config) -> Result<Instance, FixtureError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.config.enum_resolver = Arc::new(resolver);
        self
    }

    /// Finishes the derived configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}

fn default_slot() -> &'static RwLock<Config> {
    static DEFAULT: OnceLock<RwLock<Config>> = OnceLock::new();
    DEFAULT.get_or_init(|| RwLock::new(Config::deterministic()))
}

/// Returns a copy of the process-wide default configuration.
///
/// Starts out as [`Config::deterministic`]. The default is process-scoped
/// state meant for test suites: tests that reassign it should run in their
/// own binary or otherwise serialise access.
#[must_use]
pub fn default_config() -> Config {
    default_slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the process-wide default configuration.
///
/// Affects every later call that does not pass a configuration explicitly.
pub fn set_default_config(config: Config) {
    *default_slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner) = config;
}
