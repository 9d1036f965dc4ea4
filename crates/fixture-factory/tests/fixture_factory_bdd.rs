//! Behavioural tests for fixture creation.
//!
//! These scenarios cover deterministic and seeded creation, the policy
//! flags, sum-type variant selection and error reporting.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

#[expect(
    dead_code,
    reason = "Shared sample types include some used only by other integration suites."
)]
mod test_support;

use fixture_factory::{Config, FixtureError, Policy, create_with};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use test_support::{Color, Profile, Shape, Sorter};

/// Test world holding the active configuration and created fixtures.
#[derive(Default, ScenarioState)]
struct World {
    config: Slot<Config>,
    seed: Slot<u64>,
    profile: Slot<Profile>,
    second_profile: Slot<Profile>,
    shape: Slot<Shape>,
    sorter_result: Slot<Result<Sorter, FixtureError>>,
}

impl World {
    /// Extracts the active configuration from the world state.
    fn config(&self) -> Config {
        self.config.get().expect("configuration should be set")
    }

    /// Extracts the first created profile from the world state.
    fn profile(&self) -> Profile {
        self.profile.get().expect("profile should be created")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("the deterministic configuration")]
fn the_deterministic_configuration(world: &World) {
    world.config.set(Config::deterministic());
}

#[given("the policy JSON {json}")]
fn the_policy_json(world: &World, json: String) {
    let policy = Policy::from_json(&json).expect("valid policy JSON");
    world.config.set(world.config().derive().policy(policy).build());
}

#[given("the seed {seed:u64}")]
fn the_seed(world: &World, seed: u64) {
    world.seed.set(seed);
}

// ============================================================================
// When steps
// ============================================================================

#[when("a profile is created")]
fn a_profile_is_created(world: &World) {
    let profile = create_with::<Profile>(&world.config()).expect("profile is created");
    world.profile.set(profile);
}

#[when("a profile is created twice")]
fn a_profile_is_created_twice(world: &World) {
    let config = world.config();

    let first = create_with::<Profile>(&config).expect("first profile");
    let second = create_with::<Profile>(&config).expect("second profile");

    world.profile.set(first);
    world.second_profile.set(second);
}

#[when("a profile is created from two configurations with that seed")]
fn a_profile_is_created_from_two_seeded_configurations(world: &World) {
    let seed = world.seed.get().expect("seed should be set");

    let first = create_with::<Profile>(&Config::seeded(seed)).expect("first profile");
    let second = create_with::<Profile>(&Config::seeded(seed)).expect("second profile");

    world.profile.set(first);
    world.second_profile.set(second);
}

#[when("a shape is created")]
fn a_shape_is_created(world: &World) {
    let shape = create_with::<Shape>(&world.config()).expect("shape is created");
    world.shape.set(shape);
}

#[when("a sorter is created")]
fn a_sorter_is_created(world: &World) {
    world
        .sorter_result
        .set(create_with::<Sorter>(&world.config()));
}

// ============================================================================
// Then steps
// ============================================================================

#[then("both profiles are equal")]
fn both_profiles_are_equal(world: &World) {
    let second_opt = world.second_profile.get();
    let second = second_opt.expect("second profile should be set");

    assert_eq!(world.profile(), second, "Profiles should be identical");
}

#[then("the profile holds placeholder values")]
fn the_profile_holds_placeholder_values(world: &World) {
    let profile = world.profile();

    assert_eq!(profile.name, "");
    assert_eq!(profile.nickname.as_deref(), Some(""));
    assert_eq!(profile.age, 30);
    assert_eq!(profile.favourite, Color::Red);
}

#[then("the profile has no nickname")]
fn the_profile_has_no_nickname(world: &World) {
    assert_eq!(world.profile().nickname, None);
}

#[then("the profile age is {age:u8}")]
fn the_profile_age_is(world: &World, age: u8) {
    assert_eq!(world.profile().age, age);
}

#[then("the shape is empty")]
fn the_shape_is_empty(world: &World) {
    assert_eq!(world.shape.get(), Some(Shape::Empty));
}

#[then("the shape is a unit circle")]
fn the_shape_is_a_unit_circle(world: &World) {
    assert_eq!(world.shape.get(), Some(Shape::Circle { radius: 1.0 }));
}

#[then("creation fails naming the interface {interface}")]
fn creation_fails_naming_the_interface(world: &World, interface: String) {
    match world.sorter_result.get() {
        Some(Err(FixtureError::UnsupportedContainerInterface { interface: reported })) => {
            assert_eq!(reported, interface);
        }
        other => panic!("Expected UnsupportedContainerInterface, got: {other:?}"),
    }
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/fixture_factory.feature",
    name = "Deterministic creation is reproducible"
)]
fn deterministic_creation_is_reproducible(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixture_factory.feature",
    name = "Null policy leaves nullable fields empty"
)]
fn null_policy_leaves_nullable_fields_empty(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixture_factory.feature",
    name = "Disabling default values generates optional fields"
)]
fn disabling_default_values_generates_optional_fields(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixture_factory.feature",
    name = "Singleton variants are preferred"
)]
fn singleton_variants_are_preferred(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixture_factory.feature",
    name = "Payload variants are built when singletons are not preferred"
)]
fn payload_variants_are_built_when_singletons_are_not_preferred(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixture_factory.feature",
    name = "Unsupported interfaces are reported"
)]
fn unsupported_interfaces_are_reported(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/fixture_factory.feature",
    name = "Seeded configurations repeat their values"
)]
fn seeded_configurations_repeat_their_values(world: World) {
    let _ = world;
}
