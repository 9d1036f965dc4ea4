//! Tests for the process-wide default configuration.
//!
//! The default is shared by every test in this binary, so the whole
//! lifecycle runs in a single test.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use fixture_factory::{
    Config, TypeDescriptor, create, default_config, generators, instantiate, set_default_config,
};

#[test]
fn default_configuration_can_be_reassigned() {
    assert_eq!(default_config().policy(), Config::deterministic().policy());
    assert_eq!(create::<u32>(), Ok(1));
    assert_eq!(create::<Vec<u32>>(), Ok(Vec::new()));

    let replacement = Config::deterministic()
        .derive()
        .scalar(|_| 9_u32)
        .array_list(generators::filled_list(2))
        .set_null(true)
        .build();
    set_default_config(replacement);

    assert!(default_config().policy().set_null);
    assert_eq!(create::<u32>(), Ok(9));
    assert_eq!(create::<Vec<u32>>(), Ok(vec![9, 9]));

    let erased = instantiate(&TypeDescriptor::of::<u32>()).expect("u32 resolves");
    assert_eq!(erased.downcast_ref::<u32>(), Some(&9));
}
