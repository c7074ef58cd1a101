// SPDX-License-Identifier: MIT
//! End-to-end scripted scenario against a fresh registry.

use user_registry_otel::context::RunContext;
use user_registry_otel::registry::{RegistryError, UserRegistry};

#[test]
fn scripted_sequence_end_to_end() {
    let ctx = RunContext::new("test");
    let mut registry = UserRegistry::new();

    let created = registry
        .create(&ctx, 1, "john_doe", "john@example.com")
        .expect("first create succeeds");
    assert_eq!(created.username, "john_doe");

    let err = registry
        .create(&ctx, 1, "john_doe2", "john2@example.com")
        .expect_err("duplicate create fails");
    assert_eq!(err, RegistryError::DuplicateId { id: 1 });

    let found = registry.get(&ctx, 1).expect("user 1 present");
    assert_eq!(found.username, "john_doe");
    assert_eq!(found.email, "john@example.com");

    assert!(registry.get(&ctx, 999).is_none());

    assert!(registry.delete(&ctx, 1));
    assert!(!registry.delete(&ctx, 1));
}
