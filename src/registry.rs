// SPDX-License-Identifier: MIT
//! In-memory user registry with structured operation logging.
//!
//! Every operation takes a [`RunContext`](crate::context::RunContext) and
//! emits log events carrying the run correlation fields plus a generated
//! per-operation identifier, mirroring what a request-scoped logging context
//! would provide in a real service.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::context::RunContext;

/// A registered user. Immutable once created; removed only by explicit delete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
}

/// The only domain error: inserting under an identifier already in use.
///
/// Lookup or delete of a missing identifier is a normal outcome, not an
/// error, and is reported through the return value instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("user {id} already exists")]
    DuplicateId { id: u64 },
}

/// Mapping from identifier to [`User`]. An identifier maps to at most one
/// user at any time; the registry lives only as long as the process.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<u64, User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user, failing with [`RegistryError::DuplicateId`] if the
    /// identifier is already present. The existing record is left untouched
    /// on failure.
    pub fn create(
        &mut self,
        ctx: &RunContext,
        id: u64,
        username: &str,
        email: &str,
    ) -> Result<User, RegistryError> {
        let operation_id = Uuid::new_v4();
        debug!(
            run_id = %ctx.run_id,
            environment = %ctx.environment,
            operation = "create_user",
            operation_id = %operation_id,
            user_id = id,
            username,
            action = "create_user_attempt",
            "creating new user"
        );

        match self.users.entry(id) {
            Entry::Occupied(_) => {
                error!(
                    run_id = %ctx.run_id,
                    environment = %ctx.environment,
                    operation = "create_user",
                    operation_id = %operation_id,
                    user_id = id,
                    error_type = "duplicate_user",
                    "failed to create user, duplicate id"
                );
                Err(RegistryError::DuplicateId { id })
            }
            Entry::Vacant(slot) => {
                let user = User {
                    id,
                    username: username.to_string(),
                    email: email.to_string(),
                };
                slot.insert(user.clone());
                info!(
                    run_id = %ctx.run_id,
                    environment = %ctx.environment,
                    operation = "create_user",
                    operation_id = %operation_id,
                    user_id = id,
                    username,
                    email,
                    status = "success",
                    "user created"
                );
                Ok(user)
            }
        }
    }

    /// Look up a user. Absence is a normal outcome and returns `None`.
    pub fn get(&self, ctx: &RunContext, id: u64) -> Option<&User> {
        let operation_id = Uuid::new_v4();
        debug!(
            run_id = %ctx.run_id,
            environment = %ctx.environment,
            operation = "get_user",
            operation_id = %operation_id,
            user_id = id,
            action = "get_user",
            "fetching user"
        );

        match self.users.get(&id) {
            Some(user) => {
                info!(
                    run_id = %ctx.run_id,
                    environment = %ctx.environment,
                    operation = "get_user",
                    operation_id = %operation_id,
                    user_id = id,
                    username = %user.username,
                    status = "success",
                    "user retrieved"
                );
                Some(user)
            }
            None => {
                warn!(
                    run_id = %ctx.run_id,
                    environment = %ctx.environment,
                    operation = "get_user",
                    operation_id = %operation_id,
                    user_id = id,
                    status = "not_found",
                    "user not found"
                );
                None
            }
        }
    }

    /// Remove a user if present. Returns whether an entry was removed;
    /// deleting an absent identifier is a no-op reported as `false`.
    pub fn delete(&mut self, ctx: &RunContext, id: u64) -> bool {
        let operation_id = Uuid::new_v4();
        debug!(
            run_id = %ctx.run_id,
            environment = %ctx.environment,
            operation = "delete_user",
            operation_id = %operation_id,
            user_id = id,
            action = "delete_user_attempt",
            "attempting user deletion"
        );

        if self.users.remove(&id).is_some() {
            info!(
                run_id = %ctx.run_id,
                environment = %ctx.environment,
                operation = "delete_user",
                operation_id = %operation_id,
                user_id = id,
                status = "success",
                "user deleted"
            );
            true
        } else {
            warn!(
                run_id = %ctx.run_id,
                environment = %ctx.environment,
                operation = "delete_user",
                operation_id = %operation_id,
                user_id = id,
                status = "failed",
                reason = "user_not_found",
                "user deletion skipped"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RunContext {
        RunContext::new("test")
    }

    #[test]
    fn create_then_get_returns_same_record() {
        let ctx = ctx();
        let mut registry = UserRegistry::new();
        let created = registry
            .create(&ctx, 7, "alice", "alice@example.com")
            .expect("fresh id");
        let fetched = registry.get(&ctx, 7).expect("present");
        assert_eq!(fetched, &created);
        assert_eq!(fetched.username, "alice");
        assert_eq!(fetched.email, "alice@example.com");
    }

    #[test]
    fn duplicate_create_fails_and_preserves_existing() {
        let ctx = ctx();
        let mut registry = UserRegistry::new();
        registry
            .create(&ctx, 1, "john_doe", "john@example.com")
            .unwrap();

        let err = registry
            .create(&ctx, 1, "john_doe2", "john2@example.com")
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId { id: 1 });

        let existing = registry.get(&ctx, 1).expect("still present");
        assert_eq!(existing.username, "john_doe");
        assert_eq!(existing.email, "john@example.com");
    }

    #[test]
    fn delete_twice_reports_absence_second_time() {
        let ctx = ctx();
        let mut registry = UserRegistry::new();
        registry.create(&ctx, 2, "bob", "bob@example.com").unwrap();

        assert!(registry.delete(&ctx, 2));
        assert!(!registry.delete(&ctx, 2));
        assert!(registry.get(&ctx, 2).is_none());
    }

    #[test]
    fn lookup_of_never_created_id_is_absent() {
        let ctx = ctx();
        let registry = UserRegistry::new();
        assert!(registry.get(&ctx, 999).is_none());
    }
}
