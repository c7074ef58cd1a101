// SPDX-License-Identifier: MIT
//! Correlation context attached to every log event of one run.

use uuid::Uuid;

/// Correlation scope for a single run of the program.
///
/// Built once at startup and passed explicitly to every registry operation;
/// its fields are attached to each emitted log event so all lines belonging
/// to one run can be correlated downstream. Passing the context explicitly
/// (rather than stashing it in thread-local state) keeps the call sites
/// honest about what they log.
#[derive(Clone, Debug)]
pub struct RunContext {
    /// Identifier generated once per run.
    pub run_id: Uuid,
    /// Deployment environment tag (e.g. `local`, `staging`).
    pub environment: String,
}

impl RunContext {
    /// Create a context with a fresh run identifier and the given environment tag.
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            environment: environment.into(),
        }
    }

    /// Create a context with the environment taken from `RUST_ENV` (default `"local"`).
    pub fn from_env() -> Self {
        Self::new(std::env::var("RUST_ENV").unwrap_or_else(|_| "local".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_ids_are_unique_per_context() {
        let a = RunContext::new("test");
        let b = RunContext::new("test");
        assert_ne!(a.run_id, b.run_id);
    }

    #[test]
    fn environment_tag_is_kept() {
        let ctx = RunContext::new("staging");
        assert_eq!(ctx.environment, "staging");
    }
}
