// SPDX-License-Identifier: MIT
use anyhow::Result;
use tracing::{error, info};
use user_registry_otel::context::RunContext;
use user_registry_otel::registry::{RegistryError, UserRegistry};
use user_registry_otel::telemetry::{init_telemetry, TelemetryConfig};

/// Fixed scripted sequence of registry operations.
fn run_script(registry: &mut UserRegistry, ctx: &RunContext) -> Result<()> {
    let user = registry.create(ctx, 1, "john_doe", "john@example.com")?;
    info!(
        run_id = %ctx.run_id,
        environment = %ctx.environment,
        user_id = user.id,
        operation = "initial_setup",
        "initial user created"
    );

    match registry.create(ctx, 1, "john_doe2", "john2@example.com") {
        Err(RegistryError::DuplicateId { id }) => {
            info!(
                run_id = %ctx.run_id,
                environment = %ctx.environment,
                error_type = "duplicate_user",
                attempted_id = id,
                "duplicate user creation prevented"
            );
        }
        Ok(_) => anyhow::bail!("duplicate create unexpectedly succeeded"),
    }

    registry.get(ctx, 1);
    registry.get(ctx, 999);
    registry.delete(ctx, 1);
    registry.delete(ctx, 1);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = TelemetryConfig::default();
    let ctx = RunContext::new(cfg.environment.clone());
    let telemetry = init_telemetry(cfg)?;

    info!(
        run_id = %ctx.run_id,
        environment = %ctx.environment,
        app_name = "user-registry-otel",
        "application starting"
    );

    let mut registry = UserRegistry::new();
    let outcome = run_script(&mut registry, &ctx);
    if let Err(e) = &outcome {
        error!(
            run_id = %ctx.run_id,
            environment = %ctx.environment,
            error_type = "unexpected_error",
            error_message = %e,
            "unexpected error in scripted run"
        );
    }

    // The shutdown event goes out before the pipeline is flushed, whether or
    // not the script failed.
    let status = if outcome.is_ok() { "clean" } else { "error" };
    info!(
        run_id = %ctx.run_id,
        environment = %ctx.environment,
        operation = "application_shutdown",
        status,
        "application shutting down"
    );
    telemetry.shutdown()?;
    outcome
}
