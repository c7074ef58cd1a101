// SPDX-License-Identifier: MIT
//! Demo crate wiring structured logging and OTLP telemetry export around a
//! trivial in-memory user registry.
//!
//! Three small modules:
//! * [`registry`] – the in-memory user store with structured operation logs.
//! * [`context`] – the per-run correlation context attached to every event.
//! * [`telemetry`] – OTLP pipeline initialization and shutdown.
//!
//! # Feature Flags
//! * `otlp-log` (default) – export `tracing` events as OTLP log records.
//! * `console-log` – add a compact console formatter (file/line/thread id).
//!
//! # Quick Start
//! ```no_run
//! use user_registry_otel::context::RunContext;
//! use user_registry_otel::registry::UserRegistry;
//! use user_registry_otel::telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let handle = init_telemetry(TelemetryConfig::default())?;
//!     let ctx = RunContext::from_env();
//!     let mut registry = UserRegistry::new();
//!     registry.create(&ctx, 1, "john_doe", "john@example.com")?;
//!     handle.shutdown()?;
//!     Ok(())
//! }
//! ```
pub mod context;
pub mod registry;
pub mod telemetry;
